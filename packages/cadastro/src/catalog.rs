//! Static state → city catalog backing the region and city selectors.

use indexmap::IndexMap;
use lazy_static::lazy_static;

const ENTRIES: &[(&str, &[&str])] = &[
    (
        "SP",
        &[
            "São Paulo",
            "Campinas",
            "Santo André",
            "São Bernardo do Campo",
            "São Caetano do Sul",
            "Diadema",
            "Mauá",
            "Ribeirão Preto",
            "Piracicaba",
            "Jundiaí",
            "Bauru",
            "Sorocaba",
            "Osasco",
            "Guarulhos",
            "Santos",
            "São José dos Campos",
            "Mogi das Cruzes",
            "São José do Rio Preto",
        ],
    ),
    (
        "RJ",
        &[
            "Rio de Janeiro",
            "Niterói",
            "Duque de Caxias",
            "Nova Iguaçu",
            "São Gonçalo",
            "Petrópolis",
            "Volta Redonda",
            "Campos dos Goytacazes",
            "Macaé",
            "Angra dos Reis",
            "Cabo Frio",
            "Teresópolis",
            "Nova Friburgo",
        ],
    ),
    (
        "MG",
        &[
            "Belo Horizonte",
            "Uberlândia",
            "Juiz de Fora",
            "Contagem",
            "Betim",
            "Uberaba",
            "Montes Claros",
            "Governador Valadares",
            "Ipatinga",
            "Sete Lagoas",
            "Divinópolis",
            "Poços de Caldas",
            "Araguari",
            "Patos de Minas",
        ],
    ),
];

lazy_static! {
    static ref CATALOG: RegionCatalog = RegionCatalog::from_entries(ENTRIES);
}

/// Ordered region → cities mapping. Immutable once built.
#[derive(Debug, Clone)]
pub struct RegionCatalog {
    regions: IndexMap<&'static str, Vec<&'static str>>,
}

impl RegionCatalog {
    /// The compiled-in catalog, built on first use.
    pub fn global() -> &'static RegionCatalog {
        &CATALOG
    }

    /// Build a catalog, dropping repeated city names within a region.
    pub fn from_entries(entries: &[(&'static str, &[&'static str])]) -> Self {
        let mut regions: IndexMap<&'static str, Vec<&'static str>> = IndexMap::new();
        for (region, cities) in entries {
            let list = regions.entry(*region).or_default();
            for city in cities.iter() {
                if !list.contains(city) {
                    list.push(*city);
                }
            }
        }
        Self { regions }
    }

    /// Region codes in catalog order.
    pub fn regions(&self) -> Vec<&'static str> {
        self.regions.keys().copied().collect()
    }

    /// Cities for `region`; empty for an unknown or blank region.
    pub fn cities(&self, region: &str) -> &[&'static str] {
        self.regions
            .get(region)
            .map(|cities| cities.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains_city(&self, region: &str, city: &str) -> bool {
        self.cities(region).iter().any(|c| *c == city)
    }

    /// Options for the city selector. A current city missing from the
    /// region's list is put first so it stays selectable.
    pub fn city_options(&self, region: &str, current_city: &str) -> Vec<String> {
        let base = self.cities(region);
        let mut options = Vec::with_capacity(base.len() + 1);
        if !current_city.is_empty() && !self.contains_city(region, current_city) {
            options.push(current_city.to_string());
        }
        options.extend(base.iter().map(|c| c.to_string()));
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_keep_order() {
        assert_eq!(RegionCatalog::global().regions(), vec!["SP", "RJ", "MG"]);
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let catalog = RegionCatalog::from_entries(&[("SP", &["Osasco", "Santos", "Osasco"])]);
        assert_eq!(catalog.cities("SP"), &["Osasco", "Santos"]);

        let sp = RegionCatalog::global().cities("SP");
        assert_eq!(sp.iter().filter(|c| **c == "Sorocaba").count(), 1);
    }

    #[test]
    fn test_city_options_listed_city() {
        let catalog = RegionCatalog::global();
        let options = catalog.city_options("RJ", "Niterói");
        let expected: Vec<String> = catalog.cities("RJ").iter().map(|c| c.to_string()).collect();
        assert_eq!(options, expected);
    }

    #[test]
    fn test_city_options_unlisted_city_goes_first() {
        let catalog = RegionCatalog::global();
        let options = catalog.city_options("SP", "Barueri");
        assert_eq!(options[0], "Barueri");
        assert_eq!(options.len(), catalog.cities("SP").len() + 1);
        assert_eq!(options[1], "São Paulo");
    }

    #[test]
    fn test_city_options_without_region() {
        let catalog = RegionCatalog::global();
        assert!(catalog.city_options("", "").is_empty());
        assert_eq!(catalog.city_options("", "Salvador"), vec!["Salvador".to_string()]);
        assert_eq!(catalog.city_options("BA", "Salvador"), vec!["Salvador".to_string()]);
    }
}
