//! CEP autofill.
//!
//! A lookup never fails loudly: an unknown code or a network error simply
//! produces no match and the member keeps typing the address by hand.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::normalize::capitalize;
use crate::traits::BasePostalLookup;
use crate::types::{Address, ResolvedAddress};

/// A resolved address tagged with the CEP it was resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalMatch {
    pub postal_code: String,
    pub resolved: ResolvedAddress,
}

impl PostalMatch {
    /// Overwrite street, neighborhood, city and region, unless the address
    /// has since moved to another CEP. Returns whether anything was applied.
    pub fn apply_to(&self, address: &mut Address) -> bool {
        if address.postal_code != self.postal_code {
            debug!(
                lookup = %self.postal_code,
                current = %address.postal_code,
                "Discarding stale CEP lookup"
            );
            return false;
        }

        address.street = self.resolved.street.clone();
        address.neighborhood = self.resolved.neighborhood.clone();
        address.city = self.resolved.city.clone();
        address.region = self.resolved.region.clone();
        true
    }
}

#[derive(Clone)]
pub struct PostalLookupAdapter {
    lookup: Arc<dyn BasePostalLookup>,
}

impl PostalLookupAdapter {
    pub fn new(lookup: Arc<dyn BasePostalLookup>) -> Self {
        Self { lookup }
    }

    /// Only a complete 8-digit code is sent to the lookup service.
    pub fn should_lookup(postal_code: &str) -> bool {
        viacep_client::is_valid_cep(postal_code)
    }

    pub async fn resolve(&self, postal_code: &str) -> Option<PostalMatch> {
        if !Self::should_lookup(postal_code) {
            return None;
        }

        match self.lookup.lookup(postal_code).await {
            Ok(Some(resolved)) => Some(PostalMatch {
                postal_code: postal_code.to_string(),
                resolved: ResolvedAddress {
                    street: capitalize(&resolved.street),
                    ..resolved
                },
            }),
            Ok(None) => {
                debug!(cep = postal_code, "CEP not found, leaving fields untouched");
                None
            }
            Err(e) => {
                warn!(cep = postal_code, error = %e, "CEP lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_lookup_only_complete_codes() {
        assert!(PostalLookupAdapter::should_lookup("01310930"));
        assert!(!PostalLookupAdapter::should_lookup("0131093"));
        assert!(!PostalLookupAdapter::should_lookup(""));
    }

    #[test]
    fn test_apply_keeps_number_and_complement() {
        let found = PostalMatch {
            postal_code: "01310930".into(),
            resolved: ResolvedAddress {
                street: "Avenida paulista".into(),
                neighborhood: "Bela Vista".into(),
                city: "São Paulo".into(),
                region: "SP".into(),
            },
        };
        let mut address = Address {
            postal_code: "01310930".into(),
            number: "1578".into(),
            complement: "Masp".into(),
            street: "Rua x".into(),
            ..Default::default()
        };

        assert!(found.apply_to(&mut address));
        assert_eq!(address.street, "Avenida paulista");
        assert_eq!(address.number, "1578");
        assert_eq!(address.complement, "Masp");
    }
}
