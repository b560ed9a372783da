use serde::{Deserialize, Deserializer};

/// Body returned by `GET /ws/{cep}/json/`.
///
/// An unknown code comes back as `{"erro": true}` with every other field
/// missing, so all fields default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CepResponse {
    #[serde(default)]
    pub cep: String,
    #[serde(default)]
    pub logradouro: String,
    #[serde(default)]
    pub complemento: String,
    #[serde(default)]
    pub bairro: String,
    #[serde(default)]
    pub localidade: String,
    #[serde(default)]
    pub uf: String,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub erro: bool,
}

impl CepResponse {
    pub fn is_error(&self) -> bool {
        self.erro
    }
}

/// ViaCEP has returned `erro` both as a boolean and as the string `"true"`.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(s) => s.eq_ignore_ascii_case("true"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_found_response() {
        let body = r#"{
            "cep": "01001-000",
            "logradouro": "Praça da Sé",
            "complemento": "lado ímpar",
            "bairro": "Sé",
            "localidade": "São Paulo",
            "uf": "SP",
            "ibge": "3550308",
            "ddd": "11"
        }"#;

        let resp: CepResponse = serde_json::from_str(body).unwrap();
        assert!(!resp.is_error());
        assert_eq!(resp.logradouro, "Praça da Sé");
        assert_eq!(resp.localidade, "São Paulo");
        assert_eq!(resp.uf, "SP");
        assert_eq!(resp.bairro, "Sé");
    }

    #[test]
    fn test_parses_error_flag_variants() {
        let as_bool: CepResponse = serde_json::from_str(r#"{"erro": true}"#).unwrap();
        assert!(as_bool.is_error());

        let as_text: CepResponse = serde_json::from_str(r#"{"erro": "true"}"#).unwrap();
        assert!(as_text.is_error());

        let absent: CepResponse = serde_json::from_str(r#"{"uf": "RJ"}"#).unwrap();
        assert!(!absent.is_error());
    }
}
