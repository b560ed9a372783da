//! Member and address models shared by the form and the collaborators.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A verified member, as returned by the identity backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(deserialize_with = "string_or_number")]
    pub matricula: String,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub atividade: String,
    #[serde(default)]
    pub congregacao: String,
}

impl Member {
    /// Key under which this member's saved marker is stored.
    pub fn identity(&self) -> &str {
        &self.matricula
    }
}

/// The census backend has served `matricula` both as a string and as a bare number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// Postal address being collected. Serialized with the field names the
/// address backend expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "cep")]
    pub postal_code: String,
    #[serde(rename = "logradouro")]
    pub street: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "complemento")]
    pub complement: String,
    #[serde(rename = "bairro")]
    pub neighborhood: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub region: String,
}

impl Address {
    /// Every required field is filled. Complement is optional.
    pub fn is_complete(&self) -> bool {
        AddressField::REQUIRED
            .iter()
            .all(|field| !self.get(*field).is_empty())
    }

    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::PostalCode => &self.postal_code,
            AddressField::Street => &self.street,
            AddressField::Number => &self.number,
            AddressField::Complement => &self.complement,
            AddressField::Neighborhood => &self.neighborhood,
            AddressField::City => &self.city,
            AddressField::Region => &self.region,
        }
    }

    pub fn set(&mut self, field: AddressField, value: String) {
        let slot = match field {
            AddressField::PostalCode => &mut self.postal_code,
            AddressField::Street => &mut self.street,
            AddressField::Number => &mut self.number,
            AddressField::Complement => &mut self.complement,
            AddressField::Neighborhood => &mut self.neighborhood,
            AddressField::City => &mut self.city,
            AddressField::Region => &mut self.region,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        *self == Address::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    PostalCode,
    Street,
    Number,
    Complement,
    Neighborhood,
    City,
    Region,
}

impl AddressField {
    pub const ALL: [AddressField; 7] = [
        AddressField::PostalCode,
        AddressField::Street,
        AddressField::Number,
        AddressField::Complement,
        AddressField::Neighborhood,
        AddressField::City,
        AddressField::Region,
    ];

    pub const REQUIRED: [AddressField; 6] = [
        AddressField::PostalCode,
        AddressField::Street,
        AddressField::Number,
        AddressField::Neighborhood,
        AddressField::City,
        AddressField::Region,
    ];

    /// Wire name, as used by the address backend.
    pub fn name(&self) -> &'static str {
        match self {
            AddressField::PostalCode => "cep",
            AddressField::Street => "logradouro",
            AddressField::Number => "numero",
            AddressField::Complement => "complemento",
            AddressField::Neighborhood => "bairro",
            AddressField::City => "cidade",
            AddressField::Region => "estado",
        }
    }

    /// Human label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            AddressField::PostalCode => "CEP",
            AddressField::Street => "Logradouro",
            AddressField::Number => "Número",
            AddressField::Complement => "Complemento",
            AddressField::Neighborhood => "Bairro",
            AddressField::City => "Cidade",
            AddressField::Region => "Estado",
        }
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AddressField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AddressField::ALL
            .iter()
            .copied()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("unknown address field: {}", s))
    }
}

/// Fields a postal lookup fills in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAddress {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub region: String,
}

/// Body of `POST /enderecos`.
#[derive(Debug, Serialize)]
pub struct SaveAddressRequest<'a> {
    pub matricula: &'a str,
    pub endereco: &'a Address,
}
