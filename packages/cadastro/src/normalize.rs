//! Input normalization applied before a value reaches form state.

use crate::types::AddressField;

/// Maximum length of a CPF / matrícula.
pub const IDENTITY_MAX_LEN: usize = 11;

/// Length of a complete CEP.
pub const POSTAL_CODE_LEN: usize = viacep_client::CEP_LEN;

pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn digits_truncated(raw: &str, max: usize) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).take(max).collect()
}

/// Login value: digits only, at most 11.
pub fn normalize_identity(raw: &str) -> String {
    digits_truncated(raw, IDENTITY_MAX_LEN)
}

/// CEP value: digits only, at most 8.
pub fn normalize_postal_code(raw: &str) -> String {
    digits_truncated(raw, POSTAL_CODE_LEN)
}

/// First character upper-cased, the rest lower-cased.
pub fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Per-field rule for free-typed input.
pub fn normalize_field(field: AddressField, raw: &str) -> String {
    match field {
        AddressField::PostalCode => normalize_postal_code(raw),
        AddressField::Number => digits_only(raw),
        AddressField::Street | AddressField::City => capitalize(raw),
        AddressField::Complement | AddressField::Neighborhood | AddressField::Region => {
            raw.to_string()
        }
    }
}
