//! CNPJ normalization and formatting.
//!
//! A CNPJ is the 14-digit Brazilian company registry identifier. Users type
//! it in any punctuation style (`11.222.333/0001-44`, `11222333000144`, ...),
//! so every public entry point normalizes before touching the network.

use phonenumber::country::Id as CountryId;
use phonenumber::Mode;

/// Strips every character that is not an ASCII digit.
pub fn clean_cnpj(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// A CNPJ is valid when it reduces to exactly 14 digits.
pub fn is_valid_cnpj(raw: &str) -> bool {
    clean_cnpj(raw).len() == 14
}

/// Renders a CNPJ in the canonical `NN.NNN.NNN/NNNN-NN` display form.
///
/// Inputs that do not reduce to 14 digits come back as their bare digit
/// string; callers are expected to run [`is_valid_cnpj`] first.
pub fn format_cnpj(raw: &str) -> String {
    let digits = clean_cnpj(raw);
    if digits.len() != 14 {
        return digits;
    }
    format!(
        "{}.{}.{}/{}-{}",
        &digits[..2],
        &digits[2..5],
        &digits[5..8],
        &digits[8..12],
        &digits[12..]
    )
}

/// Validate and normalize a Brazilian phone number to E.164.
///
/// Uses the phonenumber library (port of Google's libphonenumber) with the
/// BR region. Returns `None` for anything that does not parse as a valid
/// Brazilian number; callers keep their raw value in that case.
pub fn normalize_br_phone(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.len() < 8 {
        return None;
    }

    match phonenumber::parse(Some(CountryId::BR), trimmed) {
        Ok(number) if phonenumber::is_valid(&number) => {
            Some(number.format().mode(Mode::E164).to_string())
        }
        Ok(_) => {
            tracing::debug!("Not a valid BR phone: {}", raw);
            None
        }
        Err(e) => {
            tracing::debug!("Failed to parse BR phone '{}': {:?}", raw, e);
            None
        }
    }
}
