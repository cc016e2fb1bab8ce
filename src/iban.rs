use crate::error::ChecksumError;
use crate::reference::iban_length;

/// ISO 7064 mod-97-10 check digits for `country` + `account`.
///
/// The account identifier (BBAN) may carry uppercase letters, which are
/// expanded to `A=10 .. Z=35` before the reduction.
pub fn iban_check_digits(country: &str, account: &str) -> Result<String, ChecksumError> {
    if country.len() != 2 || !country.chars().all(|ch| ch.is_ascii_uppercase()) {
        return Err(ChecksumError::InvalidArgument(
            "IBAN country code must be 2 uppercase letters".to_string(),
        ));
    }
    if account.is_empty() {
        return Err(ChecksumError::InvalidArgument(
            "IBAN account identifier must not be empty".to_string(),
        ));
    }
    if !account
        .chars()
        .all(|ch| ch.is_ascii_digit() || ch.is_ascii_uppercase())
    {
        return Err(ChecksumError::InvalidArgument(
            "IBAN account identifier must be uppercase alphanumeric".to_string(),
        ));
    }

    let remainder = mod97(account.bytes().chain(country.bytes()).chain(*b"00"));
    Ok(format!("{:02}", 98 - remainder))
}

/// Builds a full IBAN after checking the account length for the country.
pub fn compose_iban(country: &str, account: &str) -> Result<String, ChecksumError> {
    let total = iban_length(country)
        .ok_or_else(|| ChecksumError::UnknownCountry(country.to_string()))?;
    let expected = total - 4;
    if account.len() != expected {
        return Err(ChecksumError::LengthMismatch {
            country: country.to_string(),
            expected,
            actual: account.len(),
        });
    }
    let check = iban_check_digits(country, account)?;
    Ok(format!("{}{}{}", country, check, account))
}

/// Validates a complete IBAN. Spaces are ignored so grouped display text is
/// accepted as-is.
pub fn validate_iban(iban: &str) -> Result<(), ChecksumError> {
    let compact = compact_iban(iban);
    if compact.len() < 5 {
        return Err(ChecksumError::InvalidArgument("IBAN is too short".to_string()));
    }
    if !compact.is_ascii() {
        return Err(ChecksumError::InvalidArgument(
            "IBAN must be alphanumeric".to_string(),
        ));
    }
    let country = &compact[0..2];
    let found = &compact[2..4];
    let account = &compact[4..];

    let total = iban_length(country)
        .ok_or_else(|| ChecksumError::UnknownCountry(country.to_string()))?;
    if compact.len() != total {
        return Err(ChecksumError::LengthMismatch {
            country: country.to_string(),
            expected: total - 4,
            actual: account.len(),
        });
    }

    let expected = iban_check_digits(country, account)?;
    if expected != found {
        return Err(ChecksumError::CheckDigitMismatch {
            expected,
            found: found.to_string(),
        });
    }
    Ok(())
}

/// Groups an IBAN into blocks of four for display.
pub fn format_iban(iban: &str) -> String {
    let compact = compact_iban(iban);
    let mut out = String::with_capacity(compact.len() + compact.len() / 4);
    for (idx, ch) in compact.chars().enumerate() {
        if idx > 0 && idx % 4 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

pub fn compact_iban(iban: &str) -> String {
    iban.chars().filter(|ch| !ch.is_whitespace()).collect()
}

// Callers guarantee the input is uppercase alphanumeric.
fn mod97(chars: impl Iterator<Item = u8>) -> u32 {
    let mut remainder = 0u32;
    for ch in chars {
        let value = if ch.is_ascii_digit() {
            u32::from(ch - b'0')
        } else {
            u32::from(ch - b'A') + 10
        };
        if value >= 10 {
            remainder = (remainder * 10 + value / 10) % 97;
            remainder = (remainder * 10 + value % 10) % 97;
        } else {
            remainder = (remainder * 10 + value) % 97;
        }
    }
    remainder
}
