use crate::error::ChecksumError;

/// Computes the digit that, appended to `partial`, makes the whole number
/// pass [`validate_luhn`].
pub fn luhn_check_digit(partial: &str) -> Result<char, ChecksumError> {
    if partial.is_empty() {
        return Err(ChecksumError::InvalidArgument(
            "Luhn input must not be empty".to_string(),
        ));
    }
    if !partial.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(ChecksumError::InvalidArgument(
            "Luhn input must contain only digits".to_string(),
        ));
    }

    // The rightmost input digit sits next to the check digit, so it is doubled.
    let sum = luhn_sum(partial.bytes().rev(), true);
    let check = (10 - sum) % 10;
    Ok(char::from(b'0' + check as u8))
}

pub fn validate_luhn(full: &str) -> bool {
    if full.is_empty() || !full.chars().all(|ch| ch.is_ascii_digit()) {
        return false;
    }
    luhn_sum(full.bytes().rev(), false) == 0
}

// Returns the digit sum reduced mod 10.
fn luhn_sum(digits: impl Iterator<Item = u8>, mut double: bool) -> u32 {
    let mut sum = 0u32;
    for byte in digits {
        let mut value = u32::from(byte - b'0');
        if double {
            value *= 2;
            if value > 9 {
                value -= 9;
            }
        }
        sum = (sum + value) % 10;
        double = !double;
    }
    sum
}

#[cfg(test)]
mod luhn_tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::{luhn_check_digit, validate_luhn};
    use crate::error::ChecksumError;

    #[test_case("411111111111111", '1'; "visa test number")]
    #[test_case("7992739871", '3'; "wikipedia example")]
    #[test_case("37828224631000", '5'; "amex test number")]
    #[test_case("555555555555444", '4'; "mastercard test number")]
    #[test_case("0", '0'; "single zero")]
    fn test_check_digit(partial: &str, expected: char) {
        assert_eq!(luhn_check_digit(partial), Ok(expected));
    }

    #[test_case("4111111111111111", true)]
    #[test_case("79927398713", true)]
    #[test_case("378282246310005", true)]
    #[test_case("4111111111111112", false)]
    #[test_case("79927398710", false)]
    #[test_case("", false)]
    #[test_case("4111-1111-1111-1111", false)]
    fn test_validate(full: &str, expected: bool) {
        assert_eq!(validate_luhn(full), expected);
    }

    #[test]
    fn test_long_input_stays_in_range() {
        let partial = "9".repeat(200_000);
        let check = luhn_check_digit(&partial).unwrap();
        let full = format!("{}{}", partial, check);
        assert!(validate_luhn(&full));
    }

    #[test]
    fn test_rejects_non_digits() {
        assert!(matches!(
            luhn_check_digit("41a1"),
            Err(ChecksumError::InvalidArgument(_))
        ));
        assert!(matches!(
            luhn_check_digit(""),
            Err(ChecksumError::InvalidArgument(_))
        ));
    }

    proptest! {
        #[test]
        fn proptest_round_trip(partial in "[0-9]{1,30}") {
            let check = luhn_check_digit(&partial).unwrap();
            let full = format!("{}{}", partial, check);
            prop_assert!(validate_luhn(&full));
        }

        #[test]
        fn proptest_deterministic(partial in "[0-9]{1,30}") {
            prop_assert_eq!(luhn_check_digit(&partial), luhn_check_digit(&partial));
        }

        #[test]
        fn proptest_single_digit_mutation(
            partial in "[0-9]{1,30}",
            pos_seed in any::<usize>(),
            bump in 1u8..10,
        ) {
            let mut bytes = partial.clone().into_bytes();
            let pos = pos_seed % bytes.len();
            bytes[pos] = b'0' + (bytes[pos] - b'0' + bump) % 10;
            let mutated = String::from_utf8(bytes).unwrap();

            // Doubling is a bijection on 0..=9 after the -9 reduction, so any
            // single changed digit shifts the sum by a non-multiple of 10.
            prop_assert_ne!(luhn_check_digit(&partial), luhn_check_digit(&mutated));
        }
    }
}
