use crate::error::ChecksumError;
use std::fmt;
use std::str::FromStr;

pub const IBAN_LENGTHS: &[(&str, usize)] = &[
    ("AD", 24),
    ("AE", 23),
    ("AT", 20),
    ("BE", 16),
    ("BG", 22),
    ("BR", 29),
    ("CH", 21),
    ("CY", 28),
    ("CZ", 24),
    ("DE", 22),
    ("DK", 18),
    ("EE", 20),
    ("ES", 24),
    ("FI", 18),
    ("FR", 27),
    ("GB", 22),
    ("GR", 27),
    ("HR", 21),
    ("HU", 28),
    ("IE", 22),
    ("IL", 23),
    ("IS", 26),
    ("IT", 27),
    ("LI", 21),
    ("LT", 20),
    ("LU", 20),
    ("LV", 21),
    ("MC", 27),
    ("MT", 31),
    ("NL", 18),
    ("NO", 15),
    ("PL", 28),
    ("PT", 25),
    ("RO", 24),
    ("SA", 24),
    ("SE", 24),
    ("SI", 19),
    ("SK", 24),
    ("SM", 27),
    ("TR", 26),
];

pub fn iban_length(country: &str) -> Option<usize> {
    IBAN_LENGTHS
        .iter()
        .find(|(code, _)| *code == country)
        .map(|(_, len)| *len)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardNetwork {
    Visa,
    Mastercard,
    Amex,
    Discover,
}

pub const CARD_NETWORKS: &[CardNetwork] = &[
    CardNetwork::Visa,
    CardNetwork::Mastercard,
    CardNetwork::Amex,
    CardNetwork::Discover,
];

impl CardNetwork {
    pub fn name(self) -> &'static str {
        match self {
            CardNetwork::Visa => "visa",
            CardNetwork::Mastercard => "mastercard",
            CardNetwork::Amex => "amex",
            CardNetwork::Discover => "discover",
        }
    }

    pub fn prefixes(self) -> &'static [&'static str] {
        match self {
            CardNetwork::Visa => &["4"],
            CardNetwork::Mastercard => &["51", "52", "53", "54", "55"],
            CardNetwork::Amex => &["34", "37"],
            CardNetwork::Discover => &["6011", "65"],
        }
    }

    /// Total card number length including the check digit.
    pub fn length(self) -> usize {
        match self {
            CardNetwork::Amex => 15,
            _ => 16,
        }
    }

    pub fn detect(number: &str) -> Option<CardNetwork> {
        CARD_NETWORKS.iter().copied().find(|network| {
            number.len() == network.length()
                && network
                    .prefixes()
                    .iter()
                    .any(|prefix| number.starts_with(prefix))
        })
    }
}

impl fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CardNetwork {
    type Err = ChecksumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lower = value.trim().to_ascii_lowercase();
        CARD_NETWORKS
            .iter()
            .copied()
            .find(|network| network.name() == lower)
            .ok_or_else(|| ChecksumError::UnknownNetwork(value.to_string()))
    }
}

#[cfg(test)]
mod reference_tests {
    use test_case::test_case;

    use super::{iban_length, CardNetwork, CARD_NETWORKS, IBAN_LENGTHS};

    #[test]
    fn test_iban_lengths_fit_country_and_check() {
        for (code, len) in IBAN_LENGTHS {
            assert_eq!(code.len(), 2, "{code}");
            assert!(code.chars().all(|ch| ch.is_ascii_uppercase()), "{code}");
            assert!(*len > 4, "{code} length {len}");
        }
    }

    #[test]
    fn test_iban_length_lookup() {
        assert_eq!(iban_length("GB"), Some(22));
        assert_eq!(iban_length("NO"), Some(15));
        assert_eq!(iban_length("US"), None);
        assert_eq!(iban_length("gb"), None);
    }

    #[test_case("visa", CardNetwork::Visa)]
    #[test_case("MasterCard", CardNetwork::Mastercard)]
    #[test_case(" amex ", CardNetwork::Amex)]
    #[test_case("discover", CardNetwork::Discover)]
    fn test_parse_network(input: &str, expected: CardNetwork) {
        assert_eq!(input.parse::<CardNetwork>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_network() {
        assert!("diners".parse::<CardNetwork>().is_err());
    }

    #[test_case("4111111111111111", Some(CardNetwork::Visa))]
    #[test_case("5555555555554444", Some(CardNetwork::Mastercard))]
    #[test_case("378282246310005", Some(CardNetwork::Amex))]
    #[test_case("6011111111111117", Some(CardNetwork::Discover))]
    #[test_case("3782822463100", None)]
    #[test_case("9111111111111111", None)]
    fn test_detect_network(number: &str, expected: Option<CardNetwork>) {
        assert_eq!(CardNetwork::detect(number), expected);
    }

    #[test]
    fn test_prefixes_leave_room_for_filler() {
        for network in CARD_NETWORKS {
            for prefix in network.prefixes() {
                assert!(prefix.len() < network.length() - 1);
            }
        }
    }
}
