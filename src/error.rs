#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChecksumError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IBAN length not known for country {0}")]
    UnknownCountry(String),

    #[error("{country} account identifier must be {expected} characters, got {actual}")]
    LengthMismatch {
        country: String,
        expected: usize,
        actual: usize,
    },

    #[error("check digits {found} do not match expected {expected}")]
    CheckDigitMismatch { expected: String, found: String },

    #[error("unknown card network: {0}")]
    UnknownNetwork(String),
}
