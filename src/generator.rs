use crate::error::ChecksumError;
use crate::iban::{compose_iban, format_iban};
use crate::luhn::luhn_check_digit;
use crate::models::{GeneratedRecord, RecordKind};
use crate::reference::{iban_length, CardNetwork};
use crate::util::{format_card_number, random_digits};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorKind {
    Card(CardNetwork),
    Iban { country: String },
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub kind: GeneratorKind,
    pub count: usize,
}

pub fn generate_batch(
    config: &GeneratorConfig,
    seed: u64,
) -> Result<Vec<GeneratedRecord>, ChecksumError> {
    if config.count == 0 {
        return Err(ChecksumError::InvalidArgument(
            "count must be at least 1".to_string(),
        ));
    }
    if let GeneratorKind::Iban { country } = &config.kind {
        if iban_length(country).is_none() {
            return Err(ChecksumError::UnknownCountry(country.clone()));
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut records = Vec::with_capacity(config.count);
    for _ in 0..config.count {
        let record = match &config.kind {
            GeneratorKind::Card(network) => generate_card(&mut rng, *network)?,
            GeneratorKind::Iban { country } => generate_iban(&mut rng, country)?,
        };
        records.push(record);
    }
    log::debug!("generated {} record(s) with seed {}", records.len(), seed);
    Ok(records)
}

pub fn generate_card<R: Rng + ?Sized>(
    rng: &mut R,
    network: CardNetwork,
) -> Result<GeneratedRecord, ChecksumError> {
    let prefix = network
        .prefixes()
        .choose(rng)
        .ok_or_else(|| ChecksumError::UnknownNetwork(network.to_string()))?;
    let filler_len = network.length() - 1 - prefix.len();
    let mut number = format!("{}{}", prefix, random_digits(rng, filler_len));
    let check = luhn_check_digit(&number)?;
    number.push(check);

    Ok(GeneratedRecord {
        kind: RecordKind::Card,
        display: format_card_number(&number),
        value: number,
        issuer: network.to_string(),
    })
}

pub fn generate_iban<R: Rng + ?Sized>(
    rng: &mut R,
    country: &str,
) -> Result<GeneratedRecord, ChecksumError> {
    let length = iban_length(country)
        .ok_or_else(|| ChecksumError::UnknownCountry(country.to_string()))?;
    let account = random_digits(rng, length - 4);
    let iban = compose_iban(country, &account)?;

    Ok(GeneratedRecord {
        kind: RecordKind::Iban,
        display: format_iban(&iban),
        value: iban,
        issuer: country.to_string(),
    })
}
