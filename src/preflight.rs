use crate::iban::{format_iban, validate_iban};
use crate::luhn::validate_luhn;
use crate::models::{GeneratedRecord, RecordKind};
use crate::reference::CardNetwork;
use crate::util::format_card_number;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueLevel {
    Error,
    Warning,
}

#[derive(Debug, Clone)]
pub struct PreflightIssue {
    pub level: IssueLevel,
    /// 1-based data row, header excluded.
    pub row: usize,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct PreflightReport {
    pub total_records: usize,
    pub card_records: usize,
    pub iban_records: usize,
    pub issues: Vec<PreflightIssue>,
}

impl PreflightReport {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.level == IssueLevel::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.level == IssueLevel::Warning)
            .count()
    }
}

pub fn preflight_csv(path: &Path) -> Result<PreflightReport, String> {
    let reader = csv::Reader::from_path(path).map_err(|err| err.to_string())?;
    preflight_reader(reader)
}

pub fn preflight_reader<R: Read>(
    mut reader: csv::Reader<R>,
) -> Result<PreflightReport, String> {
    let mut issues = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut total_records = 0usize;
    let mut card_records = 0usize;
    let mut iban_records = 0usize;

    for (idx, result) in reader.deserialize().enumerate() {
        let record: GeneratedRecord = result.map_err(|err| err.to_string())?;
        let row = idx + 1;
        total_records += 1;
        match record.kind {
            RecordKind::Card => {
                card_records += 1;
                validate_card_record(&record, row, &mut issues);
            }
            RecordKind::Iban => {
                iban_records += 1;
                validate_iban_record(&record, row, &mut issues);
            }
        }

        if !seen.insert(record.value.clone()) {
            issues.push(issue(IssueLevel::Warning, row, "duplicate value detected"));
        }
    }

    log::debug!(
        "preflight checked {} record(s), {} issue(s)",
        total_records,
        issues.len()
    );

    Ok(PreflightReport {
        total_records,
        card_records,
        iban_records,
        issues,
    })
}

fn validate_card_record(record: &GeneratedRecord, row: usize, issues: &mut Vec<PreflightIssue>) {
    if !validate_luhn(&record.value) {
        issues.push(issue(IssueLevel::Error, row, "card number fails Luhn check"));
        return;
    }
    match CardNetwork::detect(&record.value) {
        Some(network) if network.name() != record.issuer => issues.push(issue(
            IssueLevel::Warning,
            row,
            "card issuer does not match number prefix",
        )),
        Some(_) => {}
        None => issues.push(issue(
            IssueLevel::Warning,
            row,
            "card number matches no known network",
        )),
    }
    if format_card_number(&record.value) != record.display {
        issues.push(issue(
            IssueLevel::Warning,
            row,
            "display text does not match card number",
        ));
    }
}

fn validate_iban_record(record: &GeneratedRecord, row: usize, issues: &mut Vec<PreflightIssue>) {
    if let Err(err) = validate_iban(&record.value) {
        issues.push(PreflightIssue {
            level: IssueLevel::Error,
            row,
            message: format!("IBAN is invalid: {}", err),
        });
        return;
    }
    if !record.value.starts_with(record.issuer.as_str()) {
        issues.push(issue(
            IssueLevel::Error,
            row,
            "IBAN country code does not match issuer",
        ));
    }
    if format_iban(&record.value) != record.display {
        issues.push(issue(
            IssueLevel::Warning,
            row,
            "display text does not match IBAN",
        ));
    }
}

fn issue(level: IssueLevel, row: usize, message: &str) -> PreflightIssue {
    PreflightIssue {
        level,
        row,
        message: message.to_string(),
    }
}
