mod error;
mod generator;
mod iban;
mod logging;
mod luhn;
mod models;
mod preflight;
mod reference;
mod util;

use clap::{Parser, Subcommand};
use generator::{generate_batch, GeneratorConfig, GeneratorKind};
use models::GeneratedRecord;
use rand::Rng;
use reference::{iban_length, CardNetwork};
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "fakegen")]
#[command(about = "Fake payment identifier generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate Luhn-valid card numbers
    Card(CardArgs),
    /// Generate IBANs with valid check digits
    Iban(IbanArgs),
    /// Compute the Luhn check digit for a partial number
    LuhnDigit(LuhnDigitArgs),
    /// Compute IBAN check digits for a country and account identifier
    IbanDigits(IbanDigitsArgs),
    /// Validate a card number or IBAN
    Validate(ValidateArgs),
    /// Re-validate a generated CSV file
    Preflight(PreflightArgs),
}

#[derive(Parser)]
struct CardArgs {
    #[arg(long, default_value = "visa")]
    network: String,
    #[arg(long, default_value_t = 1)]
    count: usize,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Parser)]
struct IbanArgs {
    #[arg(long, default_value = "DE")]
    country: String,
    #[arg(long, default_value_t = 1)]
    count: usize,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    output: Option<PathBuf>,
    /// Print IBANs without the four-character grouping
    #[arg(long, default_value_t = false)]
    compact: bool,
}

#[derive(Parser)]
struct LuhnDigitArgs {
    digits: String,
}

#[derive(Parser)]
struct IbanDigitsArgs {
    country: String,
    account: String,
}

#[derive(Parser)]
struct ValidateArgs {
    value: String,
}

#[derive(Parser)]
struct PreflightArgs {
    #[arg(long, default_value = "data/generated.csv")]
    input: PathBuf,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    logging::init_logging("fakegen")?;
    let cli = Cli::parse();
    match cli.command {
        Command::Card(args) => run_card(args),
        Command::Iban(args) => run_iban(args),
        Command::LuhnDigit(args) => run_luhn_digit(args),
        Command::IbanDigits(args) => run_iban_digits(args),
        Command::Validate(args) => run_validate(args),
        Command::Preflight(args) => run_preflight(args),
    }
}

fn run_card(args: CardArgs) -> Result<(), String> {
    let network = args
        .network
        .parse::<CardNetwork>()
        .map_err(|err| err.to_string())?;
    let config = GeneratorConfig {
        kind: GeneratorKind::Card(network),
        count: args.count,
    };
    let records = run_generate(&config, args.seed, args.output.as_deref())?;
    if args.output.is_none() {
        for record in &records {
            println!("{}", record.display);
        }
    }
    Ok(())
}

fn run_iban(args: IbanArgs) -> Result<(), String> {
    let config = GeneratorConfig {
        kind: GeneratorKind::Iban {
            country: args.country.trim().to_ascii_uppercase(),
        },
        count: args.count,
    };
    let records = run_generate(&config, args.seed, args.output.as_deref())?;
    if args.output.is_none() {
        for record in &records {
            if args.compact {
                println!("{}", record.value);
            } else {
                println!("{}", record.display);
            }
        }
    }
    Ok(())
}

fn run_generate(
    config: &GeneratorConfig,
    seed: Option<u64>,
    output: Option<&Path>,
) -> Result<Vec<GeneratedRecord>, String> {
    let seed = seed.unwrap_or_else(random_seed);
    log::info!(
        "Generating {} {:?} record(s) (seed {})",
        config.count,
        config.kind,
        seed
    );

    let gen_start = Instant::now();
    let records = generate_batch(config, seed).map_err(|err| err.to_string())?;
    let gen_elapsed = gen_start.elapsed();

    if let Some(path) = output {
        write_csv(path, &records)?;
        emit_info_line(&format!(
            "Wrote {} record(s) to {}",
            records.len(),
            path.display()
        ));
    }
    log::info!("Generation time: {} ms", gen_elapsed.as_millis());
    Ok(records)
}

fn run_luhn_digit(args: LuhnDigitArgs) -> Result<(), String> {
    let digits = args.digits.trim();
    let check = luhn::luhn_check_digit(digits).map_err(|err| err.to_string())?;
    log::info!("Luhn check digit for {} is {}", digits, check);
    println!("{check}");
    Ok(())
}

fn run_iban_digits(args: IbanDigitsArgs) -> Result<(), String> {
    let (check, grouped) = resolve_iban_digits(&args.country, &args.account)?;
    println!("{check}");
    if let Some(grouped) = grouped {
        emit_info_line(&format!("IBAN: {}", grouped));
    }
    Ok(())
}

/// Check digits plus the grouped IBAN when the country is known. Fails
/// before anything is printed so a bad account length never yields digits.
fn resolve_iban_digits(
    country: &str,
    account: &str,
) -> Result<(String, Option<String>), String> {
    let country = country.trim().to_ascii_uppercase();
    let account = iban::compact_iban(account).to_ascii_uppercase();
    let check =
        iban::iban_check_digits(&country, &account).map_err(|err| err.to_string())?;

    if iban_length(&country).is_none() {
        log::warn!("IBAN length not known for country {}", country);
        return Ok((check, None));
    }
    let full = iban::compose_iban(&country, &account).map_err(|err| err.to_string())?;
    Ok((check, Some(iban::format_iban(&full))))
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let compact = iban::compact_iban(&args.value);
    if util::is_digit_string(&compact) {
        if !luhn::validate_luhn(&compact) {
            return Err(format!("{} fails Luhn check", compact));
        }
        let network = CardNetwork::detect(&compact)
            .map(|network| network.to_string())
            .unwrap_or_else(|| "unknown network".to_string());
        emit_info_line(&format!("Valid card number ({})", network));
    } else {
        iban::validate_iban(&compact.to_ascii_uppercase()).map_err(|err| err.to_string())?;
        emit_info_line("Valid IBAN");
    }
    println!("valid");
    Ok(())
}

fn run_preflight(args: PreflightArgs) -> Result<(), String> {
    let report = preflight::preflight_csv(&args.input)?;

    emit_info_line(&format!(
        "Preflight: records={} cards={} ibans={}",
        report.total_records, report.card_records, report.iban_records
    ));
    emit_info_line(&format!(
        "Preflight issues: errors={} warnings={}",
        report.error_count(),
        report.warning_count()
    ));

    emit_issue_summary("error", &report.issues, preflight::IssueLevel::Error);
    emit_issue_summary("warning", &report.issues, preflight::IssueLevel::Warning);

    if report.error_count() > 0 {
        return Err(format!(
            "preflight failed with {} error(s)",
            report.error_count()
        ));
    }

    Ok(())
}

fn emit_issue_summary(
    label: &str,
    issues: &[preflight::PreflightIssue],
    level: preflight::IssueLevel,
) {
    let mut counts = std::collections::HashMap::new();
    for issue in issues.iter().filter(|issue| issue.level == level) {
        *counts.entry(issue.message.as_str()).or_insert(0usize) += 1;
    }
    if counts.is_empty() {
        return;
    }

    let mut items: Vec<(&str, usize)> = counts.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let max_items = 5usize;
    for (message, count) in items.iter().take(max_items) {
        emit_info_line(&format!("Preflight {}s: {} = {}", label, message, count));
    }
    if items.len() > max_items {
        emit_info_line(&format!(
            "Preflight {}s: {} additional issue types not shown",
            label,
            items.len() - max_items
        ));
    }
}

fn random_seed() -> u64 {
    let mut rng = rand::rngs::OsRng;
    rng.gen()
}

fn write_csv(output: &Path, records: &[GeneratedRecord]) -> Result<(), String> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|err| err.to_string())?;
        }
    }
    let mut writer = csv::Writer::from_path(output).map_err(|err| err.to_string())?;
    for record in records {
        writer.serialize(record).map_err(|err| err.to_string())?;
    }
    writer.flush().map_err(|err| err.to_string())
}

fn emit_info_line(message: &str) {
    if log::log_enabled!(log::Level::Info) {
        log::info!("{}", message);
    } else {
        eprintln!("{message}");
    }
}
