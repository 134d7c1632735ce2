mod cli;

use crate::cli::{Command, CLI};
use anyhow::Context;
use burrow_core::{ExpiryCalendar, ShortCode};
use burrow_generator::RandomGenerator;
use burrow_storage::CsvFileGateway;
use burrow_store::{RecordStore, StoreSettings};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = CLI::parse();

    info!(data_file = %config.data_file.display(), "opening record store");

    let calendar = ExpiryCalendar::with_zone_name(&config.expiry_format, &config.time_zone)
        .context("invalid expiry calendar")?;
    let settings = StoreSettings::builder()
        .code_length(config.code_length)
        .calendar(calendar)
        .build();

    let store = RecordStore::bootstrap(
        settings,
        CsvFileGateway::new(&config.data_file),
        RandomGenerator::new(),
    )
    .await
    .with_context(|| format!("failed to load {}", config.data_file.display()))?;

    let settings = store.settings();
    info!(
        records = store.len().await,
        code_length = settings.code_length,
        expiry_format = settings.calendar.format(),
        time_zone = settings.calendar.time_zone().iana_name().unwrap_or("fixed"),
        "record store ready"
    );

    match config.command {
        Command::Create {
            target,
            expiry,
            days,
            code,
        } => {
            let expiry = match (expiry, days) {
                (Some(expiry), _) => expiry,
                (None, Some(days)) => store.expiry_in(days)?,
                (None, None) => anyhow::bail!("either --expiry or --days is required"),
            };
            let code = code.map(ShortCode::new).transpose()?;
            let code = store.create(target, expiry, code).await?;
            println!("{code}");
        }
        Command::Resolve { code } => {
            let target = store.resolve(&ShortCode::new_unchecked(code)).await?;
            println!("{target}");
        }
        Command::Info { code } => {
            let record = store.get_record(&ShortCode::new_unchecked(code)).await?;
            println!("{}\t{}\t{}", record.code, record.target, record.expiry);
        }
        Command::Update { code, target } => {
            let code = ShortCode::new_unchecked(code);
            if !store.update_target(&code, target).await? {
                anyhow::bail!("short code not found: {code}");
            }
        }
        Command::Extend { code, days } => {
            let expiry = store
                .extend_expiry(&ShortCode::new_unchecked(code), days)
                .await?;
            println!("{expiry}");
        }
        Command::Purge => {
            let removed = store.purge_expired().await?;
            println!("removed {removed} expired record(s)");
        }
        Command::List => {
            for record in store.records().await {
                println!("{}\t{}\t{}", record.code, record.target, record.expiry);
            }
        }
    }

    Ok(())
}
