use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DATA_FILE_ENV: &str = "BURROW_DATA_FILE";
pub const CODE_LENGTH_ENV: &str = "BURROW_CODE_LENGTH";
pub const EXPIRY_FORMAT_ENV: &str = "BURROW_EXPIRY_FORMAT";
pub const TIME_ZONE_ENV: &str = "BURROW_TIME_ZONE";

pub const DEFAULT_DATA_FILE: &str = "urls.csv";
pub const DEFAULT_TIME_ZONE: &str = "UTC";

#[derive(Debug, Parser)]
#[command(name = "burrow", about = "Manage a file-backed short-code store")]
pub struct CLI {
    #[arg(long, env = DATA_FILE_ENV, default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    #[arg(long, env = CODE_LENGTH_ENV, default_value_t = burrow_store::settings::DEFAULT_CODE_LENGTH)]
    pub code_length: usize,

    #[arg(
        long,
        env = EXPIRY_FORMAT_ENV,
        default_value = burrow_core::expiry::DEFAULT_EXPIRY_FORMAT,
    )]
    pub expiry_format: String,

    #[arg(long, env = TIME_ZONE_ENV, default_value = DEFAULT_TIME_ZONE)]
    pub time_zone: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store a new target and print its short code
    Create {
        #[arg(long)]
        target: String,
        /// Expiry date in the configured format
        #[arg(long, conflicts_with = "days", required_unless_present = "days")]
        expiry: Option<String>,
        /// Expire this many days from today instead
        #[arg(long)]
        days: Option<i32>,
        /// Use this code instead of a generated one
        #[arg(long)]
        code: Option<String>,
    },
    /// Print the target of a live short code
    Resolve { code: String },
    /// Print the stored record, expired or not
    Info { code: String },
    /// Point a short code at a new target
    Update { code: String, target: String },
    /// Move the expiry of a short code by a number of days
    Extend {
        code: String,
        #[arg(allow_negative_numbers = true)]
        days: i32,
    },
    /// Remove every expired record
    Purge,
    /// Print every record
    List,
}
