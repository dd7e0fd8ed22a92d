use clap::{Parser, Subcommand, ValueEnum};
use shortcut_generator::DEFAULT_ALIAS_LENGTH;
use shortcut_store::DEFAULT_MAX_ATTEMPTS;

pub const DATABASE_URL_ENV: &str = "SHORTCUT_DATABASE_URL";
pub const ALIAS_LENGTH_ENV: &str = "SHORTCUT_ALIAS_LENGTH";
pub const MAX_ATTEMPTS_ENV: &str = "SHORTCUT_MAX_ATTEMPTS";
pub const LOG_FORMAT_ENV: &str = "SHORTCUT_LOG_FORMAT";

pub const DEFAULT_DATABASE_URL: &str = "sqlite://shortcut.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "shortcut", about = "Map short aliases to URLs")]
pub struct Cli {
    #[arg(long, global = true, env = DATABASE_URL_ENV, default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Length of generated aliases.
    #[arg(
        long,
        global = true,
        env = ALIAS_LENGTH_ENV,
        default_value_t = DEFAULT_ALIAS_LENGTH,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..),
    )]
    pub alias_length: usize,

    /// Insert attempts for a generated alias before giving up.
    #[arg(
        long,
        global = true,
        env = MAX_ATTEMPTS_ENV,
        default_value_t = DEFAULT_MAX_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..),
    )]
    pub max_attempts: u32,

    #[arg(long, global = true, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store a URL under a given or generated alias.
    Create {
        url: String,
        #[arg(long)]
        alias: Option<String>,
    },
    /// Print the URL stored under an alias.
    Resolve { alias: String },
    /// Remove the mapping for an alias.
    Delete { alias: String },
}
