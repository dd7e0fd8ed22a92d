mod cli;

use crate::cli::{Cli, Command, LogFormat};
use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use shortcut_core::{Alias, AliasStore, CreateParams, StoreError};
use shortcut_generator::{RandomGenerator, RandomGeneratorSettings};
use shortcut_storage::{SqliteRepository, SqliteSettings};
use shortcut_store::{AliasStoreService, StoreSettings};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct CreateOutput<'a> {
    id: i64,
    alias: &'a str,
    url: &'a str,
}

#[derive(Serialize)]
struct ResolveOutput<'a> {
    alias: &'a str,
    url: &'a str,
}

#[derive(Serialize)]
struct DeleteOutput<'a> {
    alias: &'a str,
    deleted: bool,
}

#[derive(Serialize)]
struct ErrorOutput<'a> {
    kind: &'a str,
    message: String,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_format);
    let json = cli.json;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let kind = err
                .downcast_ref::<StoreError>()
                .map(|e| e.kind().as_str())
                .unwrap_or("internal");
            debug!(kind, "command failed");
            if json {
                let output = ErrorOutput {
                    kind,
                    message: format!("{err:#}"),
                };
                if let Ok(line) = serde_json::to_string(&output) {
                    println!("{line}");
                }
            } else {
                eprintln!("error[{kind}]: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let sqlite = SqliteSettings::builder()
        .database_url(cli.database_url.clone())
        .build();
    let repository = SqliteRepository::connect(&sqlite)
        .await
        .map_err(StoreError::StorageUnavailable)
        .with_context(|| format!("opening {}", cli.database_url))?;

    let generator = RandomGenerator::new(
        RandomGeneratorSettings::builder()
            .length(cli.alias_length)
            .build(),
    )?;
    let settings = StoreSettings::builder()
        .max_attempts(cli.max_attempts)
        .build();
    let store = AliasStoreService::with_settings(repository, generator, settings)?;

    debug!(
        alias_length = cli.alias_length,
        max_attempts = cli.max_attempts,
        "store ready"
    );

    match cli.command {
        Command::Create { url, alias } => {
            let created = store.create(CreateParams::from_parts(url.clone(), alias)).await?;
            if cli.json {
                print_json(&CreateOutput {
                    id: created.id,
                    alias: created.alias.as_str(),
                    url: &url,
                })?;
            } else {
                println!("{}\t{}", created.alias, created.id);
            }
        }
        Command::Resolve { alias } => {
            let alias = Alias::new(alias).map_err(StoreError::from)?;
            let url = store.resolve(&alias).await?;
            if cli.json {
                print_json(&ResolveOutput {
                    alias: alias.as_str(),
                    url: &url,
                })?;
            } else {
                println!("{url}");
            }
        }
        Command::Delete { alias } => {
            let alias = Alias::new(alias).map_err(StoreError::from)?;
            store.delete(&alias).await?;
            if cli.json {
                print_json(&DeleteOutput {
                    alias: alias.as_str(),
                    deleted: true,
                })?;
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
