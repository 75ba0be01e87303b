//! `dbm`: inspection tool for the client contract layer.

pub mod handlers;
pub mod models;

use crate::handlers::{codec, registry};
use crate::models::args::{Cli, Commands};

use anyhow::{Context, Result};
use clap::Parser;
use dbm::domain::config::ClientConfig;
use dbm::kernel::config::load_config;
use dbm_logger::{LevelFilter, Logger};
use std::io::{self, Write};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg: ClientConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;

    let level = match cli.verbose {
        0 => cfg
            .logging
            .level
            .parse::<LevelFilter>()
            .with_context(|| format!("Invalid logging.level `{}`", cfg.logging.level))?,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let mut logger = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level).json(cfg.logging.json);
    if let Some(filter) = cfg.logging.filter {
        logger = logger.env_filter(filter);
    }
    let _log = logger.init()?;

    let mut out = io::stdout().lock();
    match cli.command {
        Commands::Decode { vocabulary, value } => codec::decode(&mut out, vocabulary, &value)?,
        Commands::Encode { vocabulary, ordinal } => codec::encode(&mut out, vocabulary, ordinal)?,
        Commands::Vocab { vocabulary } => codec::table(&mut out, vocabulary)?,
        Commands::Exports {} => registry::exports(&mut out)?,
    }
    out.flush()?;

    Ok(())
}
