use anyhow::Result;
use clap::{Parser, Subcommand};
use model::{Metric, Region};
use std::path::PathBuf;
use std::time::Duration;

pub mod commands;

use crate::config::{AppConfig, DEFAULT_BIND_ADDRESS, DEFAULT_DATA_PATH};
use commands::{check, serve};

#[derive(Parser)]
#[command(name = "pandash")]
#[command(about = "Pandemic statistics dashboard served over HTTP")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the dashboard web server
    Serve {
        /// Path to the country-level CSV snapshot
        ///
        /// The header must contain at least: Country/Region, WHO Region,
        /// Confirmed, Deaths, Recovered, Active, New cases, New deaths.
        #[arg(short, long, env = "PANDASH_DATA_PATH", default_value = DEFAULT_DATA_PATH)]
        data_path: PathBuf,

        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 127.0.0.1:8050, 0.0.0.0:3000)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = DEFAULT_BIND_ADDRESS)]
        bind_address: String,

        /// Metric selected when the page first loads
        #[arg(long, env = "PANDASH_DEFAULT_METRIC", default_value = "Confirmed")]
        default_metric: Metric,

        /// Region selected when the page first loads (`Global` for all)
        #[arg(long, env = "PANDASH_DEFAULT_REGION", default_value = "Global")]
        default_region: Region,

        /// Seconds an assembled dashboard stays cached
        #[arg(long, env = "PANDASH_CACHE_TTL_SECS", default_value_t = 300)]
        cache_ttl_secs: u64,
    },
    /// Load the dataset, print a summary and exit
    Check {
        /// Path to the country-level CSV snapshot
        #[arg(short, long, env = "PANDASH_DATA_PATH", default_value = DEFAULT_DATA_PATH)]
        data_path: PathBuf,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                data_path,
                bind_address,
                default_metric,
                default_region,
                cache_ttl_secs,
            } => {
                let config = AppConfig {
                    data_path,
                    bind_address,
                    default_metric,
                    default_region,
                    cache_ttl: Duration::from_secs(cache_ttl_secs),
                    ..AppConfig::default()
                };
                serve(&config).await?;
            }
            Commands::Check { data_path } => {
                check(&data_path)?;
            }
        }
        Ok(())
    }
}
