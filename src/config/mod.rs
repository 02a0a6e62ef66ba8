pub mod settings;

use crate::domain::ports::ConfigProvider;
use clap::{Parser, Subcommand};
use settings::Settings;

const DEFAULT_STORE_PATH: &str = "./registry.json";
const DEFAULT_OUTPUT_PATH: &str = "./output";

#[derive(Debug, Clone, Parser)]
#[command(name = "registry-etl")]
#[command(about = "Import/export engine for emergency service registries")]
pub struct CliConfig {
    /// Path of the JSON registry snapshot kept between runs.
    #[arg(long)]
    pub store_path: Option<String>,

    /// Directory export and template files are written to.
    #[arg(long)]
    pub output_path: Option<String>,

    /// Optional TOML settings file; CLI flags take precedence.
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Import a delimited-text file into one dataset.
    Import {
        #[arg(long)]
        dataset: String,
        file: String,
    },
    /// Export one dataset as CSV.
    Export {
        #[arg(long)]
        dataset: String,
    },
    /// Write a header-only CSV template for one dataset.
    Template {
        #[arg(long)]
        dataset: String,
    },
    /// Print aggregate statistics and location distribution as JSON.
    Stats,
    /// Print the combined emergency-services listing as JSON.
    Services,
    /// Delete every record of one dataset.
    Clear {
        #[arg(long)]
        dataset: String,
    },
}

/// CLI flags merged over file settings, with built-in defaults as the
/// final fallback.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub store_path: String,
    pub output_path: String,
}

impl ResolvedConfig {
    pub fn resolve(cli: &CliConfig, settings: &Settings) -> Self {
        Self {
            store_path: cli
                .store_path
                .clone()
                .or_else(|| settings.store_path.clone())
                .unwrap_or_else(|| DEFAULT_STORE_PATH.to_string()),
            output_path: cli
                .output_path
                .clone()
                .or_else(|| settings.output_path.clone())
                .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string()),
        }
    }
}

impl ConfigProvider for ResolvedConfig {
    fn store_path(&self) -> &str {
        &self.store_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}
