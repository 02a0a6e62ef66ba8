use anyhow::Context;
use clap::Parser;
use registry_etl::config::settings::Settings;
use registry_etl::core::Storage;
use registry_etl::utils::logger;
use registry_etl::{
    CliConfig, Command, LocalStorage, MemoryStore, RegistryEngine, RegistryError, ResolvedConfig,
};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting registry-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path))?,
        None => Settings::default(),
    };
    let config = ResolvedConfig::resolve(&cli, &settings);

    let store = load_store(&config.store_path)?;
    let engine = RegistryEngine::new(store);
    let output = LocalStorage::new(config.output_path.clone());

    match run(&cli.command, &engine, &output).await {
        Ok(mutated) => {
            if mutated {
                save_store(engine.store(), &config.store_path).await?;
            }
        }
        Err(e) => {
            tracing::error!("❌ Command failed: {}", e);
            eprintln!("❌ {}", e);
            if let RegistryError::CommitFailed { stats, .. } = &e {
                // the batch was rolled back; counts describe row-level
                // validation only
                eprintln!(
                    "   advisory counts: successful: {}, failed: {}, skipped: {}",
                    stats.successful, stats.failed, stats.skipped
                );
            }
            std::process::exit(if e.is_client_error() { 2 } else { 1 });
        }
    }

    Ok(())
}

/// Runs one subcommand; returns whether the registry was mutated and the
/// snapshot needs rewriting.
async fn run(
    command: &Command,
    engine: &RegistryEngine<MemoryStore>,
    output: &LocalStorage,
) -> registry_etl::Result<bool> {
    match command {
        Command::Import { dataset, file } => {
            let filename = Path::new(file)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(file.as_str());
            let bytes = std::fs::read(file)?;

            let report = engine.import_dataset(dataset, filename, &bytes).await?;

            println!("✅ {}", report.message);
            println!(
                "   successful: {}, failed: {}, skipped: {}",
                report.stats.successful, report.stats.failed, report.stats.skipped
            );
            for error in &report.stats.errors {
                println!("   - {}", error);
            }
            Ok(true)
        }
        Command::Export { dataset } => {
            let csv_text = engine.export_dataset(dataset).await?;
            let filename = format!("{}_export.csv", dataset.replace('-', "_"));
            output.write_file(&filename, csv_text.as_bytes()).await?;
            println!("✅ Export completed: {}", filename);
            Ok(false)
        }
        Command::Template { dataset } => {
            let csv_text = engine.template_dataset(dataset)?;
            let filename = format!("{}_template.csv", dataset.replace('-', "_"));
            output.write_file(&filename, csv_text.as_bytes()).await?;
            println!("✅ Template written: {}", filename);
            Ok(false)
        }
        Command::Stats => {
            let report = engine.statistics().await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(false)
        }
        Command::Services => {
            let services = engine.emergency_services().await?;
            println!("{}", serde_json::to_string_pretty(&services)?);
            Ok(false)
        }
        Command::Clear { dataset } => {
            let removed = engine.clear_dataset(dataset).await?;
            println!("✅ Cleared {} records from {}", removed, dataset);
            Ok(true)
        }
    }
}

fn load_store(store_path: &str) -> anyhow::Result<MemoryStore> {
    if Path::new(store_path).exists() {
        let snapshot = std::fs::read_to_string(store_path)
            .with_context(|| format!("failed to read store snapshot {}", store_path))?;
        let store = MemoryStore::from_json(&snapshot)
            .with_context(|| format!("store snapshot {} is not valid", store_path))?;
        tracing::debug!("Loaded registry snapshot from {}", store_path);
        Ok(store)
    } else {
        tracing::debug!("No snapshot at {}, starting empty", store_path);
        Ok(MemoryStore::new())
    }
}

async fn save_store(store: &MemoryStore, store_path: &str) -> anyhow::Result<()> {
    let snapshot = store.to_json().await?;
    if let Some(parent) = Path::new(store_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(store_path, snapshot)
        .with_context(|| format!("failed to write store snapshot {}", store_path))?;
    tracing::debug!("Saved registry snapshot to {}", store_path);
    Ok(())
}
