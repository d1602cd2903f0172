mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, HarvestArgs, MatrixArgs, ShardArgs};
use harvest_matrix::pipeline::{
    HarvestRequest, MatrixSettings, harvest_to_store, shard_file, write_matrix,
};
use harvest_matrix::{Config, DataStore, JsonEntitySource};
use std::fs;
use std::io;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Command::Shard(args) => run_shard(&config, args),
        Command::Harvest(args) => run_harvest(&config, args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn matrix_settings(config: &Config, args: &MatrixArgs) -> Result<MatrixSettings> {
    MatrixSettings::resolve(config, args.max_jobs, args.platform, args.encoding)
        .context("Invalid job limit")
}

fn run_shard(config: &Config, args: ShardArgs) -> Result<()> {
    let settings = matrix_settings(config, &args.matrix)?;

    let (_, matrix) = shard_file(&args.input, settings, args.verify)
        .context(format!("Failed to shard version map: {}", args.input.display()))?;

    write_matrix(&matrix, args.output.as_deref(), &mut io::stdout().lock())
        .context("Failed to write matrix")?;

    Ok(())
}

fn run_harvest(config: &Config, args: HarvestArgs) -> Result<()> {
    let settings = matrix_settings(config, &args.matrix)?;

    let store = DataStore::open(&args.data_path)
        .context(format!("Failed to open data path: {}", args.data_path.display()))?;

    let dump = fs::read_to_string(&args.entities)
        .context(format!("Failed to read entity dump: {}", args.entities.display()))?;
    let entities = JsonEntitySource::from_json(&dump).context("Failed to parse entity dump")?;
    info!(entities = entities.len(), "loaded entity dump");

    let request = HarvestRequest {
        older_versions_file: args.older_versions_file,
        latest_versions_file: args.latest_versions_file,
        settings,
        verify: args.verify,
    };
    harvest_to_store(&store, &entities, config, &request).context("Harvest failed")?;

    Ok(())
}
