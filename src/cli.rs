use clap::{Args, Parser, Subcommand};
use harvest_matrix::{MatrixEncoding, Platform};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "harvest-matrix",
    version,
    about = "Harvest latest dataset versions and shard them into a CI job matrix"
)]
pub struct Cli {
    /// JSON config file (job limits, encoding, catalog properties)
    #[arg(long, global = true, env = "HARVEST_MATRIX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Shard a version map JSON file into a job matrix
    Shard(ShardArgs),
    /// Pick the latest dataset per source from an entity dump, then shard
    Harvest(HarvestArgs),
}

#[derive(Args, Debug, Clone)]
pub struct MatrixArgs {
    /// Maximum number of jobs in the matrix
    #[arg(long, env = "HARVEST_MATRIX_MAX_JOBS")]
    pub max_jobs: Option<usize>,

    /// Take the job limit from a platform quota
    #[arg(long, value_enum, conflicts_with = "max_jobs")]
    pub platform: Option<Platform>,

    /// Wire format of each job's data string
    #[arg(long, value_enum)]
    pub encoding: Option<MatrixEncoding>,
}

#[derive(Args, Debug)]
pub struct ShardArgs {
    /// Version map file: {"<source id>": "<url>", ...}
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Decode the generated matrix and check every entry is present once
    #[arg(long)]
    pub verify: bool,

    #[command(flatten)]
    pub matrix: MatrixArgs,
}

#[derive(Args, Debug)]
pub struct HarvestArgs {
    /// Entity dump shaped like a wbgetentities response
    #[arg(short, long)]
    pub entities: PathBuf,

    /// Data path
    #[arg(short, long, default_value = "./data/")]
    pub data_path: PathBuf,

    /// Name of the older versions file. Overwritten if it exists.
    #[arg(short, long, default_value = "older_versions.json")]
    pub older_versions_file: String,

    /// Name of the latest urls file. Overwritten if it exists.
    #[arg(short, long, default_value = "latest_urls.json")]
    pub latest_versions_file: String,

    /// Decode the generated matrix and check every entry is present once
    #[arg(long)]
    pub verify: bool,

    #[command(flatten)]
    pub matrix: MatrixArgs,
}
