// Public API exports
pub mod config;
pub mod harvester;
pub mod pipeline;
pub mod security;
pub mod sharder;
pub mod store;

// Re-export main types for convenience
pub use config::{CatalogConfig, Config, ConfigError, LATEST_VERSIONS_MATRIX_FILE, Platform};

pub use sharder::{
    Batcher, GITHUB_MAX_JOBS, JobGroup, JobMatrix, JobRecord, LEGACY_MAX_JOBS, MatrixEncoding,
    MaxJobs, ShardError, VersionMap, shard, shard_with_encoding,
};

pub use harvester::{
    CatalogEntity, DownloadDate, EntitySource, HarvestError, HarvestOutcome, Harvester,
    JsonEntitySource,
};

pub use pipeline::{HarvestReport, HarvestRequest, MatrixSettings, PipelineError};
pub use security::PathSanitizer;
pub use store::{DataStore, StoreError};
