use crate::harvester::HarvestError;
use crate::sharder::ShardError;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Harvest(#[from] HarvestError),

    #[error(transparent)]
    Shard(#[from] ShardError),

    #[error("Failed to write matrix: {0}")]
    WriteFailed(String),
}
