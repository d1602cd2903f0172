pub mod batcher;
pub mod encoding;
pub mod error;
pub mod types;


pub use batcher::Batcher;
pub use encoding::MatrixEncoding;
pub use error::ShardError;
pub use types::{JobGroup, JobMatrix, JobRecord, MaxJobs, VersionMap};

use tracing::debug;

/// GitHub Actions limit on jobs generated by one matrix
pub const GITHUB_MAX_JOBS: usize = 256;

/// Job limit used by the first generation of the workflow
pub const LEGACY_MAX_JOBS: usize = 60;

/// Shard a version map into the legacy space-separated matrix format
pub fn shard(version_map: &VersionMap, max_jobs: MaxJobs) -> Result<JobMatrix, ShardError> {
    shard_with_encoding(version_map, max_jobs, MatrixEncoding::Legacy)
}

/// Shard a version map into at most `max_jobs` balanced job groups.
///
/// Entries are partitioned contiguously in insertion order. Each group is
/// then drained from its back, so records inside a group come out reversed.
pub fn shard_with_encoding(
    version_map: &VersionMap,
    max_jobs: MaxJobs,
    encoding: MatrixEncoding,
) -> Result<JobMatrix, ShardError> {
    let entries: Vec<(&String, &String)> = version_map.iter().collect();
    let batcher = Batcher::new(max_jobs);

    let mut include = Vec::with_capacity(batcher.batch_count(entries.len()));
    for batch in batcher.split(&entries) {
        let mut pending = batch.to_vec();
        let mut records = Vec::with_capacity(pending.len());
        while let Some((id, url)) = pending.pop() {
            records.push(JobRecord::new(id.as_str(), url.as_str()));
        }

        include.push(JobGroup {
            data: encoding.encode(&records)?,
        });
    }

    debug!(
        entries = entries.len(),
        groups = include.len(),
        max_jobs = max_jobs.get(),
        ?encoding,
        "sharded version map"
    );

    Ok(JobMatrix { include })
}
