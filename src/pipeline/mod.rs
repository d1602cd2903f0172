mod error;


pub use error::PipelineError;

use crate::config::{Config, LATEST_VERSIONS_MATRIX_FILE, Platform};
use crate::harvester::{EntitySource, Harvester};
use crate::sharder::{JobMatrix, MatrixEncoding, MaxJobs, ShardError, VersionMap, shard_with_encoding};
use crate::store::{DataStore, read_json, write_json};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Job limit and wire format of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixSettings {
    pub max_jobs: MaxJobs,
    pub encoding: MatrixEncoding,
}

impl MatrixSettings {
    /// Command-line values first, then the config file
    pub fn resolve(
        config: &Config,
        max_jobs: Option<usize>,
        platform: Option<Platform>,
        encoding: Option<MatrixEncoding>,
    ) -> Result<Self, ShardError> {
        Ok(Self {
            max_jobs: config.resolve_max_jobs(max_jobs, platform)?,
            encoding: encoding.unwrap_or(config.encoding),
        })
    }
}

/// File names used by a harvest run, relative to the data directory
#[derive(Debug, Clone)]
pub struct HarvestRequest {
    pub older_versions_file: String,
    pub latest_versions_file: String,
    pub settings: MatrixSettings,
    pub verify: bool,
}

#[derive(Debug, Clone)]
pub struct HarvestReport {
    pub latest_versions: VersionMap,
    pub older_count: usize,
    pub matrix: JobMatrix,
    pub matrix_path: PathBuf,
}

/// Harvest into `store`: older versions and latest URLs are rewritten, then
/// the matrix is built from the latest URLs as read back from disk and saved
/// as `latest_versions.json`.
pub fn harvest_to_store<S: EntitySource>(
    store: &DataStore,
    entities: &S,
    config: &Config,
    request: &HarvestRequest,
) -> Result<HarvestReport, PipelineError> {
    let start_time = Instant::now();

    let older_versions = store.load_older_versions(&request.older_versions_file)?;
    let outcome = Harvester::new(entities, &config.catalog).harvest(older_versions)?;

    store.save_older_versions(&request.older_versions_file, &outcome.older_versions)?;
    store.save_version_map(&request.latest_versions_file, &outcome.latest_versions)?;

    let latest_versions = store.load_version_map(&request.latest_versions_file)?;
    let settings = request.settings;
    let matrix = shard_with_encoding(&latest_versions, settings.max_jobs, settings.encoding)?;
    if request.verify {
        matrix.verify_against(&latest_versions, settings.encoding)?;
    }

    let matrix_path = store.save_matrix(LATEST_VERSIONS_MATRIX_FILE, &matrix)?;

    info!(
        path = %matrix_path.display(),
        sources = latest_versions.len(),
        older = outcome.older_versions.len(),
        jobs = matrix.len(),
        elapsed_secs = start_time.elapsed().as_secs_f64(),
        "✓ harvest complete"
    );

    Ok(HarvestReport {
        latest_versions,
        older_count: outcome.older_versions.len(),
        matrix,
        matrix_path,
    })
}

/// Load a version map file and shard it
pub fn shard_file(
    input: &Path,
    settings: MatrixSettings,
    verify: bool,
) -> Result<(VersionMap, JobMatrix), PipelineError> {
    let version_map: VersionMap = read_json(input)?;
    let matrix = shard_with_encoding(&version_map, settings.max_jobs, settings.encoding)?;

    if verify {
        let checked = matrix.verify_against(&version_map, settings.encoding)?;
        info!(entries = checked, jobs = matrix.len(), "verified job matrix");
    }

    Ok((version_map, matrix))
}

/// Write the matrix to `output`, or as one line to `fallback` when no path is given
pub fn write_matrix(
    matrix: &JobMatrix,
    output: Option<&Path>,
    fallback: &mut impl Write,
) -> Result<(), PipelineError> {
    match output {
        Some(path) => {
            write_json(path, matrix)?;
            info!(path = %path.display(), jobs = matrix.len(), "✓ wrote job matrix");
        }
        None => {
            let json = serde_json::to_string(matrix)
                .map_err(|e| PipelineError::WriteFailed(e.to_string()))?;
            writeln!(fallback, "{}", json).map_err(|e| PipelineError::WriteFailed(e.to_string()))?;
        }
    }
    Ok(())
}
