use super::{MatrixEncoding, ShardError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::num::NonZeroUsize;

/// Source identifier -> latest download URL, in insertion order
pub type VersionMap = IndexMap<String, String>;

/// One `{id, url}` entry of a job group
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub url: String,
}

impl JobRecord {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// A single matrix entry; `data` carries the encoded records of one CI job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobGroup {
    pub data: String,
}

/// The `strategy.matrix` payload consumed by GitHub Actions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMatrix {
    pub include: Vec<JobGroup>,
}

impl JobMatrix {
    /// Number of job groups
    pub fn len(&self) -> usize {
        self.include.len()
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty()
    }

    /// Decode every group back into its records, group order preserved
    pub fn records(&self, encoding: MatrixEncoding) -> Result<Vec<Vec<JobRecord>>, ShardError> {
        self.include
            .iter()
            .map(|group| encoding.decode(&group.data))
            .collect()
    }

    /// Total number of records across all groups
    pub fn record_count(&self, encoding: MatrixEncoding) -> Result<usize, ShardError> {
        Ok(self.records(encoding)?.iter().map(Vec::len).sum())
    }

    /// Check that the decoded records are exactly the entries of `version_map`,
    /// each once. Entries are compared in their encoded form. Returns the
    /// number of records checked.
    pub fn verify_against(
        &self,
        version_map: &VersionMap,
        encoding: MatrixEncoding,
    ) -> Result<usize, ShardError> {
        let mut expected: HashMap<(String, String), usize> = HashMap::new();
        for (id, url) in version_map {
            let key = (
                encoding.wire_value(id).into_owned(),
                encoding.wire_value(url).into_owned(),
            );
            *expected.entry(key).or_default() += 1;
        }

        let mut checked = 0;
        for record in self.records(encoding)?.into_iter().flatten() {
            let key = (record.id, record.url);
            match expected.get_mut(&key) {
                Some(remaining) if *remaining > 0 => *remaining -= 1,
                Some(_) => {
                    return Err(ShardError::VerificationFailed(format!(
                        "{} appears more than once",
                        key.0
                    )));
                }
                None => {
                    return Err(ShardError::VerificationFailed(format!(
                        "{} is not in the version map",
                        key.0
                    )));
                }
            }
            checked += 1;
        }

        if checked != version_map.len() {
            return Err(ShardError::VerificationFailed(format!(
                "matrix covers {} of {} entries",
                checked,
                version_map.len()
            )));
        }
        Ok(checked)
    }
}

/// Upper bound on the number of job groups; never zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MaxJobs(NonZeroUsize);

impl MaxJobs {
    pub fn new(max_jobs: usize) -> Result<Self, ShardError> {
        NonZeroUsize::new(max_jobs)
            .map(Self)
            .ok_or(ShardError::ZeroMaxJobs)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}
