mod entity;
mod error;
mod source;


pub use entity::{CatalogEntity, Claim, DataValue, Snak};
pub use error::HarvestError;
pub use source::{EntitySource, JsonEntitySource};

use crate::config::CatalogConfig;
use crate::sharder::VersionMap;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Download date claimed by a dataset entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadDate {
    Known(NaiveDate),
    Unknown,
}

/// Result of one harvesting pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestOutcome {
    /// Archives id -> URL of the newest dataset, in catalog order
    pub latest_versions: VersionMap,
    /// Every dataset known not to be the newest of its source
    pub older_versions: BTreeSet<String>,
}

/// Walks a catalog and picks the newest dataset of each source
pub struct Harvester<'a, S: EntitySource> {
    source: &'a S,
    catalog: &'a CatalogConfig,
}

impl<'a, S: EntitySource> Harvester<'a, S> {
    pub fn new(source: &'a S, catalog: &'a CatalogConfig) -> Self {
        Self { source, catalog }
    }

    pub fn list_sources(&self, catalog: &CatalogEntity) -> Vec<String> {
        catalog.item_ids(&self.catalog.source_property)
    }

    pub fn list_datasets(&self, source: &CatalogEntity) -> Vec<String> {
        source.item_ids(&self.catalog.dataset_property)
    }

    pub fn archives_id(&self, source: &CatalogEntity) -> Result<String, HarvestError> {
        source
            .first_string(&self.catalog.archives_id_property)
            .map(str::to_string)
            .ok_or_else(|| HarvestError::MissingClaim {
                entity: source.id.clone(),
                property: self.catalog.archives_id_property.clone(),
            })
    }

    pub fn download_date(&self, dataset: &CatalogEntity) -> Result<DownloadDate, HarvestError> {
        let value = dataset
            .first_string(&self.catalog.download_date_property)
            .ok_or_else(|| HarvestError::MissingClaim {
                entity: dataset.id.clone(),
                property: self.catalog.download_date_property.clone(),
            })?;

        if value == self.catalog.unknown_date {
            return Ok(DownloadDate::Unknown);
        }

        NaiveDate::parse_from_str(value, &self.catalog.date_format)
            .map(DownloadDate::Known)
            .map_err(|_| HarvestError::InvalidDate {
                entity: dataset.id.clone(),
                value: value.to_string(),
            })
    }

    /// The last URL claim pointing into the archives bucket
    pub fn archives_url(&self, dataset: &CatalogEntity) -> Option<String> {
        dataset
            .strings(&self.catalog.url_property)
            .filter(|url| url.contains(&self.catalog.archives_url_prefix))
            .last()
            .map(str::to_string)
    }

    /// Run a full pass over the catalog.
    ///
    /// Datasets already in `older_versions` are never fetched. A dataset
    /// becomes the latest of its source only with a date strictly after the
    /// current best (starting from the Unix epoch); everything it displaces,
    /// and every undated dataset, joins the older set.
    pub fn harvest(
        &self,
        older_versions: BTreeSet<String>,
    ) -> Result<HarvestOutcome, HarvestError> {
        let catalog = self.source.entity(&self.catalog.catalog_id)?;
        let sources = self.list_sources(&catalog);
        info!(
            catalog = %self.catalog.catalog_id,
            api = %self.catalog.api_url,
            sources = sources.len(),
            known_older = older_versions.len(),
            "harvesting latest versions"
        );

        let mut older_versions = older_versions;
        let mut latest_versions = VersionMap::new();

        for source_id in sources {
            let source = self.source.entity(&source_id)?;
            let archives_id = self.archives_id(&source)?;

            let candidates: BTreeSet<String> = self
                .list_datasets(&source)
                .into_iter()
                .filter(|dataset| !older_versions.contains(dataset))
                .collect();
            if candidates.is_empty() {
                debug!(source = %source_id, "no new datasets");
                continue;
            }

            let mut latest_date = DateTime::<Utc>::UNIX_EPOCH.date_naive();
            let mut latest: Option<CatalogEntity> = None;

            for dataset_id in candidates {
                let dataset = self.source.entity(&dataset_id)?;
                match self.download_date(&dataset)? {
                    DownloadDate::Known(date) if date > latest_date => {
                        if let Some(previous) = latest.replace(dataset) {
                            older_versions.insert(previous.id);
                        }
                        latest_date = date;
                    }
                    _ => {
                        older_versions.insert(dataset_id);
                    }
                }
            }

            let Some(dataset) = latest else {
                debug!(source = %source_id, "no dated dataset");
                continue;
            };
            match self.archives_url(&dataset) {
                Some(url) => {
                    debug!(source = %source_id, %archives_id, %latest_date, "latest dataset");
                    latest_versions.insert(archives_id, url);
                }
                None => warn!(source = %source_id, dataset = %dataset.id, "no archived URL"),
            }
        }

        info!(
            latest = latest_versions.len(),
            older = older_versions.len(),
            "harvest complete"
        );

        Ok(HarvestOutcome {
            latest_versions,
            older_versions,
        })
    }
}
