use super::{CatalogEntity, HarvestError};
use serde::Deserialize;
use std::collections::HashMap;

/// Anything that can resolve an entity id to its document
pub trait EntitySource {
    fn entity(&self, id: &str) -> Result<CatalogEntity, HarvestError>;
}

/// Entities held in memory, typically loaded from a `wbgetentities` dump
#[derive(Debug, Default)]
pub struct JsonEntitySource {
    entities: HashMap<String, CatalogEntity>,
}

#[derive(Deserialize)]
struct EntitiesDocument {
    entities: HashMap<String, CatalogEntity>,
}

impl JsonEntitySource {
    pub fn from_entities(entities: impl IntoIterator<Item = CatalogEntity>) -> Self {
        Self {
            entities: entities
                .into_iter()
                .map(|entity| (entity.id.clone(), entity))
                .collect(),
        }
    }

    /// Parse a document shaped like `{"entities": {"Q6": {...}, ...}}`
    pub fn from_json(json: &str) -> Result<Self, HarvestError> {
        let document: EntitiesDocument =
            serde_json::from_str(json).map_err(|e| HarvestError::ParseFailed(e.to_string()))?;
        Ok(Self {
            entities: document.entities,
        })
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntitySource for JsonEntitySource {
    fn entity(&self, id: &str) -> Result<CatalogEntity, HarvestError> {
        self.entities
            .get(id)
            .cloned()
            .ok_or_else(|| HarvestError::EntityNotFound(id.to_string()))
    }
}
