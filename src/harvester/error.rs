use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Entity {entity} has no value for property {property}")]
    MissingClaim { entity: String, property: String },

    #[error("Entity {entity} has an invalid download date: {value}")]
    InvalidDate { entity: String, value: String },

    #[error("Failed to parse entity document: {0}")]
    ParseFailed(String),
}
