use super::{JobRecord, ShardError};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Wire format of a job group's `data` string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MatrixEncoding {
    /// Compact JSON objects concatenated, one space at each `}{` boundary
    #[default]
    Legacy,
    /// A compact JSON array of objects
    JsonArray,
}

impl MatrixEncoding {
    pub fn encode(self, records: &[JobRecord]) -> Result<String, ShardError> {
        match self {
            MatrixEncoding::Legacy => {
                let mut data = String::new();
                for record in records {
                    let fragment = serde_json::to_string(record)
                        .map_err(|e| ShardError::EncodeFailed(e.to_string()))?;
                    data.push_str(&fragment);
                }
                Ok(data.replace("}{", "} {"))
            }
            MatrixEncoding::JsonArray => serde_json::to_string(records)
                .map_err(|e| ShardError::EncodeFailed(e.to_string())),
        }
    }

    /// A string value as it reads back after encoding.
    ///
    /// The legacy repair is textual, so a `}{` inside an id or URL also
    /// gains a space.
    pub fn wire_value(self, value: &str) -> Cow<'_, str> {
        match self {
            MatrixEncoding::Legacy if value.contains("}{") => {
                Cow::Owned(value.replace("}{", "} {"))
            }
            _ => Cow::Borrowed(value),
        }
    }

    pub fn decode(self, data: &str) -> Result<Vec<JobRecord>, ShardError> {
        match self {
            // Whitespace-separated values, read as a stream
            MatrixEncoding::Legacy => serde_json::Deserializer::from_str(data)
                .into_iter::<JobRecord>()
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ShardError::MalformedData(e.to_string())),
            MatrixEncoding::JsonArray => {
                serde_json::from_str(data).map_err(|e| ShardError::MalformedData(e.to_string()))
            }
        }
    }
}
