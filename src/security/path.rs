use crate::store::StoreError;
use std::path::{Component, Path};

pub struct PathSanitizer;

impl PathSanitizer {
    /// Normalize a file name that will be joined onto the data directory.
    ///
    /// Rejects:
    /// - Absolute paths (/etc/passwd)
    /// - Parent directory traversal (../)
    /// - Names with no normal component left (".", "./.")
    ///
    /// Nested relative names such as `runs/older.json` are kept.
    pub fn sanitize(raw_name: &str) -> Result<String, StoreError> {
        if raw_name.trim().is_empty() {
            return Err(StoreError::InvalidFileName("Empty file name".to_string()));
        }

        let mut parts = Vec::new();
        for component in Path::new(raw_name).components() {
            let part = match component {
                Component::Normal(part) => part,
                Component::CurDir => continue,
                Component::Prefix(_) | Component::RootDir => {
                    return Err(StoreError::InvalidFileName(format!(
                        "Absolute path not allowed: {}",
                        raw_name
                    )));
                }
                Component::ParentDir => {
                    return Err(StoreError::InvalidFileName(format!(
                        "Parent directory traversal not allowed: {}",
                        raw_name
                    )));
                }
            };

            let part = part.to_str().ok_or_else(|| {
                StoreError::InvalidFileName(format!("Invalid UTF-8 in file name: {:?}", part))
            })?;
            parts.push(part);
        }

        if parts.is_empty() {
            return Err(StoreError::InvalidFileName(format!(
                "No valid components: {}",
                raw_name
            )));
        }

        Ok(parts.join("/"))
    }
}
