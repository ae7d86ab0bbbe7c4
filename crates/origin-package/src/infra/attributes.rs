//! Extended-attribute access for origin-package lookups.

use std::path::Path;

use crate::domain::errors::AttributeError;

/// Read access to the attribute recording a file's origin package.
pub trait AttributeStore {
    /// Return the package file name recorded for `path`, or `None` when nothing is recorded.
    fn origin_package(&self, path: &Path) -> Result<Option<String>, AttributeError>;
}

/// Reads the origin package from a named extended attribute.
#[derive(Debug, Clone)]
pub struct XattrStore {
    name: String,
}

impl XattrStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl AttributeStore for XattrStore {
    fn origin_package(&self, path: &Path) -> Result<Option<String>, AttributeError> {
        let raw = xattr::get(path, &self.name).map_err(|source| AttributeError::Read {
            name: self.name.clone(),
            source,
        })?;
        let Some(raw) = raw else {
            return Ok(None);
        };

        let value =
            String::from_utf8(raw).map_err(|_| AttributeError::InvalidValue(self.name.clone()))?;
        // Values written by C tooling may carry their terminator.
        let value = value.trim_end_matches('\0').trim();
        if value.is_empty() {
            Ok(None)
        } else {
            Ok(Some(value.to_owned()))
        }
    }
}
