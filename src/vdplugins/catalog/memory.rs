use super::CatalogSource;
use crate::error::{Result, VdError};
use crate::model::CatalogEntry;

/// Fixed, already-normalized entries. Used by tests and embedders.
pub struct InMemoryCatalog {
    entries: Vec<CatalogEntry>,
    failure: Option<String>,
}

impl InMemoryCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries,
            failure: None,
        }
    }

    /// A source whose every load fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

impl CatalogSource for InMemoryCatalog {
    fn load(&self) -> Result<Vec<CatalogEntry>> {
        match &self.failure {
            Some(message) => Err(VdError::CatalogLoad(message.clone())),
            None => Ok(self.entries.clone()),
        }
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
