use super::{parse_catalog, CatalogSource};
use crate::error::{Result, VdError};
use crate::model::CatalogEntry;
use reqwest::Url;
use std::fs;
use std::path::PathBuf;

/// Catalog JSON read from disk. Links resolve against `base`, which should be
/// the URL the file was originally downloaded from.
pub struct FileCatalog {
    path: PathBuf,
    base: Url,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>, base: &str) -> Result<Self> {
        let base = Url::parse(base)
            .map_err(|e| VdError::CatalogLoad(format!("Invalid base URL {}: {}", base, e)))?;
        Ok(Self {
            path: path.into(),
            base,
        })
    }
}

impl CatalogSource for FileCatalog {
    fn load(&self) -> Result<Vec<CatalogEntry>> {
        let body = fs::read_to_string(&self.path).map_err(|e| {
            VdError::CatalogLoad(format!("Cannot read {}: {}", self.path.display(), e))
        })?;
        parse_catalog(&body, &self.base)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
