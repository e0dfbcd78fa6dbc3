use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
        }
    }
}

/// One searchable plugin record. Immutable once produced by a catalog source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub description: String,
    pub authors: Vec<Author>,
    /// Absolute install link, resolved against the catalog's base URL.
    pub url: String,
}

impl CatalogEntry {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        authors: Vec<Author>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            authors,
            url: url.into(),
        }
    }

    /// Author names joined for display, e.g. `"Alice, Bob"`.
    pub fn author_names(&self) -> String {
        self.authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Plugin-specific block of a raw manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct VendettaInfo {
    #[serde(default)]
    pub icon: Option<String>,
    /// Link to the plugin source, usually relative to the catalog.
    pub original: String,
}

/// A manifest exactly as served by the catalog endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawManifest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub hash: Option<String>,
    pub vendetta: VendettaInfo,
}
