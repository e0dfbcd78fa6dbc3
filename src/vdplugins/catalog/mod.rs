//! # Catalog Layer
//!
//! A catalog is an ordered collection of [`CatalogEntry`] values. Where it comes
//! from is abstracted behind [`CatalogSource`]:
//!
//! - [`http::HttpCatalog`]: the hosted catalog (production)
//! - [`file::FileCatalog`]: the same JSON read from disk
//! - [`memory::InMemoryCatalog`]: fixed entries for tests
//!
//! Every source that reads the raw JSON goes through [`normalize`], which
//! reverses the list (newest-appended plugins first) and resolves each
//! plugin's `vendetta.original` link against the catalog's base URL. That
//! reversed order is what search treats as "original order".
//!
//! [`CatalogResource`] runs a source on a background thread and exposes the
//! three load states (pending, ready, errored) without blocking the caller.

use crate::error::{Result, VdError};
use crate::model::{CatalogEntry, RawManifest};
use reqwest::Url;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

pub mod file;
pub mod http;
pub mod memory;

/// Anything that can produce a normalized catalog.
pub trait CatalogSource: Send + Sync {
    /// Load the full catalog. Either every entry or an error, never a partial list.
    fn load(&self) -> Result<Vec<CatalogEntry>>;

    /// Human readable origin, used in logs.
    fn describe(&self) -> String;
}

impl<T: CatalogSource + ?Sized> CatalogSource for Box<T> {
    fn load(&self) -> Result<Vec<CatalogEntry>> {
        (**self).load()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Turn raw manifests into catalog entries: reverse, then resolve links against `base`.
pub fn normalize(mut raw: Vec<RawManifest>, base: &Url) -> Result<Vec<CatalogEntry>> {
    raw.reverse();
    raw.into_iter()
        .map(|manifest| {
            let url = base.join(&manifest.vendetta.original).map_err(|e| {
                VdError::CatalogLoad(format!(
                    "Bad link {:?} for plugin {}: {}",
                    manifest.vendetta.original, manifest.name, e
                ))
            })?;
            Ok(CatalogEntry {
                name: manifest.name,
                description: manifest.description,
                authors: manifest.authors,
                url: url.to_string(),
            })
        })
        .collect()
}

/// Parse the catalog JSON body and normalize it.
pub fn parse_catalog(body: &str, base: &Url) -> Result<Vec<CatalogEntry>> {
    let raw: Vec<RawManifest> = serde_json::from_str(body)
        .map_err(|e| VdError::CatalogLoad(format!("Malformed catalog: {}", e)))?;
    normalize(raw, base)
}

/// Where to load the catalog from, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSpec {
    Url(String),
    File(std::path::PathBuf),
}

impl CatalogSpec {
    pub fn parse(input: &str) -> Self {
        if input.starts_with("http://") || input.starts_with("https://") {
            CatalogSpec::Url(input.to_string())
        } else {
            CatalogSpec::File(input.into())
        }
    }

    /// Build the source. File catalogs resolve links against `base_url`.
    pub fn open(self, base_url: &str) -> Result<Box<dyn CatalogSource>> {
        Ok(match self {
            CatalogSpec::Url(url) => Box::new(http::HttpCatalog::new(&url)?),
            CatalogSpec::File(path) => Box::new(file::FileCatalog::new(path, base_url)?),
        })
    }
}

/// Observable state of a catalog load.
#[derive(Debug, Clone)]
pub enum LoadState {
    Pending,
    Ready(Arc<Vec<CatalogEntry>>),
    Errored(String),
}

impl LoadState {
    pub fn entries(&self) -> Option<&Arc<Vec<CatalogEntry>>> {
        match self {
            LoadState::Ready(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }
}

/// A catalog being loaded in the background.
///
/// The load starts on construction. [`poll`](Self::poll) never blocks;
/// [`wait`](Self::wait) does, for callers without an event loop.
pub struct CatalogResource<S: CatalogSource + 'static> {
    source: Arc<S>,
    state: LoadState,
    receiver: Option<Receiver<Result<Vec<CatalogEntry>>>>,
}

impl<S: CatalogSource + 'static> CatalogResource<S> {
    pub fn spawn(source: S) -> Self {
        let mut resource = Self {
            source: Arc::new(source),
            state: LoadState::Pending,
            receiver: None,
        };
        resource.reload();
        resource
    }

    /// Discard the current state and load again.
    pub fn reload(&mut self) {
        let (tx, rx) = mpsc::channel();
        let source = Arc::clone(&self.source);
        self.state = LoadState::Pending;
        self.receiver = Some(rx);

        thread::spawn(move || {
            tracing::info!(source = %source.describe(), "loading catalog");
            let _ = tx.send(source.load());
        });
    }

    /// Pick up a finished load, if any, and return the current state.
    pub fn poll(&mut self) -> &LoadState {
        if let Some(rx) = &self.receiver {
            match rx.try_recv() {
                Ok(result) => self.finish(result),
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    self.finish(Err(VdError::CatalogLoad("loader stopped".to_string())))
                }
            }
        }
        &self.state
    }

    /// Block until the load settles.
    pub fn wait(&mut self) -> &LoadState {
        if let Some(rx) = &self.receiver {
            let result = rx
                .recv()
                .unwrap_or_else(|_| Err(VdError::CatalogLoad("loader stopped".to_string())));
            self.finish(result);
        }
        &self.state
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    fn finish(&mut self, result: Result<Vec<CatalogEntry>>) {
        self.receiver = None;
        self.state = match result {
            Ok(entries) => {
                tracing::info!(count = entries.len(), "catalog ready");
                LoadState::Ready(Arc::new(entries))
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog load failed");
                match e {
                    VdError::CatalogLoad(msg) => LoadState::Errored(msg),
                    other => LoadState::Errored(other.to_string()),
                }
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::memory::InMemoryCatalog;
    use crate::model::Author;

    fn base() -> Url {
        Url::parse("https://vd-plugins.github.io/proxy/plugins-full.json").unwrap()
    }

    const RAW: &str = r#"[
        {"name": "Old", "description": "first", "authors": [{"name": "A"}], "vendetta": {"original": "old.dev/Old/"}},
        {"name": "New", "description": "second", "authors": [{"name": "B"}], "vendetta": {"original": "https://cdn.example.com/New/"}}
    ]"#;

    #[test]
    fn parse_reverses_and_resolves_links() {
        let entries = parse_catalog(RAW, &base()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "New");
        assert_eq!(entries[0].url, "https://cdn.example.com/New/");
        assert_eq!(entries[1].name, "Old");
        assert_eq!(
            entries[1].url,
            "https://vd-plugins.github.io/proxy/old.dev/Old/"
        );
    }

    #[test]
    fn parse_rejects_non_array_body() {
        let err = parse_catalog(r#"{"plugins": []}"#, &base()).unwrap_err();
        assert!(matches!(err, VdError::CatalogLoad(_)));
    }

    #[test]
    fn parse_empty_catalog() {
        assert!(parse_catalog("[]", &base()).unwrap().is_empty());
    }

    #[test]
    fn catalog_spec_distinguishes_urls_and_paths() {
        assert_eq!(
            CatalogSpec::parse("https://example.com/p.json"),
            CatalogSpec::Url("https://example.com/p.json".into())
        );
        assert_eq!(
            CatalogSpec::parse("./plugins.json"),
            CatalogSpec::File("./plugins.json".into())
        );
    }

    #[test]
    fn opened_file_spec_loads_through_resource() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plugins-full.json");
        std::fs::write(&path, RAW).unwrap();

        let source = CatalogSpec::parse(path.to_str().unwrap())
            .open(base().as_str())
            .unwrap();
        let mut resource = CatalogResource::spawn(source);
        let names: Vec<String> = match resource.wait() {
            LoadState::Ready(loaded) => loaded.iter().map(|e| e.name.clone()).collect(),
            other => panic!("expected ready, got {:?}", other),
        };
        assert_eq!(names, vec!["New", "Old"]);
    }

    #[test]
    fn resource_reaches_ready() {
        let entries = vec![CatalogEntry::new(
            "Alpha",
            "",
            vec![Author::new("X")],
            "https://example.com/alpha/",
        )];
        let mut resource = CatalogResource::spawn(InMemoryCatalog::new(entries.clone()));

        match resource.wait() {
            LoadState::Ready(loaded) => assert_eq!(loaded.as_slice(), entries.as_slice()),
            other => panic!("expected ready, got {:?}", other),
        }
        // Settled state is sticky across polls.
        assert!(resource.poll().entries().is_some());
    }

    #[test]
    fn resource_reports_errors() {
        let mut resource = CatalogResource::spawn(InMemoryCatalog::failing("offline"));
        match resource.wait() {
            LoadState::Errored(msg) => assert_eq!(msg, "offline"),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn reload_starts_pending_again() {
        let mut resource = CatalogResource::spawn(InMemoryCatalog::new(Vec::new()));
        resource.wait();
        resource.reload();
        assert!(resource.state().is_pending());
        assert!(resource.wait().entries().is_some());
    }
}
