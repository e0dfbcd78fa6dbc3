//! # API Facade
//!
//! [`VdApi`] is the single entry point a View talks to. It owns the pieces a
//! session needs and dispatches to `commands/*`:
//!
//! - the [`CatalogResource`] loading in the background
//! - the [`SearchIndex`] (keys cached per loaded catalog)
//! - the [`ClipboardService`]
//! - the active [`VdConfig`]
//!
//! The API never prints and never blocks unless asked to: one-shot commands
//! call [`VdApi::wait_for_catalog`], interactive Views poll
//! [`VdApi::catalog_state`] from their event loop.
//!
//! `VdApi` is generic over the catalog source and the clipboard paths, so
//! tests run it against [`InMemoryCatalog`](crate::catalog::memory::InMemoryCatalog)
//! and fake clipboards.

use crate::catalog::{CatalogResource, CatalogSource, LoadState};
use crate::clipboard::{
    ClipboardService, CommandCopier, CopyOutcome, FallbackCopier, PrimaryClipboard,
    SystemClipboard,
};
use crate::commands;
use crate::config::VdConfig;
use crate::error::{Result, VdError};
use crate::model::CatalogEntry;
use crate::search::{MatchedEntry, SearchIndex, SearchOptions};
use std::path::Path;
use std::sync::Arc;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

pub struct VdApi<
    S: CatalogSource + 'static,
    P: PrimaryClipboard = SystemClipboard,
    C: FallbackCopier = CommandCopier,
> {
    catalog: CatalogResource<S>,
    index: SearchIndex,
    clipboard: ClipboardService<P, C>,
    config: VdConfig,
}

impl<S: CatalogSource + 'static> VdApi<S> {
    /// An API over `source` using the real clipboard, for a long-lived session.
    pub fn new(source: S, config: VdConfig) -> Self {
        Self::with_clipboard(source, ClipboardService::system(), config)
    }

    /// An API for a single command; copies must survive the process exiting.
    pub fn one_shot(source: S, config: VdConfig) -> Self {
        Self::with_clipboard(source, ClipboardService::one_shot(), config)
    }
}

impl<S: CatalogSource + 'static, P: PrimaryClipboard, C: FallbackCopier> VdApi<S, P, C> {
    /// Starts loading the catalog immediately.
    pub fn with_clipboard(source: S, clipboard: ClipboardService<P, C>, config: VdConfig) -> Self {
        Self {
            catalog: CatalogResource::spawn(source),
            index: SearchIndex::new(SearchOptions::from_config(&config)),
            clipboard,
            config,
        }
    }

    pub fn config(&self) -> &VdConfig {
        &self.config
    }

    /// Non-blocking view of the catalog load.
    pub fn catalog_state(&mut self) -> &LoadState {
        self.catalog.poll()
    }

    pub fn reload_catalog(&mut self) {
        self.catalog.reload();
    }

    /// Block until the catalog is loaded; a failed load is an error.
    pub fn wait_for_catalog(&mut self) -> Result<Arc<Vec<CatalogEntry>>> {
        match self.catalog.wait() {
            LoadState::Ready(entries) => Ok(Arc::clone(entries)),
            LoadState::Errored(msg) => Err(VdError::CatalogLoad(msg.clone())),
            LoadState::Pending => Err(VdError::CatalogLoad("catalog still loading".to_string())),
        }
    }

    /// Scored matches against an already loaded catalog, for live Views.
    pub fn results<'a>(
        &mut self,
        catalog: &'a Arc<Vec<CatalogEntry>>,
        query: &str,
    ) -> Vec<MatchedEntry<'a>> {
        self.index.search_scored(catalog, query)
    }

    /// Best-effort copy of arbitrary text.
    pub fn copy_text(&mut self, text: &str) -> CopyOutcome {
        self.clipboard.copy(text)
    }

    pub fn search(&mut self, query: &str) -> Result<CmdResult> {
        let catalog = self.wait_for_catalog()?;
        commands::search::run(&mut self.index, &catalog, query, &self.config.share_url)
    }

    pub fn copy_link(&mut self, query: &str) -> Result<CmdResult> {
        let catalog = self.wait_for_catalog()?;
        commands::copy::run(&mut self.clipboard, &mut self.index, &catalog, query)
    }

    pub fn share_link(&self, query: &str) -> Result<CmdResult> {
        share_link(&self.config, query)
    }

    pub fn query_from_share(&self, input: &str) -> String {
        query_from_share(&self.config, input)
    }
}

// Operations below need no catalog, so they are usable without a `VdApi`.

pub fn configure(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    commands::config::run(config_dir, action)
}

pub fn share_link(config: &VdConfig, query: &str) -> Result<CmdResult> {
    commands::link::run(&config.share_url, query)
}

/// The query a pasted share link restores to; empty if it cannot be decoded.
pub fn query_from_share(config: &VdConfig, input: &str) -> String {
    commands::link::query_from_share(&config.share_url, input)
}
