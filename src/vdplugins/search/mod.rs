//! # Search
//!
//! Fuzzy matching over a loaded catalog. Two fields are searched: the entry
//! `name` and the `name` of every author. A query either passes the catalog
//! through untouched (empty query) or returns the matching entries ordered by
//! ascending score, best first, with ties kept in catalog order.
//!
//! Scoring lives in [`score`], query syntax in [`query`]. [`search`] is the
//! pure entry point; [`SearchIndex`] adds a cache of lower-cased keys tied to
//! the identity of the catalog `Arc`, which never changes results.

use crate::model::CatalogEntry;
use std::sync::Arc;

pub mod query;
pub mod score;

pub use query::Query;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Highest score still counted as a match (0.0 exact, 1.0 anything)
    pub threshold: f64,
    /// Characters of drift from `location` that cost a full point of score
    pub distance: usize,
    /// Where in a field a match is expected to start
    pub location: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            distance: 100,
            location: 0,
        }
    }
}

impl SearchOptions {
    /// Options from a config, with the threshold clamped to `0.0..=1.0`.
    pub fn from_config(config: &crate::config::VdConfig) -> Self {
        let defaults = Self::default();
        let threshold = if config.threshold.is_finite() {
            config.threshold.clamp(0.0, 1.0)
        } else {
            defaults.threshold
        };
        Self {
            threshold,
            distance: config.distance,
            ..defaults
        }
    }
}

/// An entry with the score it matched at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedEntry<'a> {
    pub entry: &'a CatalogEntry,
    pub score: f64,
}

/// Search `collection` for `query`. Pure; builds its keys on every call.
pub fn search<'a>(
    collection: &'a [CatalogEntry],
    query: &str,
    options: &SearchOptions,
) -> Vec<&'a CatalogEntry> {
    search_scored(collection, query, options)
        .into_iter()
        .map(|m| m.entry)
        .collect()
}

/// Like [`search`], keeping each entry's score.
pub fn search_scored<'a>(
    collection: &'a [CatalogEntry],
    query: &str,
    options: &SearchOptions,
) -> Vec<MatchedEntry<'a>> {
    if query.is_empty() {
        return pass_through(collection);
    }
    let keys = build_keys(collection);
    rank(collection, &keys, query, options)
}

/// Search with the lower-cased keys cached per catalog.
#[derive(Debug, Default)]
pub struct SearchIndex {
    options: SearchOptions,
    cache: Option<CachedKeys>,
}

#[derive(Debug)]
struct CachedKeys {
    collection: Arc<Vec<CatalogEntry>>,
    keys: Vec<Vec<String>>,
}

impl SearchIndex {
    pub fn new(options: SearchOptions) -> Self {
        Self {
            options,
            cache: None,
        }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn search<'a>(
        &mut self,
        collection: &'a Arc<Vec<CatalogEntry>>,
        query: &str,
    ) -> Vec<&'a CatalogEntry> {
        self.search_scored(collection, query)
            .into_iter()
            .map(|m| m.entry)
            .collect()
    }

    pub fn search_scored<'a>(
        &mut self,
        collection: &'a Arc<Vec<CatalogEntry>>,
        query: &str,
    ) -> Vec<MatchedEntry<'a>> {
        if query.is_empty() {
            return pass_through(collection);
        }

        let fresh = matches!(&self.cache, Some(c) if Arc::ptr_eq(&c.collection, collection));
        if !fresh {
            tracing::debug!(entries = collection.len(), "rebuilding search keys");
            self.cache = Some(CachedKeys {
                collection: Arc::clone(collection),
                keys: build_keys(collection),
            });
        }

        let keys = self
            .cache
            .as_ref()
            .map(|c| c.keys.as_slice())
            .unwrap_or_default();
        rank(collection, keys, query, &self.options)
    }
}

fn pass_through(collection: &[CatalogEntry]) -> Vec<MatchedEntry<'_>> {
    collection
        .iter()
        .map(|entry| MatchedEntry { entry, score: 0.0 })
        .collect()
}

/// Lower-cased searchable fields of every entry: name first, then authors.
fn build_keys(collection: &[CatalogEntry]) -> Vec<Vec<String>> {
    collection
        .iter()
        .map(|entry| {
            std::iter::once(entry.name.to_lowercase())
                .chain(entry.authors.iter().map(|a| a.name.to_lowercase()))
                .collect()
        })
        .collect()
}

fn rank<'a>(
    collection: &'a [CatalogEntry],
    keys: &[Vec<String>],
    query: &str,
    options: &SearchOptions,
) -> Vec<MatchedEntry<'a>> {
    let parsed = Query::parse(query);

    let mut matches: Vec<MatchedEntry<'a>> = collection
        .iter()
        .zip(keys)
        .filter_map(|(entry, fields)| {
            let score = fields
                .iter()
                .filter_map(|field| parsed.score(field, options))
                .min_by(f64::total_cmp)?;
            Some(MatchedEntry { entry, score })
        })
        .collect();

    // Stable: equal scores keep catalog order.
    matches.sort_by(|a, b| a.score.total_cmp(&b.score));

    tracing::debug!(query, matched = matches.len(), "search complete");
    matches
}
