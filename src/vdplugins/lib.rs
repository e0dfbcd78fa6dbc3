//! # vdplugins Architecture
//!
//! vdplugins is a **UI-agnostic catalog search library**. The terminal client in
//! `cli/` is one View over it; the same core could sit behind a web page or an
//! editor integration.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders cards, runs the browse TUI     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Owns the catalog resource, search index and clipboard    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  - search/    fuzzy matching over the loaded catalog        │
//! │  - state/     live query + debounced shareable state        │
//! │  - clipboard  primary write with a scoped fallback path     │
//! │  - catalog/   CatalogSource trait, HTTP/file/memory sources │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! CatalogSource ──(Vec<CatalogEntry>)──▶ SearchIndex ◀── query ◀── QueryStateStore
//!                                                                   ▲        │
//!                                                       user input ─┘        ▼ (debounced)
//!                                                                     ShareableState (#fragment)
//! ```
//!
//! The catalog is loaded once and shared read-only (`Arc<Vec<CatalogEntry>>`).
//! The query has exactly one writer, [`state::QueryStateStore`]; the shareable
//! representation trails it by at most one debounce interval.
//!
//! ## Execution Model
//!
//! Everything except the catalog download runs on the caller's thread. Time is
//! passed in explicitly (`Instant`) so the debounce machinery is deterministic
//! under test and is driven by whatever event loop the View runs.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each command, returning [`commands::CmdResult`]
//! - [`catalog`]: Catalog sources, normalization and background loading
//! - [`search`]: Fuzzy matching with extended query syntax
//! - [`state`]: Query ownership, percent-encoding codec and debouncing
//! - [`clipboard`]: Clipboard writes with a fallback path
//! - [`model`]: Core data types (`CatalogEntry`, `Author`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod catalog;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod search;
pub mod state;
