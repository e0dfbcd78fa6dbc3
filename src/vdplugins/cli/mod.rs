//! # CLI Layer
//!
//! One possible View over the library. This is the **only** place that:
//! - Knows about terminal I/O (stdout, stderr, raw mode)
//! - Installs the tracing subscriber
//! - Decides exit codes (via `main.rs`)
//!
//! - `setup`: clap definitions, config directory, logging
//! - `commands`: `run()` and the per-command handlers
//! - `render`: printing cards, links and messages
//! - `tui`: the interactive `browse` screen

mod commands;
mod render;
mod setup;
mod tui;

pub use commands::run;
