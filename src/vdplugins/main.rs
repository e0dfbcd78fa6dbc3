//! # vdplugins CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, this file only
//! invokes `cli::run()` and turns errors into an exit code.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/vdplugins/cli/)                             │
//! │  - clap argument parsing + logging setup (setup.rs)         │
//! │  - command selection + context wiring (commands.rs)         │
//! │  - card / message printing (render.rs)                      │
//! │  - interactive browser (tui.rs)                             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs) → commands/*, search/, state/, ...      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
