//! # Command Dispatch
//!
//! `run()` parses arguments, installs logging and builds the [`VdApi`] over
//! the selected catalog. Each `handle_*` calls one API method and prints the
//! resulting [`CmdResult`](vdplugins::api::CmdResult).
//!
//! The query a command works on comes from, in order:
//! 1. the words given on the command line
//! 2. the `--share` link, decoded the same way a browser tab would restore it
//! 3. nothing (empty query lists the whole catalog)

use super::render::{print_config, print_entries, print_messages, print_share_link};
use super::setup::{config_dir, init_logging, Cli, Commands};
use super::tui;
use clap::Parser;
use vdplugins::api::{self, ConfigAction, VdApi};
use vdplugins::catalog::{CatalogSource, CatalogSpec};
use vdplugins::config::VdConfig;
use vdplugins::error::Result;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let interactive = cli.command.as_ref().map_or(true, Commands::is_interactive);
    init_logging(cli.verbose, cli.log_file.as_deref(), interactive)?;

    let dir = config_dir()?;
    let config = match VdConfig::load(&dir) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "falling back to default configuration");
            VdConfig::default()
        }
    };

    match cli.command {
        Some(Commands::Config { key, value }) => handle_config(&dir, key, value),
        Some(Commands::Link { query }) => {
            let query = resolve_query(&config, query, cli.share.as_deref());
            handle_link(&config, &query)
        }
        Some(Commands::Search { query }) => {
            let query = resolve_query(&config, query, cli.share.as_deref());
            let mut api = open_api(&config, cli.catalog.as_deref(), Session::OneShot)?;
            handle_search(&mut api, &query)
        }
        Some(Commands::Copy { query }) => {
            let query = resolve_query(&config, query, cli.share.as_deref());
            let mut api = open_api(&config, cli.catalog.as_deref(), Session::OneShot)?;
            handle_copy(&mut api, &query)
        }
        Some(Commands::Browse) | None => {
            let api = open_api(&config, cli.catalog.as_deref(), Session::Interactive)?;
            let link = tui::run(api, cli.share.as_deref())?;
            print_share_link(&link);
            Ok(())
        }
    }
}

/// How long the process lives after a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Session {
    OneShot,
    Interactive,
}

fn open_api(
    config: &VdConfig,
    catalog: Option<&str>,
    session: Session,
) -> Result<VdApi<Box<dyn CatalogSource>>> {
    let spec = CatalogSpec::parse(catalog.unwrap_or(&config.catalog_url));
    let source = spec.open(&config.catalog_url)?;
    Ok(match session {
        Session::OneShot => VdApi::one_shot(source, config.clone()),
        Session::Interactive => VdApi::new(source, config.clone()),
    })
}

fn resolve_query(config: &VdConfig, words: Vec<String>, share: Option<&str>) -> String {
    if !words.is_empty() {
        return words.join(" ");
    }
    share
        .map(|link| api::query_from_share(config, link))
        .unwrap_or_default()
}

fn handle_search(api: &mut VdApi<Box<dyn CatalogSource>>, query: &str) -> Result<()> {
    let result = api.search(query)?;
    print_entries(&result.listed);
    if let Some(link) = &result.share_link {
        println!();
        print_share_link(link);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_copy(api: &mut VdApi<Box<dyn CatalogSource>>, query: &str) -> Result<()> {
    let result = api.copy_link(query)?;
    print_entries(&result.listed);
    print_messages(&result.messages);
    Ok(())
}

fn handle_link(config: &VdConfig, query: &str) -> Result<()> {
    let result = api::share_link(config, query)?;
    if let Some(link) = &result.share_link {
        println!("{}", link);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(dir: &std::path::Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = api::configure(dir, action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_win_over_share_link() {
        let config = VdConfig::default();
        let query = resolve_query(
            &config,
            vec!["message".into(), "logger".into()],
            Some("#other"),
        );
        assert_eq!(query, "message logger");
    }

    #[test]
    fn share_link_restores_query() {
        let config = VdConfig::default();
        let link = "https://vd-plugins.github.io/web/#hello%20world";
        assert_eq!(resolve_query(&config, Vec::new(), Some(link)), "hello world");
    }

    #[test]
    fn nothing_means_empty_query() {
        assert_eq!(resolve_query(&VdConfig::default(), Vec::new(), None), "");
    }
}
