use clap::{ArgAction, Parser, Subcommand};
use directories::ProjectDirs;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use vdplugins::error::{Result, VdError};

/// Overrides the config directory, mostly for tests.
const HOME_ENV: &str = "VDPLUGINS_HOME";

/// "0.3.0" for releases, "0.3.0@abc1234" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "vdplugins", bin_name = "vdplugins", version = get_version())]
#[command(about = "Fuzzy-search the Vendetta plugin catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Catalog URL, or path to a downloaded catalog JSON file
    #[arg(long, global = true, value_name = "URL|PATH")]
    pub catalog: Option<String>,

    /// Share link (or #fragment) to restore the search from
    #[arg(long, global = true, value_name = "LINK")]
    pub share: Option<String>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to a file (the only log output while browsing)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search interactively (default)
    #[command(alias = "b")]
    Browse,

    /// Print plugins matching a query
    #[command(alias = "s")]
    Search {
        /// Query words; extended syntax like ^prefix, 'include, !not, suffix$
        query: Vec<String>,
    },

    /// Copy the link of the best match to the clipboard
    #[command(alias = "cp")]
    Copy {
        /// Query words
        query: Vec<String>,
    },

    /// Print the share link for a query
    Link {
        /// Query words
        query: Vec<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (catalog-url, share-url, debounce-ms, threshold, distance)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

impl Commands {
    pub fn is_interactive(&self) -> bool {
        matches!(self, Commands::Browse)
    }
}

pub fn config_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("io.github", "vd-plugins", "vdplugins")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| VdError::Config("Could not determine config dir".to_string()))
}

/// Install the tracing subscriber.
///
/// Logs go to `log_file` when given, otherwise to stderr, except while the
/// TUI owns the terminal, where they are dropped.
pub fn init_logging(verbose: u8, log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vdplugins={}", level)));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None if interactive => {}
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("vdplugins").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_subcommand_means_browse() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn search_collects_words_and_globals() {
        let cli = parse(&["s", "message", "logger", "--catalog", "plugins.json", "-vv"]);
        match cli.command {
            Some(Commands::Search { query }) => assert_eq!(query, vec!["message", "logger"]),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(cli.catalog.as_deref(), Some("plugins.json"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn share_flag_is_global() {
        let cli = parse(&["browse", "--share", "#hello%20world"]);
        assert!(cli.command.as_ref().is_some_and(Commands::is_interactive));
        assert_eq!(cli.share.as_deref(), Some("#hello%20world"));
    }

    #[test]
    fn config_key_value() {
        let cli = parse(&["config", "threshold", "0.4"]);
        match cli.command {
            Some(Commands::Config { key, value }) => {
                assert_eq!(key.as_deref(), Some("threshold"));
                assert_eq!(value.as_deref(), Some("0.4"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
