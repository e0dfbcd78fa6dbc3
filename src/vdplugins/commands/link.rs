use crate::commands::CmdResult;
use crate::error::Result;
use crate::state::{QueryStateStore, SessionLocation};
use std::time::{Duration, Instant};

pub fn run(share_base: &str, query: &str) -> Result<CmdResult> {
    Ok(CmdResult::default().with_share_link(share_link(share_base, query)))
}

/// The link a session would end up at after typing `query`.
pub fn share_link(share_base: &str, query: &str) -> String {
    let location = SessionLocation::new(share_base);
    let mut store = QueryStateStore::initialize(location.clone(), Duration::ZERO);
    store.set_query(query, Instant::now());
    store.flush();
    location.href()
}

/// The query a share link (or bare fragment) restores to.
pub fn query_from_share(share_base: &str, input: &str) -> String {
    let location = SessionLocation::from_share(share_base, input);
    QueryStateStore::initialize(location, Duration::ZERO)
        .query()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://vd-plugins.github.io/web/";

    #[test]
    fn encodes_query_into_fragment() {
        let result = run(BASE, "hello world").unwrap();
        assert_eq!(
            result.share_link.as_deref(),
            Some("https://vd-plugins.github.io/web/#hello%20world")
        );
    }

    #[test]
    fn share_round_trips() {
        for query in ["hello world", "^hide | 'theme", "ünï#code%"] {
            let link = share_link(BASE, query);
            assert_eq!(query_from_share(BASE, &link), query);
        }
    }

    #[test]
    fn malformed_share_gives_empty_query() {
        assert_eq!(query_from_share(BASE, "#bad%zz"), "");
    }

    #[test]
    fn bare_fragment_is_decoded() {
        assert_eq!(query_from_share(BASE, "hello%20world"), "hello world");
    }
}
