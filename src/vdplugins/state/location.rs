use std::sync::{Arc, Mutex, MutexGuard};

/// The externally visible, shareable home of the query: the part of a link
/// after `#`.
pub trait ShareableState {
    /// Current fragment, still percent-encoded, without the leading `#`.
    fn fragment(&self) -> String;

    /// Overwrite the fragment in place. Never adds a history entry.
    fn replace_fragment(&mut self, encoded: &str);
}

/// A share link that lives for the session.
///
/// Clones are handles to the same link, so a View can keep one to display
/// while the query store owns another for writing.
#[derive(Debug, Clone)]
pub struct SessionLocation {
    inner: Arc<Mutex<LocationInner>>,
}

#[derive(Debug)]
struct LocationInner {
    base: String,
    fragment: String,
    writes: usize,
}

impl SessionLocation {
    pub fn new(base: impl Into<String>) -> Self {
        Self::with_fragment(base, "")
    }

    pub fn with_fragment(base: impl Into<String>, fragment: impl Into<String>) -> Self {
        let base = base.into();
        let base = match base.split_once('#') {
            Some((head, _)) => head.to_string(),
            None => base,
        };
        Self {
            inner: Arc::new(Mutex::new(LocationInner {
                base,
                fragment: fragment.into(),
                writes: 0,
            })),
        }
    }

    /// Build from what a user pasted: a full link, `#fragment`, or a bare fragment.
    pub fn from_share(base: impl Into<String>, input: &str) -> Self {
        let fragment = match input.split_once('#') {
            Some((_, fragment)) => fragment,
            None if input.starts_with("http://") || input.starts_with("https://") => "",
            None => input,
        };
        Self::with_fragment(base, fragment)
    }

    /// The full share link, e.g. `https://vd-plugins.github.io/web/#hello%20world`.
    pub fn href(&self) -> String {
        let inner = self.lock();
        if inner.fragment.is_empty() {
            inner.base.clone()
        } else {
            format!("{}#{}", inner.base, inner.fragment)
        }
    }

    /// How many times the fragment has been replaced.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Replacing never grows history, so a session only ever has its entry point.
    pub fn history_len(&self) -> usize {
        1
    }

    fn lock(&self) -> MutexGuard<'_, LocationInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ShareableState for SessionLocation {
    fn fragment(&self) -> String {
        self.lock().fragment.clone()
    }

    fn replace_fragment(&mut self, encoded: &str) {
        let mut inner = self.lock();
        inner.fragment = encoded.to_string();
        inner.writes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://vd-plugins.github.io/web/";

    #[test]
    fn from_share_accepts_full_links() {
        let loc = SessionLocation::from_share(BASE, "https://vd-plugins.github.io/web/#hello%20world");
        assert_eq!(loc.fragment(), "hello%20world");
    }

    #[test]
    fn from_share_accepts_hash_and_bare_fragments() {
        assert_eq!(SessionLocation::from_share(BASE, "#abc").fragment(), "abc");
        assert_eq!(SessionLocation::from_share(BASE, "abc").fragment(), "abc");
        assert_eq!(SessionLocation::from_share(BASE, BASE).fragment(), "");
    }

    #[test]
    fn href_joins_base_and_fragment() {
        let mut loc = SessionLocation::new(BASE);
        assert_eq!(loc.href(), BASE);
        loc.replace_fragment("x%20y");
        assert_eq!(loc.href(), "https://vd-plugins.github.io/web/#x%20y");
    }

    #[test]
    fn base_fragment_is_discarded() {
        let loc = SessionLocation::new("https://example.com/page#old");
        assert_eq!(loc.href(), "https://example.com/page");
    }

    #[test]
    fn clones_share_state_and_replace_keeps_history() {
        let loc = SessionLocation::new(BASE);
        let mut writer = loc.clone();
        writer.replace_fragment("a");
        writer.replace_fragment("b");

        assert_eq!(loc.fragment(), "b");
        assert_eq!(loc.write_count(), 2);
        assert_eq!(loc.history_len(), 1);
    }
}
