use crate::commands::{link, CmdResult};
use crate::error::Result;
use crate::model::CatalogEntry;
use crate::search::SearchIndex;
use std::sync::Arc;

pub fn run(
    index: &mut SearchIndex,
    catalog: &Arc<Vec<CatalogEntry>>,
    query: &str,
    share_base: &str,
) -> Result<CmdResult> {
    let listed = index
        .search(catalog, query)
        .into_iter()
        .cloned()
        .collect();
    let share_link = link::share_link(share_base, query);
    Ok(CmdResult::default()
        .with_listed(listed)
        .with_share_link(share_link))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Author;
    use crate::search::SearchOptions;

    const BASE: &str = "https://vd-plugins.github.io/web/";

    fn catalog() -> Arc<Vec<CatalogEntry>> {
        Arc::new(vec![
            CatalogEntry::new("Alpha", "a", vec![Author::new("X")], "https://e.com/alpha/"),
            CatalogEntry::new("beta", "b", vec![Author::new("Y")], "https://e.com/beta/"),
        ])
    }

    #[test]
    fn lists_matches_with_share_link() {
        let mut index = SearchIndex::new(SearchOptions::default());
        let result = run(&mut index, &catalog(), "al", BASE).unwrap();

        assert_eq!(result.listed.len(), 1);
        assert_eq!(result.listed[0].name, "Alpha");
        assert_eq!(
            result.share_link.as_deref(),
            Some("https://vd-plugins.github.io/web/#al")
        );
    }

    #[test]
    fn empty_query_lists_everything_in_order() {
        let mut index = SearchIndex::new(SearchOptions::default());
        let result = run(&mut index, &catalog(), "", BASE).unwrap();

        let names: Vec<_> = result.listed.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta"]);
        assert_eq!(result.share_link.as_deref(), Some(BASE));
    }
}
