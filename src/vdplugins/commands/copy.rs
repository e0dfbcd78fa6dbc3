use crate::clipboard::{ClipboardService, CopyOutcome, FallbackCopier, PrimaryClipboard};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::CatalogEntry;
use crate::search::SearchIndex;
use std::sync::Arc;

/// Copy the link of the best match for `query`.
pub fn run<P: PrimaryClipboard, C: FallbackCopier>(
    clipboard: &mut ClipboardService<P, C>,
    index: &mut SearchIndex,
    catalog: &Arc<Vec<CatalogEntry>>,
    query: &str,
) -> Result<CmdResult> {
    let best = index.search(catalog, query).into_iter().next().cloned();

    let Some(entry) = best else {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::warning(format!(
            "No plugin matches \"{}\"",
            query
        )));
        return Ok(result);
    };

    let outcome = clipboard.copy(&entry.url);
    let mut result = CmdResult::default().with_copied(outcome);
    // A copy that failed on every path stays silent; the link is still listed.
    if outcome != CopyOutcome::Failed {
        result.add_message(CmdMessage::success(format!(
            "Copied link for {}",
            entry.name
        )));
    }
    Ok(result.with_listed(vec![entry]))
}
