//! Buffer-aware live completion
//!
//! Position-based completion cannot be answered from the index: the buffer may
//! hold edits the index has never seen. [`Cache::complete_at`] forwards the
//! request and the unsaved overlays to the translation unit and converts its
//! candidates with the same rendering the index builder uses.
//!
//! Live results are never merged with cached entries.

use std::sync::Arc;

use tracing::{debug, warn};

use super::Cache;
use super::entry::Entry;
use super::format;
use super::results::ResultView;
use crate::syntax::{CodeCompletion, CompletionRequest, Cursor, UnsavedFile};

impl Cache {
    /// Live completion at a 1-based `row`/`col` of `filename`.
    ///
    /// With `member_only`, only candidates reachable through member access are
    /// kept. A collaborator failure is logged and yields an empty view.
    pub fn complete_at(
        &self,
        filename: &str,
        row: u32,
        col: u32,
        unsaved: &[UnsavedFile],
        member_only: bool,
    ) -> ResultView {
        if row == 0 || col == 0 {
            debug!(filename, row, col, "Ignoring completion request at 0-based position");
            return ResultView::empty();
        }

        let request = CompletionRequest {
            filename,
            row,
            col,
            unsaved,
        };
        let candidates = match self.tu.code_complete(&request) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(filename, row, col, error = %e, "Live completion failed");
                return ResultView::empty();
            }
        };

        let received = candidates.len();
        let entries: Vec<Arc<Entry>> = candidates
            .iter()
            .filter(|candidate| candidate.availability.is_usable())
            .filter(|candidate| !member_only || candidate.kind.is_member())
            .filter_map(to_entry)
            .collect();

        let view = ResultView::from_entries(entries);
        let view = if self.config.dedup_live_results {
            view.deduplicated()
        } else {
            view
        };
        debug!(
            filename,
            row,
            col,
            overlays = unsaved.len(),
            member_only,
            received,
            returned = view.len(),
            "Completed at position"
        );
        view
    }
}

fn to_entry(candidate: &CodeCompletion) -> Option<Arc<Entry>> {
    let (display, insert) = format::render(&candidate.string, Some(candidate.kind));
    let cursor = candidate.node.map(|node| Cursor {
        node,
        kind: candidate.kind,
    });
    let entry = Entry::new(cursor, display, insert).ok()?;
    Some(Arc::new(entry.with_access(candidate.access)))
}
