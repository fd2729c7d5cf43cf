//! Edit-in-place state machine for one field of one row.
//!
//! The editor owns the draft and the commit/revert rules; the actual write
//! is a closure supplied at commit time (normally
//! `OrderedCollection::edit_field`), so the state machine is independent of
//! any client.

use crate::error::Result;

// ---------------------------------------------------------------------------
// Key / EditorEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    CtrlEnter,
    Escape,
}

/// What a key press asks the host to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    CommitRequested,
    Cancelled,
}

// ---------------------------------------------------------------------------
// CommitOutcome / FieldEditor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// Draft equalled the original; no write was issued.
    Unchanged,
    /// Write confirmed; the editor's value is now the draft.
    Saved,
    /// Write failed; the draft was reverted to the original.
    Reverted(String),
}

#[derive(Debug, Clone)]
pub struct FieldEditor {
    original: String,
    draft: String,
    multiline: bool,
    editing: bool,
}

impl FieldEditor {
    pub fn single_line(value: impl Into<String>) -> Self {
        Self::new(value, false)
    }

    pub fn multi_line(value: impl Into<String>) -> Self {
        Self::new(value, true)
    }

    fn new(value: impl Into<String>, multiline: bool) -> Self {
        let original = value.into();
        Self {
            draft: original.clone(),
            original,
            multiline,
            editing: false,
        }
    }

    /// Committed value as last confirmed.
    pub fn value(&self) -> &str {
        &self.original
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn begin(&mut self) {
        self.draft = self.original.clone();
        self.editing = true;
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    /// Escape always cancels; Enter commits single-line fields and inserts a
    /// newline into multi-line drafts; Ctrl+Enter commits either.
    pub fn handle_key(&mut self, key: Key) -> Option<EditorEvent> {
        if !self.editing {
            return None;
        }
        match key {
            Key::Escape => {
                self.cancel();
                Some(EditorEvent::Cancelled)
            }
            Key::CtrlEnter => Some(EditorEvent::CommitRequested),
            Key::Enter if !self.multiline => Some(EditorEvent::CommitRequested),
            Key::Enter => {
                self.draft.push('\n');
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        self.draft = self.original.clone();
        self.editing = false;
    }

    /// Commit the draft through `write`. An unchanged draft skips the write
    /// entirely; a failed write reverts the draft. Either way the editor
    /// returns to display.
    pub fn commit_with(&mut self, write: impl FnOnce(&str) -> Result<()>) -> CommitOutcome {
        self.editing = false;
        if self.draft == self.original {
            return CommitOutcome::Unchanged;
        }
        match write(&self.draft) {
            Ok(()) => {
                self.original = self.draft.clone();
                CommitOutcome::Saved
            }
            Err(err) => {
                tracing::warn!(%err, "inline edit write failed, reverting");
                self.draft = self.original.clone();
                CommitOutcome::Reverted(err.to_string())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::OrderedCollection;
    use crate::content::GlossaryTerm;
    use crate::error::SwissverseError;
    use crate::memory::MemoryTableClient;
    use crate::presenter::ListView;

    #[test]
    fn unchanged_draft_issues_zero_writes() {
        let mut editor = FieldEditor::single_line("NFT");
        editor.begin();
        editor.set_draft("NFT");

        let mut writes = 0;
        let outcome = editor.commit_with(|_| {
            writes += 1;
            Ok(())
        });
        assert_eq!(outcome, CommitOutcome::Unchanged);
        assert_eq!(writes, 0);
        assert!(!editor.is_editing());
    }

    #[test]
    fn successful_commit_adopts_draft() {
        let mut editor = FieldEditor::single_line("NFT");
        editor.begin();
        editor.set_draft("Non-Fungible Token");

        let outcome = editor.commit_with(|v| {
            assert_eq!(v, "Non-Fungible Token");
            Ok(())
        });
        assert_eq!(outcome, CommitOutcome::Saved);
        assert_eq!(editor.value(), "Non-Fungible Token");
    }

    #[test]
    fn failed_commit_reverts_draft() {
        let mut editor = FieldEditor::single_line("NFT");
        editor.begin();
        editor.set_draft("broken");

        let outcome = editor.commit_with(|_| {
            Err(SwissverseError::Backend {
                status: 500,
                message: "boom".to_string(),
            })
        });
        assert!(matches!(outcome, CommitOutcome::Reverted(_)));
        assert_eq!(editor.value(), "NFT");
        assert_eq!(editor.draft(), "NFT");
        assert!(!editor.is_editing());
    }

    #[test]
    fn escape_always_cancels_and_reverts() {
        let mut editor = FieldEditor::multi_line("original");
        editor.begin();
        editor.set_draft("discard me");
        assert_eq!(editor.handle_key(Key::Escape), Some(EditorEvent::Cancelled));
        assert_eq!(editor.draft(), "original");
        assert!(!editor.is_editing());
    }

    #[test]
    fn enter_commits_single_line_but_breaks_multi_line() {
        let mut single = FieldEditor::single_line("a");
        single.begin();
        assert_eq!(
            single.handle_key(Key::Enter),
            Some(EditorEvent::CommitRequested)
        );

        let mut multi = FieldEditor::multi_line("a");
        multi.begin();
        assert_eq!(multi.handle_key(Key::Enter), None);
        assert_eq!(multi.draft(), "a\n");
        assert_eq!(
            multi.handle_key(Key::CtrlEnter),
            Some(EditorEvent::CommitRequested)
        );
    }

    #[test]
    fn keys_are_ignored_in_display_state() {
        let mut editor = FieldEditor::single_line("a");
        assert_eq!(editor.handle_key(Key::Enter), None);
        assert_eq!(editor.handle_key(Key::Escape), None);
    }

    #[test]
    fn commit_through_collection_patches_view_optimistically() {
        let client = MemoryTableClient::new();
        client.seed(
            crate::types::Table::GlossaryTerms,
            vec![serde_json::json!({
                "id": "g1", "term": "NFT", "slug": "nft", "definition": "old",
                "display_order": 1.0, "is_active": true
            })],
        );
        let coll: OrderedCollection<'_, _, GlossaryTerm> = OrderedCollection::new(&client);

        let mut view = ListView::new();
        view.resolve(coll.list(None));

        let mut editor = FieldEditor::multi_line(view.rows()[0].definition.clone());
        editor.begin();
        editor.set_draft("a unique on-chain asset");
        let outcome = editor.commit_with(|v| coll.edit_field("g1", "definition", v));
        assert_eq!(outcome, CommitOutcome::Saved);

        // One write, no re-fetch: the view is patched in place.
        assert_eq!(client.writes_issued(), 1);
        view.patch("g1", |row| row.definition = editor.value().to_string());
        assert_eq!(view.rows()[0].definition, "a unique on-chain asset");
    }
}
