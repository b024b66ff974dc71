//! Search session state.

use crate::document::{HighlightUndo, NodeId};

/// A live highlight marker, in document order within the session's
/// highlight set. Exactly one span carries the current flag while
/// matches exist.
#[derive(Debug, Clone)]
pub struct MatchSpan {
    pub marker: NodeId,
    pub current: bool,
}

/// Mutable search state for one content area.
///
/// `search_term` is the last successfully searched raw term; empty
/// means no active search. `current_match_index` is 1-based, 0 when
/// there are no matches.
pub struct SearchSession {
    pub search_term: String,
    pub current_match_index: usize,
    pub total_matches: usize,
    pub case_sensitive: bool,
    pub accent_fold: bool,
    pub highlight_set: Vec<MatchSpan>,
    pub undo_handle: Option<HighlightUndo>,
}

impl SearchSession {
    pub fn new(accent_fold: bool, case_sensitive: bool) -> Self {
        Self {
            search_term: String::new(),
            current_match_index: 0,
            total_matches: 0,
            case_sensitive,
            accent_fold,
            highlight_set: Vec::new(),
            undo_handle: None,
        }
    }

    /// Drop all match state. The undo handle is returned to the caller,
    /// which must apply it to the document before discarding it.
    pub fn take_highlights(&mut self) -> Option<HighlightUndo> {
        self.highlight_set.clear();
        self.current_match_index = 0;
        self.total_matches = 0;
        self.undo_handle.take()
    }

    /// Marker of the currently focused span, if any.
    pub fn current_marker(&self) -> Option<NodeId> {
        self.highlight_set
            .iter()
            .find(|span| span.current)
            .map(|span| span.marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_inactive() {
        let session = SearchSession::new(true, false);
        assert!(session.search_term.is_empty());
        assert_eq!(session.current_match_index, 0);
        assert_eq!(session.total_matches, 0);
        assert!(session.highlight_set.is_empty());
        assert!(session.undo_handle.is_none());
        assert!(session.current_marker().is_none());
    }

    #[test]
    fn test_take_highlights_resets_counters() {
        let mut session = SearchSession::new(true, false);
        session.highlight_set = vec![
            MatchSpan { marker: 3, current: true },
            MatchSpan { marker: 5, current: false },
        ];
        session.current_match_index = 1;
        session.total_matches = 2;

        assert_eq!(session.current_marker(), Some(3));
        let undo = session.take_highlights();
        assert!(undo.is_none());
        assert_eq!(session.current_match_index, 0);
        assert_eq!(session.total_matches, 0);
        assert!(session.highlight_set.is_empty());
    }
}
