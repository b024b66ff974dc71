//! Find-in-page search lifecycle.
//!
//! `FindManager` owns one content area's search session: term
//! normalization, accent-fold pattern compilation, highlight insertion
//! over the document tree, current-match tracking, and navigation with
//! wraparound. The find bar's display state (counter, error region,
//! checkboxes) lives here as plain state the host renders.

use std::ops::Range;
use std::time::{Duration, Instant};

use crate::cache::PatternCache;
use crate::document::{DocumentTree, NodeId, CURRENT_CLASS, HIGHLIGHT_CLASS};
use crate::fold::accent_folded_pattern;
use crate::session::{MatchSpan, SearchSession};
use crate::settings::{
    get_bool, set_bool, SettingsStore, SETTING_ACCENT_FOLD, SETTING_CASE_SENSITIVE,
    SETTING_SEARCH_TERM,
};
use crate::viewport::{ScrollOptions, Viewport};

/// Minimum term length (in characters) before a search runs.
pub const MIN_TERM_LEN: usize = 2;

/// Keystroke coalescing window.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(400);

const ERR_NO_MATCHES: &str = "No matches found";
const ERR_INVALID_PATTERN: &str = "Invalid search pattern";

// ---------------------------------------------------------------------------
// FindBar
// ---------------------------------------------------------------------------

/// Display state of the find bar, mirroring the fixed-identifier
/// element contract: input, counter, error region, navigation buttons,
/// and the two toggle checkboxes.
#[derive(Debug)]
pub struct FindBar {
    pub visible: bool,
    pub input: String,
    pub input_focused: bool,
    pub accent_fold_checked: bool,
    pub case_sensitive_checked: bool,
    counter: String,
    error: Option<String>,
}

impl FindBar {
    fn new(accent_fold: bool, case_sensitive: bool) -> Self {
        Self {
            visible: false,
            input: String::new(),
            input_focused: false,
            accent_fold_checked: accent_fold,
            case_sensitive_checked: case_sensitive,
            counter: "0/0".to_string(),
            error: None,
        }
    }

    /// Live match counter, formatted `"{current}/{total}"`.
    pub fn counter(&self) -> &str {
        &self.counter
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn set_counter(&mut self, current: usize, total: usize) {
        self.counter = format!("{}/{}", current, total);
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn clear_error(&mut self) {
        self.error = None;
    }
}

// ---------------------------------------------------------------------------
// Debouncer
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct PendingSearch {
    term: String,
    due_at: Instant,
}

/// Single-slot register for the deferred search: a new keystroke
/// cancels and replaces the pending one, never queues behind it.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<PendingSearch>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn submit(&mut self, term: &str, now: Instant) {
        self.pending = Some(PendingSearch {
            term: term.to_string(),
            due_at: now + self.delay,
        });
    }

    /// Take the pending term if its quiet period has elapsed.
    pub fn due(&mut self, now: Instant) -> Option<String> {
        if self.pending.as_ref()?.due_at <= now {
            self.pending.take().map(|p| p.term)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

// ---------------------------------------------------------------------------
// Keyboard surface
// ---------------------------------------------------------------------------

/// Keys the manager responds to: the global open shortcut, and Enter /
/// Shift+Enter / Escape while the bar has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindKey {
    Open,
    Enter,
    ShiftEnter,
    Escape,
}

// ---------------------------------------------------------------------------
// FindManager
// ---------------------------------------------------------------------------

pub struct FindManager {
    doc: DocumentTree,
    session: SearchSession,
    bar: FindBar,
    settings: Box<dyn SettingsStore>,
    viewport: Box<dyn Viewport>,
    patterns: PatternCache,
    debounce: Debouncer,
}

impl FindManager {
    /// Bind a manager to one content area.
    ///
    /// The persisted term and toggles are restored from the settings
    /// store; no search runs until `show` or an input event.
    pub fn new(
        doc: DocumentTree,
        settings: Box<dyn SettingsStore>,
        viewport: Box<dyn Viewport>,
    ) -> Self {
        let accent_fold = get_bool(settings.as_ref(), SETTING_ACCENT_FOLD, true);
        let case_sensitive = get_bool(settings.as_ref(), SETTING_CASE_SENSITIVE, false);
        let mut session = SearchSession::new(accent_fold, case_sensitive);
        if let Some(term) = settings.get(SETTING_SEARCH_TERM) {
            session.search_term = term;
        }

        Self {
            doc,
            bar: FindBar::new(accent_fold, case_sensitive),
            session,
            settings,
            viewport,
            patterns: PatternCache::new(),
            debounce: Debouncer::new(DEBOUNCE_DELAY),
        }
    }

    pub fn document(&self) -> &DocumentTree {
        &self.doc
    }

    pub fn bar(&self) -> &FindBar {
        &self.bar
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn settings(&self) -> &dyn SettingsStore {
        self.settings.as_ref()
    }

    /// Search the content area for `term`.
    ///
    /// Retracts any previous highlight set first. Terms shorter than
    /// [`MIN_TERM_LEN`] characters are not yet a search: they clear the
    /// highlights and stop, without touching the stored term. Leading
    /// and trailing whitespace is significant.
    pub fn search(&mut self, term: &str) {
        self.retract();

        if term.chars().count() < MIN_TERM_LEN {
            return;
        }
        self.session.search_term = term.to_string();

        let pattern = if self.session.accent_fold {
            accent_folded_pattern(term)
        } else {
            term.to_string()
        };

        let regex = match self
            .patterns
            .get_or_compile(&pattern, !self.session.case_sensitive)
        {
            Ok(re) => re,
            Err(e) => {
                tracing::debug!(pattern = %pattern, error = %e, "pattern rejected");
                self.bar.show_error(ERR_INVALID_PATTERN);
                self.persist();
                return;
            }
        };

        // Read-only pass: match ranges per text node, in document order.
        let mut per_node: Vec<(NodeId, Vec<Range<usize>>)> = Vec::new();
        for id in self.doc.text_nodes() {
            let Some(text) = self.doc.node_text(id) else { continue };
            let ranges: Vec<Range<usize>> = regex
                .find_iter(text)
                .map(|m| m.range())
                .filter(|r| !r.is_empty())
                .collect();
            if !ranges.is_empty() {
                per_node.push((id, ranges));
            }
        }

        // Mutating pass: wrap each matched node. Ids are stable, so
        // earlier splices cannot invalidate later entries.
        let mut undo_all = crate::document::HighlightUndo::default();
        for (id, ranges) in per_node {
            match self.doc.wrap_matches(id, &ranges, HIGHLIGHT_CLASS) {
                Ok((markers, undo)) => {
                    undo_all.merge(undo);
                    self.session.highlight_set.extend(
                        markers
                            .into_iter()
                            .map(|marker| MatchSpan { marker, current: false }),
                    );
                }
                Err(e) => tracing::warn!(node = id, error = %e, "highlight insertion failed"),
            }
        }

        self.session.total_matches = self.session.highlight_set.len();
        if !undo_all.is_empty() {
            self.session.undo_handle = Some(undo_all);
        }

        tracing::debug!(
            term = %term,
            pattern = %pattern,
            matches = self.session.total_matches,
            "search complete"
        );

        if self.session.total_matches == 0 {
            self.bar.show_error(ERR_NO_MATCHES);
        } else {
            self.focus_match(0);
        }
        self.persist();
    }

    /// Advance to the next match, wrapping past the last back to the
    /// first. No-op while there are no matches.
    pub fn next_match(&mut self) {
        if self.session.total_matches == 0 {
            return;
        }
        let next = self.session.current_match_index % self.session.total_matches;
        self.focus_match(next);
    }

    /// Step back to the previous match, wrapping from the first to the
    /// last. No-op while there are no matches.
    pub fn previous_match(&mut self) {
        if self.session.total_matches == 0 {
            return;
        }
        let previous = if self.session.current_match_index >= 2 {
            self.session.current_match_index - 2
        } else {
            self.session.total_matches - 1
        };
        self.focus_match(previous);
    }

    /// Open the find bar, focus the input, and re-run the prior term
    /// if one of search length exists.
    pub fn show(&mut self) {
        self.bar.visible = true;
        self.bar.input_focused = true;
        self.bar.input = self.session.search_term.clone();

        if self.session.search_term.chars().count() >= MIN_TERM_LEN {
            let term = self.session.search_term.clone();
            self.search(&term);
        }
    }

    /// Close the find bar. Highlights are retracted and the error
    /// display cleared regardless of prior visibility.
    pub fn hide(&mut self) {
        self.retract();
        self.debounce.cancel();
        self.bar.visible = false;
        self.bar.input_focused = false;
    }

    pub fn toggle(&mut self) {
        if self.bar.visible {
            self.hide();
        } else {
            self.show();
        }
    }

    pub fn set_accent_fold(&mut self, enabled: bool) {
        self.session.accent_fold = enabled;
        self.bar.accent_fold_checked = enabled;
        set_bool(self.settings.as_mut(), SETTING_ACCENT_FOLD, enabled);
        self.research();
    }

    pub fn set_case_sensitive(&mut self, enabled: bool) {
        self.session.case_sensitive = enabled;
        self.bar.case_sensitive_checked = enabled;
        set_bool(self.settings.as_mut(), SETTING_CASE_SENSITIVE, enabled);
        self.research();
    }

    /// Raw keystroke input: coalesced through the debounce slot, so a
    /// burst of keystrokes triggers at most one search per quiet
    /// window. Call [`tick`](Self::tick) to fire due searches.
    pub fn input(&mut self, term: &str, now: Instant) {
        self.bar.input = term.to_string();
        self.debounce.submit(term, now);
    }

    /// Run the pending debounced search if its quiet period elapsed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(term) = self.debounce.due(now) {
            self.search(&term);
        }
    }

    pub fn handle_key(&mut self, key: FindKey) {
        match key {
            FindKey::Open => self.show(),
            FindKey::Enter => self.next_match(),
            FindKey::ShiftEnter => self.previous_match(),
            FindKey::Escape => {
                // Escape closes the bar only while it is visible.
                if self.bar.visible {
                    self.hide();
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn retract(&mut self) {
        if let Some(undo) = self.session.take_highlights() {
            self.doc.undo(undo);
        }
        self.bar.clear_error();
        self.bar.set_counter(0, 0);
    }

    /// Move the current flag to the 0-based `index` and scroll its
    /// marker into view.
    fn focus_match(&mut self, index: usize) {
        if let Some(previous) = self.session.current_marker() {
            self.doc.remove_class(previous, CURRENT_CLASS);
        }
        for span in &mut self.session.highlight_set {
            span.current = false;
        }

        let span = &mut self.session.highlight_set[index];
        span.current = true;
        let marker = span.marker;
        self.doc.add_class(marker, CURRENT_CLASS);
        self.session.current_match_index = index + 1;
        self.bar
            .set_counter(self.session.current_match_index, self.session.total_matches);
        self.viewport
            .scroll_into_view(marker, ScrollOptions::centered());
    }

    /// Re-run the active search after a toggle change.
    fn research(&mut self) {
        if self.session.search_term.chars().count() >= MIN_TERM_LEN {
            let term = self.session.search_term.clone();
            self.search(&term);
        }
    }

    fn persist(&mut self) {
        self.settings
            .set(SETTING_SEARCH_TERM, &self.session.search_term);
        set_bool(
            self.settings.as_mut(),
            SETTING_ACCENT_FOLD,
            self.session.accent_fold,
        );
        set_bool(
            self.settings.as_mut(),
            SETTING_CASE_SENSITIVE,
            self.session.case_sensitive,
        );
    }
}
