//! Pariyesana - Pali Text Search Engine for Reading Environments
//!
//! Library providing Ctrl+F-style find-in-page search over a document
//! tree, with accent folding for diacritic-rich Pali/Sanskrit text.

// Fold table must be defined first as it's used by the find manager
pub mod fold;
pub mod document;
pub mod session;
pub mod find;
pub mod cache;
pub mod settings;
pub mod viewport;
pub mod error;

pub use error::FindError;
pub use document::{DocumentTree, HighlightUndo, NodeId, CURRENT_CLASS, HIGHLIGHT_CLASS};
pub use find::{Debouncer, FindBar, FindKey, FindManager, DEBOUNCE_DELAY, MIN_TERM_LEN};
pub use fold::accent_folded_pattern;
pub use session::{MatchSpan, SearchSession};
pub use settings::{
    MemorySettings, SettingsStore, SETTING_ACCENT_FOLD, SETTING_CASE_SENSITIVE,
    SETTING_SEARCH_TERM,
};
pub use cache::PatternCache;
pub use viewport::{NullViewport, ScrollOptions, Viewport};
