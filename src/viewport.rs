//! Scroll-into-view collaborator interface.

use crate::document::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOptions {
    pub center: bool,
    pub smooth: bool,
}

impl ScrollOptions {
    /// Centered smooth scrolling, as used when focusing a match.
    pub fn centered() -> Self {
        Self {
            center: true,
            smooth: true,
        }
    }
}

/// Host capability to bring a node into the visible viewport.
///
/// Fire-and-forget: the engine never depends on the scroll having
/// completed.
pub trait Viewport {
    fn scroll_into_view(&mut self, node: NodeId, opts: ScrollOptions);
}

/// Viewport that ignores scroll requests (headless hosts, CLI).
pub struct NullViewport;

impl Viewport for NullViewport {
    fn scroll_into_view(&mut self, _node: NodeId, _opts: ScrollOptions) {}
}
