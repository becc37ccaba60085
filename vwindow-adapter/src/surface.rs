use alloc::vec::Vec;

use vwindow::{Axis, ScrollBehavior};

use crate::table::{HeaderCell, SortState};

/// Optional host features. Missing ones degrade the engine instead of failing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capabilities {
    /// The host reports viewport size changes by calling `on_resize`.
    ///
    /// Without it, callers must invoke `refresh` after layout changes.
    pub resize_observer: bool,
    /// The host can report committed items entering the viewport (`notify_intersection`).
    pub intersection_observer: bool,
    /// The host animates `ScrollBehavior::Smooth` scrolls itself.
    pub smooth_scroll: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            resize_observer: true,
            intersection_observer: true,
            smooth_scroll: true,
        }
    }
}

/// The host side of an engine: a scroll viewport, a spacer giving the scroll extent, and a
/// content layer holding the materialized items.
///
/// The engine owns this scaffold for its whole lifetime; nothing else should mutate it between
/// renders. Content nodes are addressed by *slot*, their position inside the committed window.
pub trait Surface {
    type Node;

    /// Whether the container exists and can host the scaffold.
    fn is_attached(&self) -> bool {
        true
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    /// Current viewport size along `axis`.
    fn viewport_size(&self, axis: Axis) -> u32;

    /// Sets the scrollable extent (spacer size) along `axis`.
    fn set_extent(&mut self, axis: Axis, extent: u64);

    fn scroll_to(&mut self, axis: Axis, offset: u64, behavior: ScrollBehavior);

    /// Wraps rendered item content in its per-item container.
    fn wrap_item(&mut self, index: usize, content: Self::Node) -> Self::Node {
        let _ = index;
        content
    }

    /// Replaces every content node in one operation and positions the first one at `translate`.
    fn replace_content(&mut self, axis: Axis, translate: u64, nodes: Vec<Self::Node>);

    /// Moves the content layer without touching its nodes.
    fn set_translate(&mut self, axis: Axis, translate: u64);

    fn replace_node(&mut self, slot: usize, node: Self::Node);

    fn node(&self, slot: usize) -> Option<&Self::Node>;

    /// Laid-out size of a committed node along `axis`. Non-positive means "not laid out yet".
    fn measure(&self, axis: Axis, slot: usize) -> f64;

    fn observe_intersection(&mut self, slot: usize) {
        let _ = slot;
    }

    fn disconnect_observers(&mut self) {}

    /// Removes the scaffold from the container.
    fn teardown(&mut self);
}

/// A [`Surface`] that also hosts a table header and per-row selection marks.
pub trait TableSurface: Surface {
    fn render_header(&mut self, headers: &[HeaderCell]);

    fn set_sort_indicator(&mut self, sort: Option<&SortState>);

    fn set_row_selected(&mut self, slot: usize, selected: bool);
}
