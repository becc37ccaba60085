//! Offset → index window math.

use crate::{HeightModel, WindowRange};

/// Computes the strictly visible window (no buffer) for a scroll position.
///
/// The scroll offset is clamped to the scrollable distance first, so overscroll resolves to a
/// window ending at `count`. A zero-sized viewport yields an empty window positioned at the item
/// under `scroll_offset`.
pub fn visible_range(heights: &HeightModel, scroll_offset: u64, viewport_size: u32) -> WindowRange {
    let count = heights.count();
    if count == 0 {
        return WindowRange::EMPTY;
    }

    let view = viewport_size as u64;
    let max_scroll = heights.total_height().saturating_sub(view);
    let offset = scroll_offset.min(max_scroll);

    let start = heights.index_at(offset).unwrap_or(0);
    if view == 0 {
        return WindowRange::new(start, start);
    }

    // The trailing item is included even when only partially visible.
    let end = heights
        .first_starting_at_or_after(offset.saturating_add(view))
        .clamp(start, count);
    WindowRange::new(start, end)
}

/// Computes the window to materialize: the visible window padded by `buffer` on both sides.
pub fn buffered_range(
    heights: &HeightModel,
    scroll_offset: u64,
    viewport_size: u32,
    buffer: usize,
) -> WindowRange {
    let visible = visible_range(heights, scroll_offset, viewport_size);
    pad(visible, buffer, heights.count())
}

/// Widens `visible` by `buffer` items on each side, clamped to `[0, count)`. Empty stays empty.
pub fn pad(visible: WindowRange, buffer: usize, count: usize) -> WindowRange {
    if visible.is_empty() {
        return visible;
    }
    WindowRange::new(
        visible.start_index.saturating_sub(buffer),
        visible.end_index.saturating_add(buffer).min(count),
    )
}

/// Decides whether moving from `current` to `next` warrants a render.
///
/// A render is skipped only when both ends moved by less than `threshold` items and the
/// materialized window still covers everything that is visible.
pub fn needs_render(
    current: Option<WindowRange>,
    next: WindowRange,
    visible: WindowRange,
    threshold: usize,
) -> bool {
    let Some(current) = current else {
        return true;
    };
    if current == next {
        return false;
    }
    if !current.covers(visible) {
        return true;
    }
    let start_delta = current.start_index.abs_diff(next.start_index);
    let end_delta = current.end_index.abs_diff(next.end_index);
    start_delta >= threshold || end_delta >= threshold
}
