use crate::range;
use crate::{ConfigError, HeightModel, ItemPlacement, WindowOptions, WindowRange};

/// Headless windowing state: a height model plus the current viewport and scroll offset.
///
/// This type holds no UI objects. An adapter feeds it viewport sizes, scroll offsets and
/// measured heights, and reads back the window to materialize.
#[derive(Clone, Debug)]
pub struct Window {
    options: WindowOptions,
    heights: HeightModel,
    viewport_size: u32,
    scroll_offset: u64,
}

impl Window {
    pub fn new(options: WindowOptions, count: usize) -> Result<Self, ConfigError> {
        options.validate()?;
        vdebug!(
            count,
            item_height = options.item_height,
            buffer = options.buffer,
            dynamic = options.dynamic_height,
            "Window::new"
        );
        let heights = if options.dynamic_height {
            HeightModel::dynamic(options.item_height, count)
        } else {
            HeightModel::fixed(options.item_height, count)
        };
        Ok(Self {
            options,
            heights,
            viewport_size: 0,
            scroll_offset: 0,
        })
    }

    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    pub fn heights(&self) -> &HeightModel {
        &self.heights
    }

    pub fn count(&self) -> usize {
        self.heights.count()
    }

    /// Replaces the item count, dropping every measured height and resetting the scroll offset.
    pub fn reset(&mut self, count: usize) {
        self.heights.reset(count);
        self.scroll_offset = 0;
    }

    /// Reorders measured heights to follow a permutation of the collection.
    pub fn permute(&mut self, order: &[usize]) {
        self.heights.permute(order);
        self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
    }

    pub fn viewport_size(&self) -> u32 {
        self.viewport_size
    }

    pub fn set_viewport_size(&mut self, size: u32) {
        self.viewport_size = size;
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    /// Caches a raw scroll offset as reported by the host (not clamped, overscroll is allowed).
    pub fn set_scroll_offset(&mut self, offset: u64) {
        vtrace!(offset, "Window::set_scroll_offset");
        self.scroll_offset = offset;
    }

    pub fn total_size(&self) -> u64 {
        self.heights.total_height()
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.total_size().saturating_sub(self.viewport_size as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// The window to materialize, buffer included.
    pub fn range(&self) -> WindowRange {
        range::buffered_range(
            &self.heights,
            self.scroll_offset,
            self.viewport_size,
            self.options.buffer,
        )
    }

    /// The strictly visible window, no buffer.
    pub fn visible_range(&self) -> WindowRange {
        range::visible_range(&self.heights, self.scroll_offset, self.viewport_size)
    }

    pub fn range_for(&self, scroll_offset: u64, viewport_size: u32) -> WindowRange {
        range::buffered_range(
            &self.heights,
            scroll_offset,
            viewport_size,
            self.options.buffer,
        )
    }

    pub fn item(&self, index: usize) -> Option<ItemPlacement> {
        let size = self.heights.height_of(index)?;
        Some(ItemPlacement {
            index,
            start: self.heights.offset_of(index),
            size,
        })
    }

    pub fn offset_of(&self, index: usize) -> u64 {
        self.heights.offset_of(index)
    }

    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        self.heights.index_at(offset)
    }

    /// Records a measured height. Returns `true` if the total extent may have changed.
    pub fn record_height(&mut self, index: usize, px: u32) -> bool {
        vtrace!(index, px, "Window::record_height");
        self.heights.record_height(index, px)
    }

    /// The clamped offset that brings `index` to the start of the viewport.
    ///
    /// Returns `None` for an out-of-range index.
    pub fn scroll_to_index_offset(&self, index: usize) -> Option<u64> {
        if index >= self.count() {
            return None;
        }
        Some(self.clamp_scroll_offset(self.heights.offset_of(index)))
    }

    /// Scroll position as a fraction of the scrollable distance, clamped to `[0, 1]`.
    pub fn scroll_progress(&self) -> f64 {
        let max = self.max_scroll_offset();
        if max == 0 {
            return 0.0;
        }
        (self.scroll_offset as f64 / max as f64).clamp(0.0, 1.0)
    }
}
