use crate::{Axis, ConfigError};

/// Configuration for [`crate::Window`] and the engines built on top of it.
///
/// This is plain data (no callbacks) so it can be copied freely and, with
/// `feature = "serde"`, loaded from a host's configuration file. Missing fields
/// deserialize to their defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindowOptions {
    /// Height of every item in fixed mode, and the seed of the running average in dynamic mode.
    pub item_height: u32,
    /// Extra items materialized on each side of the visible window.
    pub buffer: usize,
    /// Recompute suppression threshold, in items.
    ///
    /// A new window whose ends both moved by less than this is not rendered, as long as the
    /// currently materialized window still covers everything that is visible.
    pub threshold: usize,
    /// Number of items materialized per frame by the batch renderer.
    pub render_batch: usize,
    /// Delay between a settled scroll frame and the render it triggers.
    pub debounce_delay_ms: u64,
    /// Interval used when the host drives frames from a timer instead of display refreshes.
    pub frame_interval_ms: u64,
    /// Duration of engine-driven smooth scrolls (used when the host has no native smooth scroll).
    pub smooth_scroll_ms: u64,
    /// Measure items after render instead of assuming a uniform `item_height`.
    pub dynamic_height: bool,
    pub axis: Axis,
    /// Observe committed items for intersection and report them through the lazy-load hook.
    pub lazy_load: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            item_height: 50,
            buffer: 5,
            threshold: 100,
            render_batch: 20,
            debounce_delay_ms: 10,
            frame_interval_ms: 16,
            smooth_scroll_ms: 250,
            dynamic_height: false,
            axis: Axis::Vertical,
            lazy_load: false,
        }
    }
}

impl WindowOptions {
    pub fn new(item_height: u32) -> Self {
        Self {
            item_height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_height == 0 {
            return Err(ConfigError::ZeroItemHeight);
        }
        if self.render_batch == 0 {
            return Err(ConfigError::ZeroRenderBatch);
        }
        Ok(())
    }

    pub fn with_item_height(mut self, item_height: u32) -> Self {
        self.item_height = item_height;
        self
    }

    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_render_batch(mut self, render_batch: usize) -> Self {
        self.render_batch = render_batch;
        self
    }

    pub fn with_debounce_delay_ms(mut self, delay_ms: u64) -> Self {
        self.debounce_delay_ms = delay_ms;
        self
    }

    pub fn with_frame_interval_ms(mut self, interval_ms: u64) -> Self {
        self.frame_interval_ms = interval_ms;
        self
    }

    pub fn with_smooth_scroll_ms(mut self, duration_ms: u64) -> Self {
        self.smooth_scroll_ms = duration_ms;
        self
    }

    pub fn with_dynamic_height(mut self, dynamic_height: bool) -> Self {
        self.dynamic_height = dynamic_height;
        self
    }

    /// Lays the window out along the horizontal axis (`true`) or the vertical one.
    pub fn with_horizontal(mut self, horizontal: bool) -> Self {
        self.axis = if horizontal {
            Axis::Horizontal
        } else {
            Axis::Vertical
        };
        self
    }

    pub fn with_lazy_load(mut self, lazy_load: bool) -> Self {
        self.lazy_load = lazy_load;
        self
    }
}
