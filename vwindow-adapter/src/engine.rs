use alloc::sync::Arc;
use alloc::vec::Vec;

use vwindow::{ConfigError, ScrollBehavior, Window, WindowOptions, WindowRange};

use crate::batch::{BatchRenderer, BatchStep};
use crate::scheduler::FrameScheduler;
use crate::surface::{Capabilities, Surface};
use crate::tween::{Easing, ScrollTween};
use crate::{BoxError, Error};

/// Renders one item. Receives the item and its index in the collection.
pub type RenderItem<T, N> = Arc<dyn Fn(&T, usize) -> Result<N, BoxError> + Send + Sync>;

/// Fired after a render pass is committed, with the committed window.
pub type OnRenderComplete = Arc<dyn Fn(WindowRange) + Send + Sync>;

/// Fired the first time a committed item is reported as intersecting the viewport.
pub type OnLazyLoad<N> = Arc<dyn Fn(usize, &N) + Send + Sync>;

/// Consecutive re-render passes allowed when measurement shrinks a commit below the viewport.
const MAX_REFILL_PASSES: u8 = 4;

/// Configuration for [`VirtualScroll`]: plain window options plus callbacks.
pub struct EngineOptions<T, N> {
    pub window: WindowOptions,
    pub render_item: RenderItem<T, N>,
    pub on_render_complete: Option<OnRenderComplete>,
    pub on_lazy_load: Option<OnLazyLoad<N>>,
}

impl<T, N> Clone for EngineOptions<T, N> {
    fn clone(&self) -> Self {
        Self {
            window: self.window,
            render_item: Arc::clone(&self.render_item),
            on_render_complete: self.on_render_complete.clone(),
            on_lazy_load: self.on_lazy_load.clone(),
        }
    }
}

impl<T, N> EngineOptions<T, N> {
    pub fn new(
        render_item: impl Fn(&T, usize) -> Result<N, BoxError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            window: WindowOptions::default(),
            render_item: Arc::new(render_item),
            on_render_complete: None,
            on_lazy_load: None,
        }
    }

    pub fn with_window(mut self, window: WindowOptions) -> Self {
        self.window = window;
        self
    }

    pub fn with_on_render_complete(
        mut self,
        f: Option<impl Fn(WindowRange) + Send + Sync + 'static>,
    ) -> Self {
        self.on_render_complete = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_lazy_load(mut self, f: Option<impl Fn(usize, &N) + Send + Sync + 'static>) -> Self {
        self.on_lazy_load = f.map(|f| Arc::new(f) as _);
        self
    }
}

impl<T, N> core::fmt::Debug for EngineOptions<T, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EngineOptions")
            .field("window", &self.window)
            .field("on_render_complete", &self.on_render_complete.is_some())
            .field("on_lazy_load", &self.on_lazy_load.is_some())
            .finish_non_exhaustive()
    }
}

/// What a [`VirtualScroll::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Nothing to do; no further ticks are needed until the next event.
    Idle,
    /// Work is scheduled for a later tick (debounce or tween in progress).
    Pending,
    /// A render pass advanced by one batch.
    Rendering { rendered: usize, total: usize },
    /// A render pass was committed to the surface.
    Committed(WindowRange),
}

/// A windowing engine bound to one host [`Surface`].
///
/// Items are owned by the engine. Scroll and resize signals come in through
/// [`Self::on_scroll`] / [`Self::on_resize`]; the host calls [`Self::tick`] once per display
/// refresh to let the engine recompute the window and render it in batches.
pub struct VirtualScroll<T, S: Surface> {
    surface: S,
    options: EngineOptions<T, S::Node>,
    capabilities: Capabilities,
    window: Window,
    items: Vec<T>,

    scheduler: FrameScheduler,
    batch: BatchRenderer<S::Node>,
    requested: Option<WindowRange>,
    rendered: Option<WindowRange>,

    lazy_load: bool,
    lazy_fired: Vec<bool>,
    tween: Option<ScrollTween>,
    refills: u8,
    destroyed: bool,
}

impl<T, S: Surface> VirtualScroll<T, S> {
    /// Binds an engine to `surface`.
    ///
    /// Fails if the surface is not attached or the window options are invalid. Missing
    /// observer support disables the matching feature instead of failing.
    pub fn new(mut surface: S, options: EngineOptions<T, S::Node>) -> Result<Self, Error> {
        if !surface.is_attached() {
            return Err(ConfigError::ContainerUnavailable.into());
        }
        let mut window = Window::new(options.window, 0)?;

        let capabilities = surface.capabilities();
        let mut lazy_load = options.window.lazy_load;
        if lazy_load && !capabilities.intersection_observer {
            vwarn!("intersection observation unavailable; lazy loading disabled");
            lazy_load = false;
        }
        if !capabilities.resize_observer {
            vwarn!("resize observation unavailable; call refresh() after layout changes");
        }

        let axis = options.window.axis;
        window.set_viewport_size(surface.viewport_size(axis));
        surface.set_extent(axis, 0);
        vdebug!(
            viewport = window.viewport_size(),
            lazy_load,
            "VirtualScroll::new"
        );

        Ok(Self {
            surface,
            batch: BatchRenderer::new(options.window.render_batch),
            options,
            capabilities,
            window,
            items: Vec::new(),
            scheduler: FrameScheduler::new(),
            requested: None,
            rendered: None,
            lazy_load,
            lazy_fired: Vec::new(),
            tween: None,
            refills: 0,
            destroyed: false,
        })
    }

    pub fn options(&self) -> &EngineOptions<T, S::Node> {
        &self.options
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_lazy_load_enabled(&self) -> bool {
        self.lazy_load
    }

    /// Whether no frame, debounce, render pass or tween is outstanding.
    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle() && !self.batch.is_busy() && self.tween.is_none()
    }

    pub fn total_size(&self) -> u64 {
        self.window.total_size()
    }

    /// The window the engine currently wants materialized (buffer included).
    pub fn range(&self) -> WindowRange {
        if self.destroyed {
            return WindowRange::EMPTY;
        }
        self.window.range()
    }

    /// The window last committed to the surface.
    pub fn rendered_range(&self) -> Option<WindowRange> {
        self.rendered
    }

    /// Items inside the current window, buffer included.
    pub fn visible_items(&self) -> &[T] {
        &self.items[self.range().as_range()]
    }

    pub fn scroll_progress(&self) -> f64 {
        self.window.scroll_progress()
    }

    /// Replaces the collection.
    ///
    /// Drops every cached height, resets the scroll position to the top, abandons any render
    /// pass started for the previous collection and schedules a full render.
    pub fn set_items(&mut self, items: Vec<T>) {
        if self.destroyed {
            return;
        }
        vdebug!(count = items.len(), "VirtualScroll::set_items");
        let axis = self.options.window.axis;
        self.items = items;
        self.window.reset(self.items.len());
        self.batch.invalidate();
        self.tween = None;
        self.requested = None;
        self.refills = 0;

        self.surface.set_extent(axis, self.window.total_size());
        self.surface.scroll_to(axis, 0, ScrollBehavior::Instant);
        self.request_render();
    }

    /// Replaces a single item, re-rendering only its node when it is materialized.
    ///
    /// Returns `Ok(false)` for an out-of-range index.
    pub fn update_item(&mut self, index: usize, item: T) -> Result<bool, Error> {
        if self.destroyed || index >= self.items.len() {
            return Ok(false);
        }
        self.items[index] = item;

        if self
            .batch
            .in_flight()
            .is_some_and(|pass| pass.contains(index))
        {
            self.batch.queue_rerun();
        }

        let Some(slot) = self.rendered.and_then(|r| r.slot_of(index)) else {
            return Ok(true);
        };
        vtrace!(index, slot, "VirtualScroll::update_item");
        let node = self.render_node(index)?;
        self.surface.replace_node(slot, node);
        if self.window.heights().is_dynamic() && self.measure_slot(index, slot) {
            self.sync_extent();
            if self.should_refill() {
                self.request_render();
            }
        }
        if self.lazy_load {
            if let Some(fired) = self.lazy_fired.get_mut(slot) {
                *fired = false;
            }
            self.surface.observe_intersection(slot);
        }
        Ok(true)
    }

    /// Scrolls so that `index` sits at the start of the viewport.
    ///
    /// Returns the target offset, or `None` (and does nothing) for an out-of-range index.
    pub fn scroll_to_index(&mut self, index: usize, behavior: ScrollBehavior) -> Option<u64> {
        if self.destroyed {
            return None;
        }
        let target = self.window.scroll_to_index_offset(index)?;
        self.scroll_to_offset(target, behavior);
        Some(target)
    }

    pub fn scroll_to_top(&mut self, behavior: ScrollBehavior) {
        self.scroll_to_offset(0, behavior);
    }

    pub fn scroll_to_bottom(&mut self, behavior: ScrollBehavior) {
        let bottom = self.window.max_scroll_offset();
        self.scroll_to_offset(bottom, behavior);
    }

    fn scroll_to_offset(&mut self, offset: u64, behavior: ScrollBehavior) {
        if self.destroyed {
            return;
        }
        let axis = self.options.window.axis;
        let offset = self.window.clamp_scroll_offset(offset);
        vtrace!(offset, ?behavior, "VirtualScroll::scroll_to_offset");
        self.tween = None;

        match behavior {
            ScrollBehavior::Smooth if self.capabilities.smooth_scroll => {
                // The host animates and reports progress through `on_scroll`.
                self.surface.scroll_to(axis, offset, ScrollBehavior::Smooth);
            }
            ScrollBehavior::Smooth => {
                self.tween = Some(ScrollTween::new(
                    self.window.scroll_offset(),
                    offset,
                    self.options.window.smooth_scroll_ms,
                    Easing::default(),
                ));
            }
            ScrollBehavior::Instant => {
                self.surface.scroll_to(axis, offset, ScrollBehavior::Instant);
                self.apply_scroll(offset);
            }
        }
    }

    /// Re-measures the viewport and forces a full recompute and render.
    pub fn refresh(&mut self) {
        if self.destroyed {
            return;
        }
        let axis = self.options.window.axis;
        let viewport = self.surface.viewport_size(axis);
        vdebug!(viewport, "VirtualScroll::refresh");
        self.window.set_viewport_size(viewport);
        self.surface.set_extent(axis, self.window.total_size());
        self.request_render();
    }

    /// Releases observers, timers and the surface scaffold. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        vdebug!("VirtualScroll::destroy");
        self.destroyed = true;
        self.scheduler.cancel();
        self.batch.cancel();
        self.batch.invalidate();
        self.tween = None;
        self.requested = None;
        self.rendered = None;
        self.lazy_fired.clear();
        self.surface.disconnect_observers();
        self.surface.teardown();
    }

    /// Scroll signal from the host.
    ///
    /// The offset is cached immediately; the window is recomputed on the next tick from
    /// whatever offset is latest by then. A user scroll cancels an engine-driven smooth scroll.
    pub fn on_scroll(&mut self, offset: u64) {
        if self.destroyed {
            return;
        }
        if self.tween.is_some_and(|t| !t.is_own_echo(offset)) {
            vtrace!(offset, "user scroll cancels tween");
            self.tween = None;
        }
        self.apply_scroll(offset);
    }

    /// Resize signal from the host. Returns `true` if the change triggered a refresh.
    pub fn on_resize(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        let size = self.surface.viewport_size(self.options.window.axis);
        if size.abs_diff(self.window.viewport_size()) <= 1 {
            return false;
        }
        self.refresh();
        true
    }

    /// Intersection signal from the host for a committed item.
    ///
    /// Fires the lazy-load hook at most once per committed node.
    pub fn notify_intersection(&mut self, index: usize) {
        if self.destroyed || !self.lazy_load {
            return;
        }
        let Some(slot) = self.rendered.and_then(|r| r.slot_of(index)) else {
            return;
        };
        let Some(fired) = self.lazy_fired.get_mut(slot) else {
            return;
        };
        if core::mem::replace(fired, true) {
            return;
        }
        if let (Some(cb), Some(node)) = (&self.options.on_lazy_load, self.surface.node(slot)) {
            cb(index, node);
        }
    }

    /// Advances the engine by one display refresh.
    ///
    /// Order within a tick: smooth-scroll step, expired debounce, window recompute (if a scroll
    /// frame is pending), then one render batch.
    pub fn tick(&mut self, now_ms: u64) -> Result<Tick, Error> {
        if self.destroyed {
            return Ok(Tick::Idle);
        }

        if let Some(tween) = self.tween.as_mut() {
            let offset = tween.advance(now_ms);
            let done = tween.is_done(now_ms);
            self.surface
                .scroll_to(self.options.window.axis, offset, ScrollBehavior::Instant);
            self.apply_scroll(offset);
            if done {
                self.tween = None;
            }
        }

        // A debounce that expired since the last tick fires before this frame may restart it.
        if self.scheduler.take_due(now_ms) {
            self.refills = 0;
            self.request_render();
        }

        if self.scheduler.take_frame() {
            self.recompute(now_ms);
        }

        if let Some(outcome) = self.step_render()? {
            return Ok(outcome);
        }

        Ok(if self.is_idle() {
            Tick::Idle
        } else {
            Tick::Pending
        })
    }

    /// Drives ticks with virtual time until the engine is idle. Returns the final time.
    ///
    /// Intended for hosts without a display-refresh callback, and for tests.
    pub fn run_until_idle(&mut self, mut now_ms: u64) -> Result<u64, Error> {
        let step = self.options.window.frame_interval_ms.max(1);
        loop {
            self.tick(now_ms)?;
            if self.is_idle() {
                return Ok(now_ms);
            }
            now_ms = now_ms.saturating_add(step);
        }
    }

    /// Permutes the collection in place (`order[new_index] == old_index`) and schedules a full
    /// render. Measured heights follow their items.
    pub(crate) fn reorder(&mut self, order: &[usize]) {
        if self.destroyed || order.len() != self.items.len() {
            return;
        }
        let mut old: Vec<Option<T>> = self.items.drain(..).map(Some).collect();
        self.items = order
            .iter()
            .filter_map(|&i| old.get_mut(i).and_then(Option::take))
            .collect();
        debug_assert_eq!(self.items.len(), order.len(), "order must be a permutation");

        self.window.permute(order);
        self.batch.invalidate();
        self.requested = None;
        self.surface
            .set_extent(self.options.window.axis, self.window.total_size());
        self.request_render();
    }

    pub(crate) fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn apply_scroll(&mut self, offset: u64) {
        self.window.set_scroll_offset(offset);
        if self.scheduler.request_frame() {
            vtrace!(offset, "frame scheduled");
        }
    }

    fn recompute(&mut self, now_ms: u64) {
        let visible = self.window.visible_range();
        let next = self.window.range();
        let current = self.batch.in_flight().or(self.requested);
        if vwindow::range::needs_render(current, next, visible, self.options.window.threshold) {
            self.scheduler
                .arm_debounce(now_ms, self.options.window.debounce_delay_ms);
        } else {
            vtrace!(
                start = next.start_index,
                end = next.end_index,
                "recompute suppressed"
            );
        }
    }

    fn request_render(&mut self) {
        if self.batch.is_busy() {
            self.batch.queue_rerun();
            return;
        }
        self.start_pass();
    }

    fn start_pass(&mut self) {
        let range = self.window.range();
        self.requested = Some(range);
        if range.is_empty() {
            self.commit(range, Vec::new());
            return;
        }
        self.batch.start(range);
    }

    fn step_render(&mut self) -> Result<Option<Tick>, Error> {
        let items = &self.items;
        let render_item = &self.options.render_item;
        let surface = &mut self.surface;
        let step = self.batch.step(|index| {
            let content = render_item(&items[index], index)
                .map_err(|source| Error::Render { index, source })?;
            Ok(surface.wrap_item(index, content))
        });

        let step = match step {
            Ok(step) => step,
            Err(err) => {
                self.requested = self.rendered;
                return Err(err);
            }
        };

        match step {
            BatchStep::Idle => Ok(None),
            BatchStep::Progress { rendered, total } => {
                Ok(Some(Tick::Rendering { rendered, total }))
            }
            BatchStep::Discarded => {
                if self.batch.take_rerun() {
                    self.start_pass();
                }
                Ok(Some(Tick::Pending))
            }
            BatchStep::Done { range, nodes } => {
                let remeasured = self.commit(range, nodes);
                let rerun = self.batch.take_rerun();
                if rerun || (remeasured && self.should_refill()) {
                    self.start_pass();
                } else {
                    self.refills = 0;
                }
                Ok(Some(Tick::Committed(range)))
            }
        }
    }

    /// Replaces the surface content with a finished pass. Returns `true` if measuring the new
    /// nodes changed the height model.
    fn commit(&mut self, range: WindowRange, nodes: Vec<S::Node>) -> bool {
        let axis = self.options.window.axis;
        let translate = self.window.offset_of(range.start_index);
        vdebug!(
            start = range.start_index,
            end = range.end_index,
            translate,
            "commit"
        );
        self.surface.replace_content(axis, translate, nodes);
        self.rendered = Some(range);

        let mut remeasured = false;
        if self.window.heights().is_dynamic() {
            for (slot, index) in range.as_range().enumerate() {
                remeasured |= self.measure_slot(index, slot);
            }
            if remeasured {
                self.sync_extent();
            }
        }

        self.lazy_fired.clear();
        if self.lazy_load {
            self.lazy_fired.resize(range.len(), false);
            for slot in 0..range.len() {
                self.surface.observe_intersection(slot);
            }
        }

        if let Some(cb) = &self.options.on_render_complete {
            cb(range);
        }
        remeasured
    }

    /// Whether the committed window stopped covering the viewport after re-measurement and
    /// another pass is still allowed.
    fn should_refill(&mut self) -> bool {
        let visible = self.window.visible_range();
        if self.rendered.is_none_or(|r| r.covers(visible)) {
            return false;
        }
        if self.refills >= MAX_REFILL_PASSES {
            vwarn!(
                start = visible.start_index,
                end = visible.end_index,
                "measured heights keep shifting; leaving viewport partially rendered"
            );
            return false;
        }
        self.refills += 1;
        vdebug!(
            start = visible.start_index,
            end = visible.end_index,
            refills = self.refills,
            "re-rendering uncovered viewport"
        );
        true
    }

    fn render_node(&mut self, index: usize) -> Result<S::Node, Error> {
        let content = (self.options.render_item)(&self.items[index], index)
            .map_err(|source| Error::Render { index, source })?;
        Ok(self.surface.wrap_item(index, content))
    }

    /// Measures a committed node and records its height. Returns `true` if the model changed.
    fn measure_slot(&mut self, index: usize, slot: usize) -> bool {
        let px = self.surface.measure(self.options.window.axis, slot);
        if !(px.is_finite() && px > 0.0) {
            vwarn!(index, px, "item not laid out yet; keeping estimate");
            return false;
        }
        let px = (px + 0.5).min(u32::MAX as f64) as u32;
        self.window.record_height(index, px)
    }

    /// Pushes the current extent to the surface and re-anchors the committed content.
    fn sync_extent(&mut self) {
        let axis = self.options.window.axis;
        self.surface.set_extent(axis, self.window.total_size());
        if let Some(range) = self.rendered {
            self.surface
                .set_translate(axis, self.window.offset_of(range.start_index));
        }
    }
}

impl<T, S: Surface> core::fmt::Debug for VirtualScroll<T, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualScroll")
            .field("window", &self.window)
            .field("len", &self.items.len())
            .field("requested", &self.requested)
            .field("rendered", &self.rendered)
            .field("lazy_load", &self.lazy_load)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}
