//! Virtual table: the windowing engine plus columns, sorting and row selection.

mod column;
mod selection;
mod sort;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use vwindow::{ScrollBehavior, WindowOptions, WindowRange};

use crate::engine::{EngineOptions, OnLazyLoad, OnRenderComplete, Tick, VirtualScroll};
use crate::surface::TableSurface;
use crate::{BoxError, Error};

pub use column::{CellRenderer, Column, FieldValue, HeaderCell, Row};
pub use selection::{Modifiers, Selection, SelectionState};
pub use sort::{SortDirection, SortState, sort_order};

/// Renders one row from its resolved cell texts (one per column, in column order).
pub type RenderRow<T, N> = Arc<dyn Fn(&T, usize, &[String]) -> Result<N, BoxError> + Send + Sync>;

/// Fired with the selected indices (ascending) whenever the selection changes.
pub type OnSelectionChange = Arc<dyn Fn(&[usize]) + Send + Sync>;

pub struct TableOptions<T, N> {
    pub window: WindowOptions,
    pub columns: Vec<Column<T>>,
    pub render_row: RenderRow<T, N>,
    pub selectable: bool,
    pub on_selection_change: Option<OnSelectionChange>,
    pub on_render_complete: Option<OnRenderComplete>,
    pub on_lazy_load: Option<OnLazyLoad<N>>,
}

impl<T, N> TableOptions<T, N> {
    pub fn new(
        columns: Vec<Column<T>>,
        render_row: impl Fn(&T, usize, &[String]) -> Result<N, BoxError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            window: WindowOptions::default(),
            columns,
            render_row: Arc::new(render_row),
            selectable: true,
            on_selection_change: None,
            on_render_complete: None,
            on_lazy_load: None,
        }
    }

    pub fn with_window(mut self, window: WindowOptions) -> Self {
        self.window = window;
        self
    }

    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn with_on_selection_change(
        mut self,
        f: Option<impl Fn(&[usize]) + Send + Sync + 'static>,
    ) -> Self {
        self.on_selection_change = f.map(|f| Arc::new(f) as _);
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

impl<T, N> core::fmt::Debug for TableOptions<T, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TableOptions")
            .field("window", &self.window)
            .field("columns", &self.columns)
            .field("selectable", &self.selectable)
            .finish_non_exhaustive()
    }
}

/// A [`VirtualScroll`] specialized for tabular rows.
///
/// Rows are rendered through the column definitions; the surface additionally shows a header,
/// a sort indicator and per-row selection marks.
pub struct VirtualTable<T, S: TableSurface> {
    engine: VirtualScroll<T, S>,
    columns: Arc<[Column<T>]>,
    selectable: bool,
    selection: Selection,
    sort: Option<SortState>,
    on_selection_change: Option<OnSelectionChange>,
}

impl<T: Row + 'static, S: TableSurface> VirtualTable<T, S>
where
    S::Node: 'static,
{
    pub fn new(surface: S, options: TableOptions<T, S::Node>) -> Result<Self, Error> {
        let columns: Arc<[Column<T>]> = options.columns.into();
        let render_item = {
            let columns = Arc::clone(&columns);
            let render_row = options.render_row;
            move |row: &T, index: usize| {
                let cells: Vec<String> = columns.iter().map(|c| c.cell_text(row, index)).collect();
                render_row(row, index, &cells)
            }
        };

        let mut engine_options = EngineOptions::new(render_item).with_window(options.window);
        engine_options.on_render_complete = options.on_render_complete;
        engine_options.on_lazy_load = options.on_lazy_load;

        let mut engine = VirtualScroll::new(surface, engine_options)?;
        let headers: Vec<HeaderCell> = columns.iter().map(Column::header).collect();
        engine.surface_mut().render_header(&headers);
        engine.surface_mut().set_sort_indicator(None);

        Ok(Self {
            engine,
            columns,
            selectable: options.selectable,
            selection: Selection::new(),
            sort: None,
            on_selection_change: options.on_selection_change,
        })
    }

    pub fn engine(&self) -> &VirtualScroll<T, S> {
        &self.engine
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn sort_state(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    /// Replaces the rows, taken in the order given. Clears the selection and the sort state.
    pub fn set_items(&mut self, items: Vec<T>) {
        if self.engine.is_destroyed() {
            return;
        }
        self.engine.set_items(items);
        if self.sort.take().is_some() {
            self.engine.surface_mut().set_sort_indicator(None);
        }
        if self.selection.clear() {
            self.emit_selection_change();
        }
        self.paint_selection();
    }

    pub fn update_item(&mut self, index: usize, item: T) -> Result<bool, Error> {
        let updated = self.engine.update_item(index, item)?;
        if updated {
            self.paint_row(index);
        }
        Ok(updated)
    }

    /// Sorts by `field`, toggling direction when `field` is already the active column.
    ///
    /// Returns `false` (and does nothing) for an unknown or non-sortable column. The selection
    /// follows its rows through the reorder.
    pub fn sort(&mut self, field: &str) -> bool {
        if self.engine.is_destroyed() {
            return false;
        }
        if !self.columns.iter().any(|c| c.sortable && c.field == field) {
            vwarn!(field, "sort requested on a non-sortable column");
            return false;
        }

        let next = SortState::next(self.sort.as_ref(), field);
        vdebug!(field, direction = ?next.direction, "VirtualTable::sort");
        let order = sort_order(self.engine.items(), &next);
        self.engine.reorder(&order);
        self.selection.remap(&order);
        self.engine.surface_mut().set_sort_indicator(Some(&next));
        self.sort = Some(next);
        true
    }

    /// Applies a row click. Returns `true` if the selection changed.
    pub fn click_row(&mut self, index: usize, modifiers: Modifiers) -> bool {
        if !self.selectable || self.engine.is_destroyed() || index >= self.engine.len() {
            return false;
        }
        let changed = self.selection.click(index, modifiers);
        if changed {
            self.emit_selection_change();
            self.paint_selection();
        }
        changed
    }

    pub fn clear_selection(&mut self) {
        if self.selection.clear() {
            self.emit_selection_change();
            self.paint_selection();
        }
    }

    /// Selected rows in index order.
    pub fn selected_items(&self) -> Vec<&T> {
        let items = self.engine.items();
        self.selection
            .indices()
            .filter_map(|i| items.get(i))
            .collect()
    }

    pub fn visible_items(&self) -> &[T] {
        self.engine.visible_items()
    }

    pub fn scroll_progress(&self) -> f64 {
        self.engine.scroll_progress()
    }

    pub fn scroll_to_index(&mut self, index: usize, behavior: ScrollBehavior) -> Option<u64> {
        self.engine.scroll_to_index(index, behavior)
    }

    pub fn scroll_to_top(&mut self, behavior: ScrollBehavior) {
        self.engine.scroll_to_top(behavior);
    }

    pub fn scroll_to_bottom(&mut self, behavior: ScrollBehavior) {
        self.engine.scroll_to_bottom(behavior);
    }

    pub fn refresh(&mut self) {
        self.engine.refresh();
    }

    pub fn destroy(&mut self) {
        self.engine.destroy();
    }

    pub fn on_scroll(&mut self, offset: u64) {
        self.engine.on_scroll(offset);
    }

    pub fn on_resize(&mut self) -> bool {
        self.engine.on_resize()
    }

    pub fn notify_intersection(&mut self, index: usize) {
        self.engine.notify_intersection(index);
    }

    pub fn tick(&mut self, now_ms: u64) -> Result<Tick, Error> {
        let tick = self.engine.tick(now_ms)?;
        if matches!(tick, Tick::Committed(_)) {
            self.paint_selection();
        }
        Ok(tick)
    }

    pub fn run_until_idle(&mut self, mut now_ms: u64) -> Result<u64, Error> {
        let step = self.engine.options().window.frame_interval_ms.max(1);
        loop {
            self.tick(now_ms)?;
            if self.engine.is_idle() {
                return Ok(now_ms);
            }
            now_ms = now_ms.saturating_add(step);
        }
    }

    fn emit_selection_change(&self) {
        if let Some(cb) = &self.on_selection_change {
            let indices = self.selection.to_vec();
            cb(&indices);
        }
    }

    fn paint_selection(&mut self) {
        let Some(range) = self.engine.rendered_range() else {
            return;
        };
        for (slot, index) in range.as_range().enumerate() {
            let selected = self.selection.contains(index);
            self.engine.surface_mut().set_row_selected(slot, selected);
        }
    }

    fn paint_row(&mut self, index: usize) {
        let Some(slot) = self.engine.rendered_range().and_then(|r| r.slot_of(index)) else {
            return;
        };
        let selected = self.selection.contains(index);
        self.engine.surface_mut().set_row_selected(slot, selected);
    }
}

impl<T, S: TableSurface> core::fmt::Debug for VirtualTable<T, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualTable")
            .field("engine", &self.engine)
            .field("columns", &self.columns.len())
            .field("selection", &self.selection)
            .field("sort", &self.sort)
            .finish_non_exhaustive()
    }
}
