use vwindow_adapter::{
    Axis, BoxError, EngineOptions, ScrollBehavior, Surface, Tick, VirtualScroll, WindowOptions,
    WindowRange,
};

/// In-memory host: keeps the committed rows as strings and a fixed row height.
struct TextSurface {
    viewport: u32,
    extent: u64,
    translate: u64,
    rows: Vec<String>,
}

impl Surface for TextSurface {
    type Node = String;

    fn viewport_size(&self, _axis: Axis) -> u32 {
        self.viewport
    }

    fn set_extent(&mut self, _axis: Axis, extent: u64) {
        self.extent = extent;
    }

    fn scroll_to(&mut self, _axis: Axis, offset: u64, behavior: ScrollBehavior) {
        println!("  host scroll_to({offset}, {behavior:?})");
    }

    fn replace_content(&mut self, _axis: Axis, translate: u64, nodes: Vec<String>) {
        self.translate = translate;
        self.rows = nodes;
    }

    fn set_translate(&mut self, _axis: Axis, translate: u64) {
        self.translate = translate;
    }

    fn replace_node(&mut self, slot: usize, node: String) {
        if let Some(row) = self.rows.get_mut(slot) {
            *row = node;
        }
    }

    fn node(&self, slot: usize) -> Option<&String> {
        self.rows.get(slot)
    }

    fn measure(&self, _axis: Axis, _slot: usize) -> f64 {
        32.0
    }

    fn teardown(&mut self) {
        self.rows.clear();
    }
}

fn main() -> Result<(), vwindow_adapter::Error> {
    // Example: an adapter loop. Scroll events are forwarded as they arrive; `tick` runs once per
    // frame and the engine renders in batches, committing each window in one replacement.
    let surface = TextSurface {
        viewport: 480,
        extent: 0,
        translate: 0,
        rows: Vec::new(),
    };
    let options = EngineOptions::new(|row: &u32, index| -> Result<String, BoxError> {
        Ok(format!("#{index}: value {row}"))
    })
    .with_window(
        WindowOptions::new(40)
            .with_dynamic_height(true)
            .with_render_batch(8),
    )
    .with_on_render_complete(Some(|r: WindowRange| println!("  committed {r:?}")));
    let mut list = VirtualScroll::new(surface, options)?;

    list.set_items((0..50_000).map(|i| i * 7).collect());
    let mut now_ms = list.run_until_idle(0)?;
    println!(
        "initial: extent={} rows={} first={:?}",
        list.surface().extent,
        list.surface().rows.len(),
        list.surface().rows.first()
    );

    // A fling: several scroll events per frame, only the latest offset matters.
    for step in 1..=6u64 {
        list.on_scroll(step * 900);
        list.on_scroll(step * 1_000);
        now_ms += 16;
        if let Tick::Committed(range) = list.tick(now_ms)? {
            println!("t={now_ms} committed mid-scroll {range:?}");
        }
    }
    now_ms = list.run_until_idle(now_ms + 16)?;
    println!(
        "settled: range={:?} translate={} progress={:.3}",
        list.rendered_range(),
        list.surface().translate,
        list.scroll_progress()
    );

    list.scroll_to_index(25_000, ScrollBehavior::Instant);
    list.run_until_idle(now_ms + 16)?;
    println!(
        "jumped: range={:?} first={:?}",
        list.rendered_range(),
        list.surface().rows.first()
    );

    list.destroy();
    Ok(())
}
