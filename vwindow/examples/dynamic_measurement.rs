// Example: dynamic heights. Unmeasured rows use the running average of measured ones.
use vwindow::{ConfigError, Window, WindowOptions};

fn main() -> Result<(), ConfigError> {
    let mut w = Window::new(WindowOptions::new(50).with_dynamic_height(true), 10_000)?;
    w.set_viewport_size(400);
    println!("estimated total_size={}", w.total_size());

    // An adapter measures rendered rows and feeds the heights back.
    for index in w.range().as_range() {
        let px = if index % 3 == 0 { 80 } else { 24 };
        w.record_height(index, px);
    }
    println!(
        "after measuring {} rows: average={} total_size={}",
        w.heights().measured_count(),
        w.heights().average_height(),
        w.total_size()
    );
    println!("visible={:?} range={:?}", w.visible_range(), w.range());

    w.set_scroll_offset(w.max_scroll_offset() / 2);
    let start = w.range().start_index;
    println!(
        "middle: range={:?} translate={}",
        w.range(),
        w.offset_of(start)
    );
    Ok(())
}
