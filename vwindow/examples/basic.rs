// Example: fixed-height window math for a 1000-row list in a 500px viewport.
use vwindow::{ConfigError, Window, WindowOptions};

fn main() -> Result<(), ConfigError> {
    let mut w = Window::new(WindowOptions::new(50).with_buffer(5), 1_000)?;
    w.set_viewport_size(500);

    println!("total_size={}", w.total_size());
    println!("visible={:?} range={:?}", w.visible_range(), w.range());

    w.set_scroll_offset(5_000);
    println!("at 5000: visible={:?} range={:?}", w.visible_range(), w.range());
    println!("first_item={:?}", w.item(w.range().start_index));

    if let Some(off) = w.scroll_to_index_offset(999) {
        w.set_scroll_offset(off);
    }
    println!(
        "after scroll_to_index(999): offset={} progress={:.2} range={:?}",
        w.scroll_offset(),
        w.scroll_progress(),
        w.range()
    );
    Ok(())
}
