use crate::*;

use alloc::vec::Vec;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start))
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }
}

/// Naive per-item extents: measured heights where known, the rounded mean elsewhere.
fn expected_heights(measured: &[Option<u32>], seed: u32) -> Vec<u64> {
    let known: Vec<u64> = measured.iter().flatten().map(|&h| h as u64).collect();
    let avg = if known.is_empty() {
        seed as u64
    } else {
        let n = known.len() as u64;
        (known.iter().sum::<u64>() + n / 2) / n
    };
    measured
        .iter()
        .map(|m| m.map(|h| h as u64).unwrap_or(avg))
        .collect()
}

/// Naive linear walk used as the reference for the range calculator.
fn expected_visible_range(heights: &[u64], scroll_offset: u64, viewport: u32) -> WindowRange {
    let count = heights.len();
    if count == 0 {
        return WindowRange::EMPTY;
    }
    let total: u64 = heights.iter().sum();
    let view = viewport as u64;
    let offset = scroll_offset.min(total.saturating_sub(view));

    let mut start = count - 1;
    let mut acc = 0u64;
    for (i, &h) in heights.iter().enumerate() {
        if acc + h > offset {
            start = i;
            break;
        }
        acc += h;
    }
    if view == 0 {
        return WindowRange::new(start, start);
    }

    let target = offset + view;
    let mut end = count;
    let mut acc = 0u64;
    for (i, &h) in heights.iter().enumerate() {
        if acc >= target {
            end = i;
            break;
        }
        acc += h;
    }
    WindowRange::new(start, end.max(start))
}

fn window(count: usize, item_height: u32, viewport: u32) -> Window {
    let mut w = Window::new(WindowOptions::new(item_height), count).unwrap();
    w.set_viewport_size(viewport);
    w
}

#[test]
fn fixed_mode_initial_range_and_total() {
    let w = window(1000, 50, 500);
    assert_eq!(w.total_size(), 50_000);
    assert_eq!(w.visible_range(), WindowRange::new(0, 10));
    // 10 visible + buffer(5) at the end
    assert_eq!(w.range(), WindowRange::new(0, 15));
}

#[test]
fn fixed_mode_range_after_scroll() {
    let mut w = window(1000, 50, 500);
    w.set_scroll_offset(5000);
    assert_eq!(w.visible_range(), WindowRange::new(100, 110));
    assert_eq!(w.range(), WindowRange::new(95, 115));
}

#[test]
fn partially_visible_trailing_item_is_included() {
    let mut w = window(1000, 50, 500);
    w.set_scroll_offset(25);
    // viewport covers [25, 525): items 0..=10
    assert_eq!(w.visible_range(), WindowRange::new(0, 11));
}

#[test]
fn overscroll_clamps_to_end() {
    let mut w = window(1000, 50, 500);
    w.set_scroll_offset(10_000_000);
    let r = w.range();
    assert_eq!(r.end_index, 1000);
    assert_eq!(w.visible_range(), WindowRange::new(990, 1000));
}

#[test]
fn empty_collection_has_no_extent_and_no_window() {
    let w = window(0, 50, 500);
    assert_eq!(w.total_size(), 0);
    assert!(w.range().is_empty());
    assert_eq!(w.scroll_to_index_offset(5), None);
    assert_eq!(w.scroll_progress(), 0.0);
}

#[test]
fn zero_viewport_yields_empty_window_without_panicking() {
    let mut w = window(100, 20, 0);
    w.set_scroll_offset(300);
    assert!(w.visible_range().is_empty());
    assert!(w.range().is_empty());
}

#[test]
fn invalid_options_fail_fast() {
    assert_eq!(
        Window::new(WindowOptions::new(0), 10).unwrap_err(),
        ConfigError::ZeroItemHeight
    );
    assert_eq!(
        Window::new(WindowOptions::default().with_render_batch(0), 10).unwrap_err(),
        ConfigError::ZeroRenderBatch
    );
}

#[test]
fn dynamic_total_is_exact_once_everything_is_measured() {
    let opts = WindowOptions::new(50).with_dynamic_height(true);
    let mut w = Window::new(opts, 3).unwrap();
    assert_eq!(w.total_size(), 150);

    assert!(w.record_height(0, 40));
    // Unmeasured items now use the running average (40).
    assert_eq!(w.total_size(), 40 * 3);

    w.record_height(1, 60);
    w.record_height(2, 50);
    assert_eq!(w.total_size(), 150);
    assert_eq!(w.heights().average_height(), 50);
    assert_eq!(w.offset_of(2), 100);
}

#[test]
fn zero_height_measurement_keeps_previous_estimate() {
    let opts = WindowOptions::new(30).with_dynamic_height(true);
    let mut w = Window::new(opts, 4).unwrap();
    w.record_height(0, 10);
    assert!(!w.record_height(1, 0));
    assert!(!w.heights().is_measured(1));
    assert_eq!(w.heights().average_height(), 10);
    assert_eq!(w.total_size(), 40);
}

#[test]
fn remeasuring_replaces_previous_height() {
    let opts = WindowOptions::new(10).with_dynamic_height(true);
    let mut w = Window::new(opts, 2).unwrap();
    w.record_height(0, 10);
    w.record_height(0, 30);
    assert_eq!(w.heights().measured_count(), 1);
    assert_eq!(w.item(0).unwrap().size, 30);
    assert_eq!(w.total_size(), 60);
    assert!(!w.record_height(0, 30));
}

#[test]
fn fixed_mode_ignores_measurements() {
    let mut w = window(10, 20, 100);
    assert!(!w.record_height(3, 99));
    assert_eq!(w.total_size(), 200);
}

#[test]
fn reset_drops_measurements_and_scroll() {
    let opts = WindowOptions::new(20).with_dynamic_height(true);
    let mut w = Window::new(opts, 10).unwrap();
    w.set_viewport_size(50);
    w.record_height(0, 100);
    w.set_scroll_offset(80);

    w.reset(5);
    assert_eq!(w.count(), 5);
    assert_eq!(w.scroll_offset(), 0);
    assert_eq!(w.heights().measured_count(), 0);
    assert_eq!(w.total_size(), 100);
    assert_eq!(w.range().start_index, 0);
}

#[test]
fn uniform_dynamic_heights_match_fixed_mode() {
    let fixed = window(500, 24, 300);
    let mut dynamic =
        Window::new(WindowOptions::new(24).with_dynamic_height(true), 500).unwrap();
    dynamic.set_viewport_size(300);

    for offset in [0u64, 1, 23, 24, 25, 600, 5_000, 11_700, 12_000, 99_999] {
        assert_eq!(
            fixed.range_for(offset, 300),
            dynamic.range_for(offset, 300),
            "offset={offset}"
        );
    }
}

#[test]
fn permute_moves_heights_with_items() {
    let opts = WindowOptions::new(10).with_dynamic_height(true);
    let mut w = Window::new(opts, 3).unwrap();
    w.record_height(0, 100);
    w.record_height(2, 30);

    // new order: [old 2, old 1, old 0]
    w.permute(&[2, 1, 0]);
    assert_eq!(w.item(0).unwrap().size, 30);
    assert_eq!(w.item(2).unwrap().size, 100);
    assert!(!w.heights().is_measured(1));
    assert_eq!(w.total_size(), 100 + 30 + 65);
}

#[test]
fn scroll_progress_is_clamped() {
    let mut w = window(100, 10, 100);
    w.set_scroll_offset(450);
    assert_eq!(w.scroll_progress(), 0.5);
    w.set_scroll_offset(5_000);
    assert_eq!(w.scroll_progress(), 1.0);
}

#[test]
fn scroll_to_index_offset_is_clamped_to_max() {
    let w = window(100, 10, 100);
    assert_eq!(w.scroll_to_index_offset(3), Some(30));
    assert_eq!(w.scroll_to_index_offset(99), Some(900));
    assert_eq!(w.scroll_to_index_offset(100), None);
}

#[test]
fn needs_render_suppresses_small_covered_moves() {
    let current = WindowRange::new(95, 115);
    let visible = WindowRange::new(101, 111);
    let next = WindowRange::new(96, 116);
    assert!(!range::needs_render(Some(current), next, visible, 100));
    assert!(range::needs_render(Some(current), next, visible, 1));
    assert!(range::needs_render(None, next, visible, 100));

    // Visible window escaped the materialized one: always render.
    let visible = WindowRange::new(110, 120);
    assert!(range::needs_render(
        Some(current),
        WindowRange::new(105, 125),
        visible,
        100
    ));
}

#[test]
fn randomized_ranges_match_linear_walk() {
    let mut rng = Lcg::new(0x5eed);
    for _ in 0..200 {
        let count = rng.gen_range_usize(0, 80);
        let seed = rng.gen_range_u32(1, 40);
        let buffer = rng.gen_range_usize(0, 4);
        let opts = WindowOptions::new(seed)
            .with_dynamic_height(true)
            .with_buffer(buffer);
        let mut w = Window::new(opts, count).unwrap();

        let mut measured = alloc::vec![None; count];
        for _ in 0..rng.gen_range_usize(0, count + 1) {
            let i = rng.gen_range_usize(0, count);
            let h = rng.gen_range_u32(1, 60);
            w.record_height(i, h);
            measured[i] = Some(h);
        }

        let heights = expected_heights(&measured, seed);
        let total: u64 = heights.iter().sum();
        assert_eq!(w.total_size(), total);

        for _ in 0..10 {
            let viewport = rng.gen_range_u32(0, 400);
            let offset = rng.gen_range_u64(0, total + 200);
            let expected = expected_visible_range(&heights, offset, viewport);
            w.set_viewport_size(viewport);
            w.set_scroll_offset(offset);
            assert_eq!(w.visible_range(), expected);

            let r = w.range();
            assert!(r.start_index <= r.end_index && r.end_index <= count);
            assert!(r.covers(expected));
        }
    }
}

#[test]
fn every_intersecting_item_is_inside_the_window() {
    let mut rng = Lcg::new(7);
    let opts = WindowOptions::new(20)
        .with_dynamic_height(true)
        .with_buffer(0);
    let mut w = Window::new(opts, 300).unwrap();
    for i in 0..300 {
        w.record_height(i, rng.gen_range_u32(5, 80));
    }
    w.set_viewport_size(250);

    for offset in (0..w.max_scroll_offset()).step_by(37) {
        w.set_scroll_offset(offset);
        let r = w.range();
        let view_end = offset + 250;
        for i in 0..300 {
            let item = w.item(i).unwrap();
            if item.start < view_end && item.end() > offset {
                assert!(r.contains(i), "offset={offset}, item={i}, range={r:?}");
            }
        }
    }
}

#[cfg(feature = "serde")]
#[test]
fn options_deserialize_with_defaults() {
    let opts: WindowOptions =
        serde_json::from_str(r#"{ "item_height": 32, "axis": "horizontal" }"#).unwrap();
    assert_eq!(opts.item_height, 32);
    assert_eq!(opts.axis, Axis::Horizontal);
    assert_eq!(opts.buffer, 5);
    assert_eq!(opts.render_batch, 20);
}
