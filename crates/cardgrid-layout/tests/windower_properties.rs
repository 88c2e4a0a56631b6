//! Property-based invariant tests for the windower.
//!
//! 1. Coverage: every row intersecting the viewport is materialized.
//! 2. Boundedness: item count is bounded by the viewport, not the list.
//! 3. Determinism: identical inputs give identical windows.
//! 4. Shape: indices are contiguous, unique, and row-major.
//! 5. first_row <= last_row whenever the list is non-empty.

use cardgrid_layout::{ROW_GAP, WindowParams, compute_visible};
use proptest::prelude::*;

fn params() -> impl Strategy<Value = WindowParams> {
    (
        1u32..=2_000, // viewport
        0u32..=600,   // item height
        prop_oneof![
            4 => 0u32..=6, // items per row (0 exercises clamping)
            1 => 1_000u32..=u32::MAX, // far wider than any list
        ],
        0u32..=4,     // overscan
        0usize..=5_000,
        0u32..=32, // gap
    )
        .prop_map(|(viewport_height, item_height, items_per_row, overscan, item_count, row_gap)| {
            WindowParams {
                scroll_offset: 0,
                viewport_height,
                item_height,
                items_per_row,
                overscan,
                item_count,
                row_gap,
            }
        })
}

fn params_with_scroll() -> impl Strategy<Value = (WindowParams, f64)> {
    (params(), 0.0f64..=1.0)
}

proptest! {
    #[test]
    fn covers_every_intersecting_row((base, frac) in params_with_scroll()) {
        let total_height = base.compute().total_height;
        let scroll = (total_height as f64 * frac) as i64;
        let p = WindowParams { scroll_offset: scroll, ..base };
        let w = p.compute();

        let rh = p.row_height();
        let per_row = p.items_per_row.max(1) as usize;
        let total_rows = p.item_count.div_ceil(per_row);
        let top = scroll as u64;
        let bottom = top + u64::from(p.viewport_height);

        for row in 0..total_rows {
            let start = row as u64 * rh;
            let end = start + rh;
            if start <= bottom && end > top {
                prop_assert!(
                    w.contains_row(row),
                    "row {} ({}..{}) intersects {}..={} but window is {:?}",
                    row, start, end, top, bottom, w.rows()
                );
            }
        }
    }

    #[test]
    fn bounded_by_viewport((base, frac) in params_with_scroll()) {
        let scroll = (base.compute().total_height as f64 * frac) as i64;
        let p = WindowParams { scroll_offset: scroll, ..base };
        let w = p.compute();

        let per_row = p.items_per_row.max(1) as usize;
        let visible_rows = u64::from(p.viewport_height).div_ceil(p.row_height()) as usize;
        let bound = per_row.saturating_mul(visible_rows + 2 * p.overscan as usize + 1);
        prop_assert!(w.len() <= bound, "{} items exceeds bound {}", w.len(), bound);
    }

    #[test]
    fn deterministic(p in params(), scroll in -1_000i64..1_000_000) {
        let p = WindowParams { scroll_offset: scroll, ..p };
        prop_assert_eq!(p.compute(), p.compute());
    }

    #[test]
    fn indices_contiguous_and_row_major(p in params(), scroll in 0i64..500_000) {
        let p = WindowParams { scroll_offset: scroll, ..p };
        let w = p.compute();
        let per_row = p.items_per_row.max(1) as usize;

        for pair in w.items.windows(2) {
            prop_assert_eq!(pair[1].index, pair[0].index + 1);
        }
        for item in &w.items {
            prop_assert!(item.index < p.item_count);
            prop_assert_eq!(item.index, item.row * per_row + item.column as usize);
            prop_assert_eq!(item.end - item.start, p.row_height());
        }
        if let Some(first) = w.items.first() {
            prop_assert_eq!(first.column, 0);
            prop_assert_eq!(first.row, w.rows().start);
        }
    }

    #[test]
    fn non_empty_list_has_non_empty_window(p in params(), scroll in -10i64..10_000_000) {
        let p = WindowParams { scroll_offset: scroll, ..p };
        let w = p.compute();
        if p.item_count > 0 {
            prop_assert!(!w.rows().is_empty());
            prop_assert!(!w.is_empty());
        } else {
            prop_assert!(w.is_empty());
            prop_assert_eq!(w.total_height, 0);
        }
    }

    #[test]
    fn positional_contract_matches_params(
        scroll in 0i64..100_000,
        viewport in 0u32..2_000,
        height in 0u32..600,
        per_row in 0u32..5,
        overscan in 0u32..4,
        count in 0usize..2_000,
    ) {
        let via_fn = compute_visible(scroll, viewport, height, per_row, overscan, count);
        let via_params = WindowParams {
            scroll_offset: scroll,
            viewport_height: viewport,
            item_height: height,
            items_per_row: per_row,
            overscan,
            item_count: count,
            row_gap: ROW_GAP,
        }
        .compute();
        prop_assert_eq!(via_fn, via_params);
    }
}
