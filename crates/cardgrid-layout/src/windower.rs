#![forbid(unsafe_code)]

//! Windowed row virtualization for fixed-height grids.
//!
//! [`compute_visible`] maps a scroll offset and grid geometry to the minimal
//! contiguous run of rows that must be materialized, and emits one
//! [`VirtualItem`] per occupied slot in those rows. It has no knowledge of
//! item content; indices refer to positions in the caller's ordered sequence.
//!
//! # Geometry
//!
//! ```text
//! row_height     = item_height + row_gap
//! total_rows     = ceil(item_count / items_per_row)
//! total_height   = total_rows * row_height
//! first_row      = max(0, floor(scroll_offset / row_height) - overscan)
//! visible_rows   = ceil(viewport_height / row_height)
//! last_row       = min(total_rows - 1, first_row + visible_rows + 2 * overscan)
//! ```
//!
//! # Invariants
//!
//! 1. Pure: identical [`WindowParams`] always produce an identical [`Window`].
//! 2. Cost is O(materialized rows × items_per_row), never O(item_count).
//! 3. Every row whose pixel span intersects
//!    `[scroll_offset, scroll_offset + viewport_height]` is materialized.
//! 4. At most `items_per_row × (visible_rows + 2 × overscan + 1)` items are
//!    emitted (the `+ 1` is the inclusive `last_row`).
//! 5. `first_row <= last_row` whenever any item exists.
//!
//! # Failure Modes
//!
//! None. Out-of-contract inputs are clamped: `items_per_row = 0` acts as 1,
//! negative scroll offsets act as 0, a zero row height acts as 1 px, and a
//! scroll offset past the end pins the window to the last row.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Fixed vertical gap between rows, in pixels.
pub const ROW_GAP: u32 = 16;

/// Inputs to the windower.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowParams {
    /// Pixels scrolled from the top of the content.
    pub scroll_offset: i64,
    /// Height of the visible viewport.
    pub viewport_height: u32,
    /// Card height, excluding the gap.
    pub item_height: u32,
    /// Columns per row.
    pub items_per_row: u32,
    /// Extra rows materialized above and below the viewport.
    pub overscan: u32,
    /// Total items in the sequence.
    pub item_count: usize,
    /// Gap between rows.
    pub row_gap: u32,
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            scroll_offset: 0,
            viewport_height: 0,
            item_height: 0,
            items_per_row: 1,
            overscan: 0,
            item_count: 0,
            row_gap: ROW_GAP,
        }
    }
}

/// Layout of one materialized slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VirtualItem {
    /// Position in the ordered sequence.
    pub index: usize,
    /// Row index.
    pub row: usize,
    /// Column index within the row.
    pub column: u32,
    /// Top edge of the row, in content pixels.
    pub start: u64,
    /// Bottom edge of the row (exclusive), in content pixels.
    pub end: u64,
}

/// Result of a windowing pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Window {
    /// Materialized slots in row-major order.
    pub items: Vec<VirtualItem>,
    /// Height of the full content, for sizing the scrollbar.
    pub total_height: u64,
    /// Row pitch used for this pass.
    pub row_height: u64,
    rows: Range<usize>,
}

impl Window {
    /// Materialized rows (empty when there are no items).
    #[must_use]
    pub fn rows(&self) -> Range<usize> {
        self.rows.clone()
    }

    /// Whether nothing is materialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of materialized items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether `row` is within the materialized range.
    #[must_use]
    pub fn contains_row(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }
}

impl WindowParams {
    /// Row pitch after clamping.
    #[inline]
    #[must_use]
    pub fn row_height(&self) -> u64 {
        (u64::from(self.item_height) + u64::from(self.row_gap)).max(1)
    }

    /// Compute the window for these parameters.
    #[must_use]
    pub fn compute(&self) -> Window {
        let per_row = self.items_per_row.max(1) as usize;
        let row_height = self.row_height();
        let total_rows = self.item_count.div_ceil(per_row);
        let total_height = (total_rows as u64).saturating_mul(row_height);

        if total_rows == 0 {
            return Window {
                items: Vec::new(),
                total_height: 0,
                row_height,
                rows: 0..0,
            };
        }

        let offset = self.scroll_offset.max(0) as u64;
        let overscan = self.overscan as usize;
        let top_row = usize::try_from(offset / row_height).unwrap_or(usize::MAX);
        let visible_rows =
            usize::try_from(u64::from(self.viewport_height).div_ceil(row_height)).unwrap_or(0);

        let first = top_row.saturating_sub(overscan);
        let last = (total_rows - 1).min(
            first
                .saturating_add(visible_rows)
                .saturating_add(overscan.saturating_mul(2)),
        );
        let first = first.min(last);

        // Only the last row can be short, so the remaining item count caps
        // the allocation for very wide rows.
        let capacity = self
            .item_count
            .saturating_sub(first.saturating_mul(per_row))
            .min((last - first + 1).saturating_mul(per_row));
        let mut items = Vec::with_capacity(capacity);
        for row in first..=last {
            let start = row as u64 * row_height;
            let end = start + row_height;
            for column in 0..per_row {
                let index = row * per_row + column;
                if index >= self.item_count {
                    break;
                }
                items.push(VirtualItem {
                    index,
                    row,
                    column: column as u32,
                    start,
                    end,
                });
            }
        }

        Window {
            items,
            total_height,
            row_height,
            rows: first..last + 1,
        }
    }
}

/// Compute the materialized window using the fixed [`ROW_GAP`].
#[must_use]
pub fn compute_visible(
    scroll_offset: i64,
    viewport_height: u32,
    item_height: u32,
    items_per_row: u32,
    overscan: u32,
    item_count: usize,
) -> Window {
    WindowParams {
        scroll_offset,
        viewport_height,
        item_height,
        items_per_row,
        overscan,
        item_count,
        row_gap: ROW_GAP,
    }
    .compute()
}

/// Alignment for programmatic scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollAlign {
    /// Row's top edge at the viewport's top edge.
    #[default]
    Start,
    /// Row centered in the viewport.
    Center,
}

/// Largest valid scroll offset.
#[inline]
#[must_use]
pub fn max_scroll_offset(total_height: u64, viewport_height: u32) -> u64 {
    total_height.saturating_sub(u64::from(viewport_height))
}

/// Scroll offset that brings `row` into view with the given alignment.
///
/// The result is not clamped to the content height; see
/// [`max_scroll_offset`].
#[must_use]
pub fn row_offset(row: usize, row_height: u64, viewport_height: u32, align: ScrollAlign) -> u64 {
    let top = (row as u64).saturating_mul(row_height);
    match align {
        ScrollAlign::Start => top,
        ScrollAlign::Center => {
            (top + row_height / 2).saturating_sub(u64::from(viewport_height) / 2)
        }
    }
}
