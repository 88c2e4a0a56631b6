#![forbid(unsafe_code)]

//! Layout policy: container width → grid geometry.
//!
//! [`LayoutPolicy::derive_layout`] classifies the container width into a
//! [`Breakpoint`] and resolves the column count and item height for that tier.
//! [`LayoutPolicy::derive_container_height`] sizes the scroll container so at
//! least `min_rows` rows fit even on short viewports.
//!
//! Both are synchronous and side-effect free. Resize events should be
//! debounced by the caller; nothing here keeps time.
//!
//! # Invariants
//!
//! 1. `items_per_row >= 1` and `row_height() >= 1` for every derived layout.
//! 2. The derived container height never exceeds the viewport height unless
//!    the viewport height itself is zero.

use cardgrid_core::geometry::Position;
use serde::{Deserialize, Serialize};

use crate::windower::ROW_GAP;
use crate::{Breakpoint, Breakpoints, Responsive};

/// Default card height in pixels.
pub const DEFAULT_ITEM_HEIGHT: u32 = 280;

/// Default vertical space reserved for page chrome (header, toolbar).
pub const DEFAULT_HEADER_RESERVE: u32 = 160;

/// Grid geometry for one container width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    /// The tier this layout was derived for.
    pub breakpoint: Breakpoint,
    /// Columns per row (at least 1).
    pub items_per_row: u32,
    /// Card height in pixels, excluding the row gap.
    pub item_height: u32,
    /// Vertical gap between rows in pixels.
    pub row_gap: u32,
}

impl GridLayout {
    /// Pixel pitch of one row (item height plus gap, at least 1).
    #[inline]
    #[must_use]
    pub const fn row_height(&self) -> u64 {
        let h = self.item_height as u64 + self.row_gap as u64;
        if h == 0 { 1 } else { h }
    }

    /// Column count clamped to at least 1.
    #[inline]
    #[must_use]
    pub const fn columns(&self) -> u32 {
        if self.items_per_row == 0 {
            1
        } else {
            self.items_per_row
        }
    }

    /// Whether switching to `other` invalidates row/column placement.
    #[must_use]
    pub fn invalidates(&self, other: &GridLayout) -> bool {
        self.columns() != other.columns() || self.row_height() != other.row_height()
    }

    /// Row of the item at `index`.
    #[inline]
    #[must_use]
    pub const fn row_of(&self, index: usize) -> usize {
        index / self.columns() as usize
    }

    /// Map a content-space position to `(row, column)`.
    ///
    /// Columns are equal-width slices of `container_width`. Positions above
    /// or left of the content, or right of it, map to `None`. Points inside
    /// the row gap still map to the row above.
    #[must_use]
    pub fn slot_at(&self, pos: Position, container_width: u32) -> Option<(usize, u32)> {
        if pos.x < 0 || pos.y < 0 || container_width == 0 {
            return None;
        }
        let x = pos.x as u64;
        if x >= u64::from(container_width) {
            return None;
        }
        let column = (x * u64::from(self.columns()) / u64::from(container_width)) as u32;
        let row = usize::try_from(pos.y as u64 / self.row_height()).ok()?;
        Some((row, column))
    }
}

/// Responsive layout rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutPolicy {
    /// Width thresholds for each tier.
    pub breakpoints: Breakpoints,
    /// Columns per tier.
    pub columns: Responsive<u32>,
    /// Card height per tier.
    pub item_height: Responsive<u32>,
    /// Vertical gap between rows.
    pub row_gap: u32,
    /// Extra rows materialized above and below the viewport.
    pub overscan: u32,
    /// Vertical space taken by chrome outside the scroll container.
    pub header_reserve: u32,
    /// Rows the scroll container must show even on short viewports.
    pub min_rows: u32,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::DEFAULT,
            columns: Responsive::new(1)
                .at(Breakpoint::Medium, 2)
                .at(Breakpoint::Wide, 3),
            item_height: Responsive::new(DEFAULT_ITEM_HEIGHT),
            row_gap: ROW_GAP,
            overscan: 1,
            header_reserve: DEFAULT_HEADER_RESERVE,
            min_rows: 1,
        }
    }
}

impl LayoutPolicy {
    /// Derive grid geometry for a container width.
    #[must_use]
    pub fn derive_layout(&self, container_width: u32) -> GridLayout {
        let breakpoint = self.breakpoints.classify_width(container_width);
        GridLayout {
            breakpoint,
            items_per_row: self.columns.get(breakpoint).max(1),
            item_height: self.item_height.get(breakpoint),
            row_gap: self.row_gap,
        }
    }

    /// Scroll container height for a viewport, using this policy's chrome
    /// reserve and minimum row count.
    #[must_use]
    pub fn derive_container_height(&self, viewport_height: u32, layout: &GridLayout) -> u32 {
        derive_container_height(viewport_height, self.header_reserve, self.min_rows, layout)
    }
}

/// Derive grid geometry for a container width using the default policy.
///
/// Widths below 640 px get one column, below 900 px two, otherwise three.
#[must_use]
pub fn derive_layout(container_width: u32) -> GridLayout {
    LayoutPolicy::default().derive_layout(container_width)
}

/// Height of the scroll container.
///
/// Uses all space below the chrome (`viewport_height - header_reserve`). When
/// that is shorter than `min_rows` rows of `layout`, the container grows to
/// fit them, but never past the full viewport.
#[must_use]
pub fn derive_container_height(
    viewport_height: u32,
    header_reserve: u32,
    min_rows: u32,
    layout: &GridLayout,
) -> u32 {
    let available = viewport_height.saturating_sub(header_reserve);
    let wanted = u64::from(min_rows).saturating_mul(layout.row_height());
    let floor = u32::try_from(wanted).unwrap_or(u32::MAX).min(viewport_height);
    available.max(floor)
}
