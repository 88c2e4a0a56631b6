#![forbid(unsafe_code)]

//! Layout primitives for card grids.
//!
//! This crate holds the two pure geometry components of cardgrid:
//!
//! - [`policy`] - maps container width to columns and item height
//!   (responsive breakpoints) and sizes the scroll container.
//! - [`windower`] - maps scroll offset and grid geometry to the minimal set
//!   of items that must be materialized.
//!
//! Nothing here knows about item identity or order; callers pair the
//! windower's indices with their own ordered id sequence.

pub mod policy;
pub mod responsive;
pub mod windower;

pub use policy::{
    DEFAULT_HEADER_RESERVE, DEFAULT_ITEM_HEIGHT, GridLayout, LayoutPolicy,
    derive_container_height, derive_layout,
};
pub use responsive::Responsive;
pub use windower::{
    ROW_GAP, ScrollAlign, VirtualItem, Window, WindowParams, compute_visible, max_scroll_offset,
    row_offset,
};

use serde::{Deserialize, Serialize};

/// Responsive breakpoint tiers for container widths.
///
/// | Breakpoint | Default width range | Columns |
/// |------------|---------------------|---------|
/// | `Compact`  | < 640 px            | 1       |
/// | `Medium`   | 640–899 px          | 2       |
/// | `Wide`     | 900+ px             | 3       |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    /// Phones and narrow panes.
    Compact,
    /// Tablets and split views.
    Medium,
    /// Desktop widths.
    Wide,
}

impl Breakpoint {
    /// All breakpoints in ascending order.
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Compact, Breakpoint::Medium, Breakpoint::Wide];

    /// Short label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Breakpoint::Compact => "compact",
            Breakpoint::Medium => "medium",
            Breakpoint::Wide => "wide",
        }
    }
}

impl std::fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Breakpoint thresholds in pixels.
///
/// Each field is the minimum container width for that tier; `Compact`
/// implicitly starts at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    /// Minimum width for `Medium`.
    pub medium: u32,
    /// Minimum width for `Wide`.
    pub wide: u32,
}

impl Breakpoints {
    /// Default thresholds: 640 / 900 px.
    pub const DEFAULT: Self = Self {
        medium: 640,
        wide: 900,
    };

    /// Create thresholds, sanitized to be non-decreasing.
    #[must_use]
    pub const fn new(medium: u32, wide: u32) -> Self {
        let wide = if wide < medium { medium } else { wide };
        Self { medium, wide }
    }

    /// Classify a width into a breakpoint bucket.
    #[inline]
    #[must_use]
    pub const fn classify_width(self, width: u32) -> Breakpoint {
        if width >= self.wide {
            Breakpoint::Wide
        } else if width >= self.medium {
            Breakpoint::Medium
        } else {
            Breakpoint::Compact
        }
    }

    /// Minimum width for a breakpoint.
    #[must_use]
    pub const fn threshold(self, bp: Breakpoint) -> u32 {
        match bp {
            Breakpoint::Compact => 0,
            Breakpoint::Medium => self.medium,
            Breakpoint::Wide => self.wide,
        }
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::DEFAULT
    }
}
