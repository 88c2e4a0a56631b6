#![forbid(unsafe_code)]

//! Breakpoint-aware values with inheritance from smaller tiers.
//!
//! [`Responsive<T>`] holds a mandatory `compact` value and optional overrides
//! for `medium` and `wide`. A tier without an override inherits from the
//! nearest smaller tier that has one.
//!
//! ```
//! use cardgrid_layout::{Breakpoint, Responsive};
//!
//! let columns = Responsive::new(1).at(Breakpoint::Wide, 3);
//! assert_eq!(*columns.resolve(Breakpoint::Medium), 1);
//! assert_eq!(*columns.resolve(Breakpoint::Wide), 3);
//! ```
//!
//! # Invariants
//!
//! 1. `Compact` always has a value, so `resolve()` never fails.
//! 2. Setting a tier only affects that tier and tiers inheriting from it.

use serde::{Deserialize, Serialize};

use crate::Breakpoint;

/// A value that varies by [`Breakpoint`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Responsive<T> {
    compact: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    medium: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wide: Option<T>,
}

impl<T> Responsive<T> {
    /// Create a responsive value; every tier inherits `base` until overridden.
    #[must_use]
    pub const fn new(base: T) -> Self {
        Self {
            compact: base,
            medium: None,
            wide: None,
        }
    }

    /// Set the value for a tier (builder pattern).
    #[must_use]
    pub fn at(mut self, bp: Breakpoint, value: T) -> Self {
        self.set(bp, value);
        self
    }

    /// Set the value for a tier.
    pub fn set(&mut self, bp: Breakpoint, value: T) {
        match bp {
            Breakpoint::Compact => self.compact = value,
            Breakpoint::Medium => self.medium = Some(value),
            Breakpoint::Wide => self.wide = Some(value),
        }
    }

    /// Remove an override. Clearing `Compact` is a no-op.
    pub fn clear(&mut self, bp: Breakpoint) {
        match bp {
            Breakpoint::Compact => {}
            Breakpoint::Medium => self.medium = None,
            Breakpoint::Wide => self.wide = None,
        }
    }

    /// Resolve the value for a tier, walking down to `Compact`.
    #[must_use]
    pub fn resolve(&self, bp: Breakpoint) -> &T {
        match bp {
            Breakpoint::Wide => self
                .wide
                .as_ref()
                .or(self.medium.as_ref())
                .unwrap_or(&self.compact),
            Breakpoint::Medium => self.medium.as_ref().unwrap_or(&self.compact),
            Breakpoint::Compact => &self.compact,
        }
    }

    /// Whether a tier has an explicit (non-inherited) value.
    #[must_use]
    pub fn has_explicit(&self, bp: Breakpoint) -> bool {
        match bp {
            Breakpoint::Compact => true,
            Breakpoint::Medium => self.medium.is_some(),
            Breakpoint::Wide => self.wide.is_some(),
        }
    }
}

impl<T: Copy> Responsive<T> {
    /// Resolve and copy the value for a tier.
    #[must_use]
    pub fn get(&self, bp: Breakpoint) -> T {
        *self.resolve(bp)
    }
}

impl<T: Default> Default for Responsive<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
