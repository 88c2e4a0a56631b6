#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature enabled, the `tracing` macros are re-exported so
//! downstream crates can log through `cardgrid_core::debug!` and friends
//! without a direct dependency. Without the feature this module is empty.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
