#![forbid(unsafe_code)]

//! Board configuration, loadable from TOML or JSON.
//!
//! Every field has a default, so an empty document is a valid config:
//!
//! ```toml
//! [layout]
//! overscan = 2
//! columns = { compact = 1, medium = 2, wide = 4 }
//!
//! [drag]
//! threshold = 5
//!
//! [order]
//! unpin_placement = "back"
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cardgrid_core::gesture::{DEFAULT_DRAG_THRESHOLD, DragGestureConfig};
use cardgrid_layout::{Breakpoint, LayoutPolicy};
use serde::{Deserialize, Serialize};

use crate::drag::DEFAULT_SCROLL_COMPENSATION_ROWS;
use crate::order::OrderPolicy;

/// Drag tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Pointer travel (manhattan pixels) before a press becomes a drag.
    pub threshold: u32,
    /// Rows a drop may move a card before the view scrolls to follow it.
    pub scroll_compensation_rows: usize,
    /// Whether a keyboard cancel aborts a pointer drag.
    pub cancel_on_escape: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_DRAG_THRESHOLD,
            scroll_compensation_rows: DEFAULT_SCROLL_COMPENSATION_ROWS,
            cancel_on_escape: true,
        }
    }
}

impl DragConfig {
    /// Gesture detector settings.
    #[must_use]
    pub fn gesture(&self) -> DragGestureConfig {
        DragGestureConfig {
            threshold: self.threshold,
            cancel_on_escape: self.cancel_on_escape,
        }
    }
}

/// All board tunables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub layout: LayoutPolicy,
    pub drag: DragConfig,
    pub order: OrderPolicy,
}

/// Configuration loading failure.
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Toml(toml::de::Error),
    Json(serde_json::Error),
    /// File extension is neither `.toml` nor `.json`.
    UnsupportedFormat(PathBuf),
    /// Parsed but semantically invalid.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "config I/O error: {err}"),
            Self::Toml(err) => write!(f, "invalid TOML config: {err}"),
            Self::Json(err) => write!(f, "invalid JSON config: {err}"),
            Self::UnsupportedFormat(path) => {
                write!(f, "unsupported config format: {}", path.display())
            }
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Toml(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::UnsupportedFormat(_) | Self::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Toml(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl BoardConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("toml") => Self::from_toml_str(&fs::read_to_string(path)?),
            Some("json") => Self::from_json_str(&fs::read_to_string(path)?),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Reject configurations that cannot produce a usable grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bps = self.layout.breakpoints;
        if bps.medium > bps.wide {
            return Err(ConfigError::Invalid(format!(
                "breakpoint medium ({}) exceeds wide ({})",
                bps.medium, bps.wide
            )));
        }
        for bp in Breakpoint::ALL {
            if self.layout.columns.get(bp) == 0 {
                return Err(ConfigError::Invalid(format!("{bp} tier has zero columns")));
            }
            if self.layout.item_height.get(bp) == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{bp} tier has zero item height"
                )));
            }
        }
        Ok(())
    }
}
