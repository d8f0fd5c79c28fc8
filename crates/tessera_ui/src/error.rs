//! # UI Error Types
//!
//! Only construction-time and deployment problems are errors. Out-of-range
//! geometry is clamped and operations on stale handles are silent no-ops.

use thiserror::Error;

/// Errors that can occur while building or re-skinning the control tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// The skin has no definition for a control type.
    #[error("skin has no definition for control type `{0}`")]
    MissingSkin(String),

    /// A control skin lacks a layer the control needs to render.
    #[error("skin for `{control}` has no `{layer}` layer")]
    MissingLayer {
        /// Control type whose skin was checked.
        control: String,
        /// The missing layer.
        layer: String,
    },

    /// A handle does not refer to a live control.
    #[error("control handle is stale or was never registered")]
    UnknownControl,

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A skin description could not be parsed.
    #[error("invalid skin definition: {0}")]
    InvalidSkin(String),

    /// A file could not be read.
    #[error("failed to read {path}: {reason}")]
    Io {
        /// File that was read.
        path: String,
        /// OS error text.
        reason: String,
    },
}

/// Result type for UI operations.
pub type UiResult<T> = Result<T, UiError>;
