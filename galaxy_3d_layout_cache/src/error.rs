//! Error types for the Galaxy3D input layout cache
//!
//! This module defines the error type shared by the cache and by device
//! backends, plus the `layout_err!` / `layout_bail!` helpers that log an
//! error before handing it back to the caller.

use std::fmt;

/// Result type for layout cache and device operations
pub type Result<T> = std::result::Result<T, Error>;

/// Layout cache errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Backend-specific error (driver call failed for another reason)
    BackendError(String),

    /// The device ran out of memory for layout objects
    OutOfMemory,

    /// The attribute layout was rejected (too many elements, bad format,
    /// element not part of the shader signature, ...)
    InvalidLayout(String),

    /// Invalid resource (unknown program, stale handle, ...)
    InvalidResource(String),

    /// The device was lost and must be reset before creating layouts
    DeviceLost,

    /// The cache was used before `initialize()`
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of device memory"),
            Error::InvalidLayout(msg) => write!(f, "Invalid input layout: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::DeviceLost => write!(f, "Device lost"),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Build an error, logging it at ERROR severity with file:line information
///
/// # Example
///
/// ```ignore
/// return Err(layout_err!(InvalidLayout, "galaxy3d::LayoutKey", "{} attributes", count));
/// ```
#[macro_export]
macro_rules! layout_err {
    ($variant:ident, $source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::layout_error!($source, "{}", message);
        $crate::galaxy3d::Error::$variant(message)
    }};
}

/// Log an error and return it from the enclosing function
///
/// # Example
///
/// ```ignore
/// layout_bail!(InvalidResource, "galaxy3d::SoftwareDevice", "Unknown program {:?}", id);
/// ```
#[macro_export]
macro_rules! layout_bail {
    ($variant:ident, $source:expr, $($arg:tt)*) => {
        return Err($crate::layout_err!($variant, $source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
