//! Errors returned by the scheduler entry points.

use std::io;
use thiserror::Error;

/// Result alias for the scheduler entry points.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a scheduler entry point did not complete.
#[derive(Debug, Error)]
pub enum Error {
    /// No surface has been installed on this thread.
    #[error("no surface installed; call manager::install first")]
    NoSurface,

    /// An entry point was called from inside a resize or redraw callback.
    #[error("redraw requested from inside a panel callback")]
    NestedPass,

    /// The surface failed to refresh its extent or to flush.
    #[error("surface I/O failed: {0}")]
    Io(#[from] io::Error),
}
