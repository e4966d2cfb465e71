//! Error types for PTY operations

use thiserror::Error;

/// PTY error type
///
/// Every OS-level failure keeps the underlying `Errno` as its source.
/// A failed exec in the child is not represented here; it is visible only
/// as the child exiting with [`crate::EXEC_FAILED_STATUS`].
#[derive(Error, Debug)]
pub enum Error {
    /// An input string contained an interior NUL byte
    #[error("{0} contains an interior NUL byte")]
    NulByte(&'static str),

    /// The forkpty primitive failed; no process or descriptor was created
    #[error("Failed to allocate PTY and fork: {0}")]
    Spawn(#[source] nix::Error),

    /// TIOCSWINSZ failed on the master descriptor
    #[error("Failed to set window size: {0}")]
    SetWindowSize(#[source] nix::Error),

    /// TIOCGWINSZ failed on the master descriptor
    #[error("Failed to get window size: {0}")]
    GetWindowSize(#[source] nix::Error),

    /// FIONREAD failed on the master descriptor
    #[error("Failed to query readable bytes: {0}")]
    AvailableBytes(#[source] nix::Error),
}

/// Result type for PTY operations
pub type Result<T> = std::result::Result<T, Error>;
