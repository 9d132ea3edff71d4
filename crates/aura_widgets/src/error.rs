//! Widget error types

use thiserror::Error;

/// Errors from sending to an island overlay
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IslandError {
    /// The host that owned the mailbox has been dropped
    #[error("island host has been unmounted")]
    HostUnmounted,
}

/// Result type for island operations
pub type Result<T> = std::result::Result<T, IslandError>;
