use thiserror::Error;

use crate::status::GamepadStatus;

/// Error type for requests the caller made explicitly.
///
/// Failures observed while polling are never returned as errors. They show
/// up through [`crate::Gamepad::status`] instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The device could not be opened.
    #[error("failed to open {path} ({status}): {source}")]
    Open {
        path: String,
        status: GamepadStatus,
        #[source]
        source: std::io::Error,
    },
    /// Only single-digit joystick indices map onto a device path.
    #[error("joystick index out of range: {0} (expected 0-9)")]
    InvalidIndex(u8),
}

/// Convenient result alias for gamepad operations.
pub type Result<T> = std::result::Result<T, Error>;
