use std::fmt;
use std::io;
use std::sync::atomic::{AtomicI8, Ordering};

/// Health of a gamepad, derived from the most recent I/O outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum GamepadStatus {
    GenericError = -3,
    IoError = -2,
    InvalidFileError = -1,
    Ok = 0,
}

impl GamepadStatus {
    /// Returns `true` for every status except [`GamepadStatus::Ok`].
    #[inline]
    pub fn is_err(self) -> bool {
        self != GamepadStatus::Ok
    }

    fn from_i8(value: i8) -> Self {
        match value {
            0 => GamepadStatus::Ok,
            -1 => GamepadStatus::InvalidFileError,
            -2 => GamepadStatus::IoError,
            _ => GamepadStatus::GenericError,
        }
    }
}

impl fmt::Display for GamepadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamepadStatus::Ok => "ok",
            GamepadStatus::InvalidFileError => "invalid file",
            GamepadStatus::IoError => "i/o error",
            GamepadStatus::GenericError => "error",
        };
        f.write_str(name)
    }
}

/// How the last read or open on the device ended.
#[derive(Debug)]
pub enum ReadOutcome {
    /// Nothing more is buffered right now.
    Drained,
    Failed(io::Error),
}

impl From<io::Error> for ReadOutcome {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::WouldBlock {
            ReadOutcome::Drained
        } else {
            ReadOutcome::Failed(err)
        }
    }
}

/// Maps an I/O outcome onto a status.
pub fn classify(outcome: &ReadOutcome) -> GamepadStatus {
    match outcome {
        ReadOutcome::Drained => GamepadStatus::Ok,
        ReadOutcome::Failed(err) => classify_error(err),
    }
}

pub(crate) fn classify_error(err: &io::Error) -> GamepadStatus {
    if err.kind() == io::ErrorKind::WouldBlock {
        return GamepadStatus::Ok;
    }
    match err.raw_os_error() {
        Some(libc::EBADF | libc::EINVAL) => GamepadStatus::InvalidFileError,
        Some(libc::EIO) => GamepadStatus::IoError,
        _ => GamepadStatus::GenericError,
    }
}

/// Status cell shared between the handle and its reconnection worker.
#[derive(Debug)]
pub(crate) struct AtomicStatus(AtomicI8);

impl AtomicStatus {
    pub(crate) fn new(status: GamepadStatus) -> Self {
        Self(AtomicI8::new(status as i8))
    }

    #[inline]
    pub(crate) fn load(&self) -> GamepadStatus {
        GamepadStatus::from_i8(self.0.load(Ordering::Acquire))
    }

    #[inline]
    pub(crate) fn store(&self, status: GamepadStatus) {
        self.0.store(status as i8, Ordering::Release);
    }
}
