//! Polling access to a Linux joystick device (`/dev/input/jsX`).
//!
//! A [`Gamepad`] keeps the latest axis and button values read from the
//! device, reports its health through [`GamepadStatus`] and reopens the
//! device in the background when it disappears.
mod error;
mod event;
mod gamepad;
mod settings;
mod state;
mod status;
mod stream;
mod supervisor;

#[cfg(test)]
mod fake;

pub use crate::error::{Error, Result};
pub use crate::event::{EventKind, JsEvent, EVENT_SIZE, JS_EVENT_INIT};
pub use crate::gamepad::{device_path, Gamepad, DEVICE_PATH_PREFIX};
pub use crate::settings::{Settings, AXIS_COUNT, BUTTON_COUNT, RETRY_INTERVAL};
pub use crate::status::{classify, GamepadStatus, ReadOutcome};
pub use crate::stream::{Backend, DeviceBackend, EventStream};
