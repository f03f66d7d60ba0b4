use std::sync::Arc;

use crate::error::{Error, Result};
use crate::settings::Settings;
use crate::state::InputState;
use crate::status::{classify, classify_error, GamepadStatus};
use crate::stream::{Backend, DeviceBackend, StreamManager};
use crate::supervisor::Supervisor;

/// Directory prefix of joystick character devices.
pub const DEVICE_PATH_PREFIX: &str = "/dev/input/js";

/// Returns the canonical device path for a joystick index.
///
/// Only single-digit indices (0-9) are supported.
pub fn device_path(index: u8) -> Result<String> {
    if index > 9 {
        return Err(Error::InvalidIndex(index));
    }
    Ok(format!("{DEVICE_PATH_PREFIX}{}", char::from(b'0' + index)))
}

/// A polled joystick device that reconnects on its own.
///
/// Call [`Gamepad::refresh`] once per tick, then read the cached state with
/// [`Gamepad::axis`] and [`Gamepad::button`]. I/O failures are never
/// returned from `refresh`: they switch [`Gamepad::status`] to an error and
/// start a background thread that keeps reopening the device path every
/// [`Settings::retry_interval`] until it succeeds.
pub struct Gamepad<B: Backend = DeviceBackend> {
    shared: Arc<StreamManager<B>>,
    state: InputState,
    settings: Settings,
    supervisor: Option<Supervisor>,
}

impl Gamepad<DeviceBackend> {
    /// Opens the device at `path`. A missing device is not an error: the
    /// handle starts in an error state and keeps retrying.
    pub fn new(path: impl Into<String>) -> Self {
        Self::with_settings(path, Settings::default())
    }

    pub fn with_settings(path: impl Into<String>, settings: Settings) -> Self {
        Self::with_backend(DeviceBackend, path, settings)
    }

    /// Opens `/dev/input/js{index}`.
    pub fn from_index(index: u8) -> Result<Self> {
        Ok(Self::new(device_path(index)?))
    }
}

impl<B: Backend> Gamepad<B> {
    pub fn with_backend(backend: B, path: impl Into<String>, settings: Settings) -> Self {
        let path = path.into();
        let mut gamepad = Self {
            shared: Arc::new(StreamManager::new(backend, path.clone())),
            state: InputState::new(&settings),
            settings,
            supervisor: None,
        };
        if let Err(e) = gamepad.open_stream(&path) {
            log::debug!("{e}");
        }
        gamepad.refresh();
        gamepad
    }

    /// Reads every pending event and updates the status.
    ///
    /// Does nothing while a reconnection is in flight.
    pub fn refresh(&mut self) {
        if self.shared.is_reconnecting() {
            return;
        }
        // The worker clears the flag right before it exits.
        if let Some(supervisor) = self.supervisor.take() {
            supervisor.stop();
        }

        let state = &mut self.state;
        let outcome = self.shared.drain(|event| state.apply(event));
        let status = classify(&outcome);
        self.shared.set_status(status);
        if status.is_err() {
            self.start_reconnect(status);
        }
    }

    /// Latest value of an axis, or 0 if `index` is out of range.
    pub fn axis(&self, index: usize) -> i16 {
        self.state.axis(index)
    }

    /// Latest value of a button, or 0 if `index` is out of range.
    pub fn button(&self, index: usize) -> i16 {
        self.state.button(index)
    }

    pub fn axes(&self) -> &[i16] {
        self.state.axes()
    }

    pub fn buttons(&self) -> &[i16] {
        self.state.buttons()
    }

    pub fn status(&self) -> GamepadStatus {
        self.shared.status()
    }

    /// Whether the device is unusable right now.
    pub fn is_err(&self) -> bool {
        self.status().is_err()
    }

    pub fn is_reconnecting(&self) -> bool {
        self.shared.is_reconnecting()
    }

    /// Snapshot of the current device path.
    pub fn path(&self) -> String {
        self.shared.path()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Switches to `path`, cancelling any reconnection in flight.
    ///
    /// On failure the handle is left without a stream; the next
    /// [`Gamepad::refresh`] starts retrying `path`.
    pub fn open_stream(&mut self, path: &str) -> Result<()> {
        self.stop_reconnect();
        self.shared.set_path(path);
        match self.shared.open(path) {
            Ok(()) => {
                self.shared.set_status(GamepadStatus::Ok);
                log::debug!("opened {path}");
                Ok(())
            }
            Err(source) => {
                self.shared.close();
                let status = classify_error(&source);
                self.shared.set_status(status);
                Err(Error::Open {
                    path: path.to_owned(),
                    status,
                    source,
                })
            }
        }
    }

    /// Closes the device and cancels any reconnection in flight.
    ///
    /// Closing an already closed gamepad is a no-op.
    pub fn close_stream(&mut self) {
        self.stop_reconnect();
        if self.shared.close() {
            log::debug!("closed {}", self.shared.path());
        }
        self.shared.set_status(GamepadStatus::InvalidFileError);
    }

    fn start_reconnect(&mut self, status: GamepadStatus) {
        if !self.shared.begin_reconnect() {
            return;
        }
        self.shared.close();
        let path = self.shared.path();
        log::warn!("{path} lost ({status}), reconnecting");
        self.supervisor = Some(Supervisor::spawn(
            self.shared.clone(),
            self.settings.retry_interval,
        ));
    }

    fn stop_reconnect(&mut self) {
        self.shared.cancel_reconnect();
        if let Some(supervisor) = self.supervisor.take() {
            supervisor.stop();
        }
    }
}

impl<B: Backend> Drop for Gamepad<B> {
    fn drop(&mut self) {
        self.close_stream();
    }
}
