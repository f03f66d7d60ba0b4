use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::os::unix::fs::OpenOptionsExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::event::{JsEvent, EVENT_SIZE};
use crate::status::{AtomicStatus, GamepadStatus, ReadOutcome};

/// A readable stream of joystick event records.
pub trait EventStream {
    /// Reads at most one record into `buf`. Must not block.
    fn read_record(&mut self, buf: &mut [u8; EVENT_SIZE]) -> io::Result<usize>;
}

/// Opens event streams by path.
pub trait Backend: Send + Sync + 'static {
    type Stream: EventStream + Send + 'static;

    /// Opens `path` read-only without blocking.
    fn open(&self, path: &str) -> io::Result<Self::Stream>;
}

/// Backend over real character devices.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceBackend;

impl Backend for DeviceBackend {
    type Stream = File;

    fn open(&self, path: &str) -> io::Result<File> {
        OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)
    }
}

impl EventStream for File {
    fn read_record(&mut self, buf: &mut [u8; EVENT_SIZE]) -> io::Result<usize> {
        self.read(buf)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State shared between a gamepad and its reconnection worker.
///
/// The installed stream is only ever replaced or dropped while the stream
/// lock is held, so a reader never sees a stream that was already closed.
pub(crate) struct StreamManager<B: Backend> {
    backend: B,
    path: Mutex<String>,
    stream: Mutex<Option<B::Stream>>,
    status: AtomicStatus,
    reconnecting: AtomicBool,
}

impl<B: Backend> StreamManager<B> {
    pub(crate) fn new(backend: B, path: String) -> Self {
        Self {
            backend,
            path: Mutex::new(path),
            stream: Mutex::new(None),
            status: AtomicStatus::new(GamepadStatus::InvalidFileError),
            reconnecting: AtomicBool::new(false),
        }
    }

    pub(crate) fn path(&self) -> String {
        lock(&self.path).clone()
    }

    pub(crate) fn set_path(&self, path: &str) {
        let mut current = lock(&self.path);
        current.clear();
        current.push_str(path);
    }

    #[inline]
    pub(crate) fn status(&self) -> GamepadStatus {
        self.status.load()
    }

    #[inline]
    pub(crate) fn set_status(&self, status: GamepadStatus) {
        self.status.store(status);
    }

    #[inline]
    pub(crate) fn is_reconnecting(&self) -> bool {
        self.reconnecting.load(Ordering::Acquire)
    }

    /// Marks a reconnection as started. Returns `false` if one already was.
    pub(crate) fn begin_reconnect(&self) -> bool {
        !self.reconnecting.swap(true, Ordering::AcqRel)
    }

    pub(crate) fn cancel_reconnect(&self) {
        self.reconnecting.store(false, Ordering::Release);
    }

    pub(crate) fn open_backend(&self, path: &str) -> io::Result<B::Stream> {
        self.backend.open(path)
    }

    /// Opens `path` and installs the new stream in place of the old one.
    pub(crate) fn open(&self, path: &str) -> io::Result<()> {
        let stream = self.backend.open(path)?;
        let mut slot = lock(&self.stream);
        let stale = slot.replace(stream);
        drop(stale);
        Ok(())
    }

    /// Installs a stream opened by the reconnection worker, unless the
    /// reconnection was cancelled meanwhile. Returns whether it was installed.
    pub(crate) fn install_reconnected(&self, stream: B::Stream) -> bool {
        let mut slot = lock(&self.stream);
        if !self.is_reconnecting() {
            return false;
        }
        let stale = slot.replace(stream);
        drop(stale);
        self.reconnecting.store(false, Ordering::Release);
        self.set_status(GamepadStatus::Ok);
        true
    }

    /// Drops the installed stream. Returns whether there was one.
    pub(crate) fn close(&self) -> bool {
        let mut slot = lock(&self.stream);
        slot.take().is_some()
    }

    /// Reads every record that is immediately available and hands it to
    /// `on_event`. Returns how the last read ended.
    pub(crate) fn drain(&self, mut on_event: impl FnMut(JsEvent)) -> ReadOutcome {
        let mut slot = lock(&self.stream);
        let Some(stream) = slot.as_mut() else {
            return ReadOutcome::Failed(io::Error::from_raw_os_error(libc::EBADF));
        };
        let mut buf = [0u8; EVENT_SIZE];
        loop {
            match stream.read_record(&mut buf) {
                Ok(0) => return ReadOutcome::Drained,
                Ok(EVENT_SIZE) => on_event(JsEvent::from_bytes(&buf)),
                Ok(n) => {
                    return ReadOutcome::Failed(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("short event record: {n} of {EVENT_SIZE} bytes"),
                    ))
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return ReadOutcome::from(err),
            }
        }
    }
}
