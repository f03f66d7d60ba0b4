use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};

use crate::status::classify_error;
use crate::stream::{Backend, StreamManager};

/// Background worker that reopens a lost device.
///
/// The worker owns no state of its own: it only installs a stream through
/// the shared [`StreamManager`]. Dropping the supervisor wakes the worker and
/// joins it, so it never outlives the handle that started it.
pub(crate) struct Supervisor {
    cancel_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Supervisor {
    /// Spawns the worker. The caller must have marked the reconnection as
    /// started on `shared`.
    pub(crate) fn spawn<B: Backend>(
        shared: Arc<StreamManager<B>>,
        interval: Duration,
    ) -> Self {
        let (cancel_tx, cancel_rx) = bounded::<()>(0);
        let handle = thread::Builder::new()
            .name("joypoll-reconnect".into())
            .spawn(move || run(&shared, interval, &cancel_rx));
        let handle = match handle {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::error!("failed to spawn reconnection thread: {e}");
                None
            }
        };
        Self {
            cancel_tx: Some(cancel_tx),
            handle,
        }
    }

    /// Wakes the worker and waits until it has exited.
    pub(crate) fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Disconnecting the channel interrupts the retry sleep.
        self.cancel_tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("reconnection thread panicked");
            }
        }
    }
}

impl Drop for Supervisor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run<B: Backend>(
    shared: &StreamManager<B>,
    interval: Duration,
    cancel_rx: &Receiver<()>,
) {
    let path = shared.path();
    let mut attempts: u32 = 0;
    while shared.is_reconnecting() {
        attempts = attempts.saturating_add(1);
        match shared.open_backend(&path) {
            Ok(stream) => {
                if shared.install_reconnected(stream) {
                    log::info!("reconnected to {path} after {attempts} attempt(s)");
                }
                return;
            }
            Err(e) => {
                log::debug!(
                    "reconnect attempt {attempts} to {path} failed ({}): {e}",
                    classify_error(&e)
                );
            }
        }
        match cancel_rx.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
        }
    }
}
