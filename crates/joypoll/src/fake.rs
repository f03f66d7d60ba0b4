//! Scripted in-memory backend for tests.
use std::collections::{HashSet, VecDeque};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::event::{JsEvent, EVENT_SIZE};
use crate::stream::{Backend, EventStream};

/// One scripted result for the next read.
#[derive(Debug, Clone)]
pub(crate) enum Step {
    Event(JsEvent),
    Fail(i32),
    Short(usize),
}

#[derive(Default)]
struct Inner {
    available: AtomicBool,
    script: Mutex<VecDeque<Step>>,
    live: Mutex<HashSet<usize>>,
    next_id: AtomicUsize,
    opened: AtomicUsize,
    reads: AtomicUsize,
    stale_reads: AtomicUsize,
    double_closes: AtomicUsize,
    max_live: AtomicUsize,
}

#[derive(Clone)]
pub(crate) struct FakeBackend {
    inner: Arc<Inner>,
}

pub(crate) struct FakeStream {
    id: usize,
    inner: Arc<Inner>,
}

impl FakeBackend {
    /// A backend whose device is present.
    pub(crate) fn new() -> Self {
        let backend = Self::absent();
        backend.set_available(true);
        backend
    }

    /// A backend whose device does not exist yet.
    pub(crate) fn absent() -> Self {
        Self { inner: Arc::new(Inner::default()) }
    }

    pub(crate) fn set_available(&self, available: bool) {
        self.inner.available.store(available, Ordering::SeqCst);
    }

    pub(crate) fn push(&self, step: Step) {
        self.inner.script.lock().unwrap().push_back(step);
    }

    pub(crate) fn live(&self) -> usize {
        self.inner.live.lock().unwrap().len()
    }

    pub(crate) fn opened(&self) -> usize {
        self.inner.opened.load(Ordering::SeqCst)
    }

    pub(crate) fn reads(&self) -> usize {
        self.inner.reads.load(Ordering::SeqCst)
    }

    pub(crate) fn stale_reads(&self) -> usize {
        self.inner.stale_reads.load(Ordering::SeqCst)
    }

    pub(crate) fn double_closes(&self) -> usize {
        self.inner.double_closes.load(Ordering::SeqCst)
    }

    pub(crate) fn max_live(&self) -> usize {
        self.inner.max_live.load(Ordering::SeqCst)
    }
}

impl Backend for FakeBackend {
    type Stream = FakeStream;

    fn open(&self, _path: &str) -> io::Result<FakeStream> {
        if !self.inner.available.load(Ordering::SeqCst) {
            return Err(io::Error::from_raw_os_error(libc::ENOENT));
        }
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        let mut live = self.inner.live.lock().unwrap();
        live.insert(id);
        self.inner.max_live.fetch_max(live.len(), Ordering::SeqCst);
        self.inner.opened.fetch_add(1, Ordering::SeqCst);
        Ok(FakeStream { id, inner: self.inner.clone() })
    }
}

impl EventStream for FakeStream {
    fn read_record(&mut self, buf: &mut [u8; EVENT_SIZE]) -> io::Result<usize> {
        self.inner.reads.fetch_add(1, Ordering::SeqCst);
        if !self.inner.live.lock().unwrap().contains(&self.id) {
            self.inner.stale_reads.fetch_add(1, Ordering::SeqCst);
            return Err(io::Error::from_raw_os_error(libc::EBADF));
        }
        match self.inner.script.lock().unwrap().pop_front() {
            Some(Step::Event(event)) => {
                *buf = event.to_bytes();
                Ok(EVENT_SIZE)
            }
            Some(Step::Fail(code)) => Err(io::Error::from_raw_os_error(code)),
            Some(Step::Short(n)) => Ok(n.min(EVENT_SIZE - 1)),
            None => Err(io::Error::from(io::ErrorKind::WouldBlock)),
        }
    }
}

impl Drop for FakeStream {
    fn drop(&mut self) {
        if !self.inner.live.lock().unwrap().remove(&self.id) {
            self.inner.double_closes.fetch_add(1, Ordering::SeqCst);
        }
    }
}
