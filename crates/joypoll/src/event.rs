/// Size of one `struct js_event` record in bytes.
pub const EVENT_SIZE: usize = 8;

/// Bit the kernel sets on synthetic events describing the initial state.
pub const JS_EVENT_INIT: u8 = 0x80;

const JS_EVENT_BUTTON: u8 = 0x01;
const JS_EVENT_AXIS: u8 = 0x02;

/// One event record as delivered by the kernel joystick interface.
///
/// Fields are laid out like `struct js_event` and decoded in native byte
/// order, which is what the kernel writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsEvent {
    /// Event timestamp in milliseconds.
    pub time: u32,
    pub value: i16,
    /// Raw type tag.
    pub kind: u8,
    /// Axis or button number.
    pub number: u8,
}

/// What an event record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Button,
    Axis,
    /// A tag this crate does not model.
    Other(u8),
}

impl JsEvent {
    pub fn button(number: u8, value: i16) -> Self {
        Self { time: 0, value, kind: JS_EVENT_BUTTON, number }
    }

    pub fn axis(number: u8, value: i16) -> Self {
        Self { time: 0, value, kind: JS_EVENT_AXIS, number }
    }

    /// Decodes a raw record.
    pub fn from_bytes(buf: &[u8; EVENT_SIZE]) -> Self {
        Self {
            time: u32::from_ne_bytes([buf[0], buf[1], buf[2], buf[3]]),
            value: i16::from_ne_bytes([buf[4], buf[5]]),
            kind: buf[6],
            number: buf[7],
        }
    }

    /// Encodes the record the way the kernel lays it out.
    pub fn to_bytes(&self) -> [u8; EVENT_SIZE] {
        let mut buf = [0u8; EVENT_SIZE];
        buf[..4].copy_from_slice(&self.time.to_ne_bytes());
        buf[4..6].copy_from_slice(&self.value.to_ne_bytes());
        buf[6] = self.kind;
        buf[7] = self.number;
        buf
    }

    /// Classifies the tag. With `accept_init` the init bit is ignored, so
    /// initial-state events count as regular button and axis events.
    pub fn event_kind(&self, accept_init: bool) -> EventKind {
        let tag = if accept_init {
            self.kind & !JS_EVENT_INIT
        } else {
            self.kind
        };
        match tag {
            JS_EVENT_BUTTON => EventKind::Button,
            JS_EVENT_AXIS => EventKind::Axis,
            _ => EventKind::Other(self.kind),
        }
    }
}
