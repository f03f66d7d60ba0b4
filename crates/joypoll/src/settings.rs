use std::time::Duration;

/// Number of axes a `struct js_event` stream is expected to report.
pub const AXIS_COUNT: usize = 6;
/// Number of buttons a `struct js_event` stream is expected to report.
pub const BUTTON_COUNT: usize = 15;
/// Delay between reconnection attempts.
pub const RETRY_INTERVAL: Duration = Duration::from_millis(250);

/// Tunables of a [`crate::Gamepad`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub retry_interval: Duration,
    pub axis_count: usize,
    pub button_count: usize,
    /// Treat kernel init events (tag `0x81`/`0x82`) as regular events.
    pub accept_init_events: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            retry_interval: RETRY_INTERVAL,
            axis_count: AXIS_COUNT,
            button_count: BUTTON_COUNT,
            accept_init_events: false,
        }
    }
}

impl Settings {
    #[must_use]
    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    #[must_use]
    pub fn with_axis_count(mut self, count: usize) -> Self {
        self.axis_count = count;
        self
    }

    #[must_use]
    pub fn with_button_count(mut self, count: usize) -> Self {
        self.button_count = count;
        self
    }

    #[must_use]
    pub fn with_init_events(mut self, accept: bool) -> Self {
        self.accept_init_events = accept;
        self
    }
}
