use crate::event::{EventKind, JsEvent};
use crate::settings::Settings;

/// Latest-value cache of axes and buttons. Values are never reset implicitly.
#[derive(Debug, Clone)]
pub(crate) struct InputState {
    axes: Box<[i16]>,
    buttons: Box<[i16]>,
    accept_init: bool,
}

impl InputState {
    pub(crate) fn new(settings: &Settings) -> Self {
        Self {
            axes: vec![0; settings.axis_count].into_boxed_slice(),
            buttons: vec![0; settings.button_count].into_boxed_slice(),
            accept_init: settings.accept_init_events,
        }
    }

    /// Folds one event into the cache. Out-of-range numbers and unknown
    /// tags are dropped.
    pub(crate) fn apply(&mut self, event: JsEvent) {
        let slot = match event.event_kind(self.accept_init) {
            EventKind::Button => self.buttons.get_mut(usize::from(event.number)),
            EventKind::Axis => self.axes.get_mut(usize::from(event.number)),
            EventKind::Other(_) => None,
        };
        if let Some(slot) = slot {
            *slot = event.value;
        }
    }

    #[inline]
    pub(crate) fn axis(&self, index: usize) -> i16 {
        self.axes.get(index).copied().unwrap_or(0)
    }

    #[inline]
    pub(crate) fn button(&self, index: usize) -> i16 {
        self.buttons.get(index).copied().unwrap_or(0)
    }

    pub(crate) fn axes(&self) -> &[i16] {
        &self.axes
    }

    pub(crate) fn buttons(&self) -> &[i16] {
        &self.buttons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::JS_EVENT_INIT;

    fn state() -> InputState {
        InputState::new(&Settings::default())
    }

    #[test]
    fn last_record_wins() {
        let mut state = state();
        state.apply(JsEvent::button(3, 1));
        state.apply(JsEvent::button(3, 0));
        state.apply(JsEvent::button(3, 1));
        state.apply(JsEvent::axis(1, 100));
        state.apply(JsEvent::axis(1, -32767));
        assert_eq!(state.button(3), 1);
        assert_eq!(state.axis(1), -32767);
    }

    #[test]
    fn out_of_range_reads_are_zero() {
        let mut state = state();
        state.apply(JsEvent::button(14, 1));
        state.apply(JsEvent::axis(5, 7));
        assert_eq!(state.button(14), 1);
        assert_eq!(state.axis(5), 7);
        for index in [6, 15, 255, usize::MAX] {
            assert_eq!(state.axis(index), 0);
            assert_eq!(state.button(index), 0);
        }
    }

    #[test]
    fn out_of_range_events_are_ignored() {
        let mut state = state();
        state.apply(JsEvent::button(15, 1));
        state.apply(JsEvent::axis(6, 1));
        state.apply(JsEvent::axis(255, 1));
        assert!(state.buttons().iter().all(|&v| v == 0));
        assert!(state.axes().iter().all(|&v| v == 0));
    }

    #[test]
    fn unknown_tags_are_ignored() {
        let mut state = state();
        state.apply(JsEvent { time: 0, value: 9, kind: 4, number: 0 });
        state.apply(JsEvent { time: 0, value: 9, kind: JS_EVENT_INIT | 2, number: 0 });
        assert_eq!(state.axis(0), 0);
        assert_eq!(state.button(0), 0);
    }

    #[test]
    fn init_events_apply_when_accepted() {
        let mut state = InputState::new(&Settings::default().with_init_events(true));
        state.apply(JsEvent { time: 0, value: -5, kind: JS_EVENT_INIT | 2, number: 0 });
        assert_eq!(state.axis(0), -5);
    }

    #[test]
    fn sizes_follow_settings() {
        let state = InputState::new(&Settings::default());
        assert_eq!(state.axes().len(), 6);
        assert_eq!(state.buttons().len(), 15);

        let state = InputState::new(
            &Settings::default().with_axis_count(8).with_button_count(11),
        );
        assert_eq!(state.axes().len(), 8);
        assert_eq!(state.buttons().len(), 11);
    }
}
