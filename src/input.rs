//! Polled operator buttons and the adjustments they trigger.

use embedded_hal::digital::v2::InputPin;
use heapless::Vec;

use crate::clock::{Field, TimeState};
use crate::debounce::Debouncer;

pub const BUTTON_COUNT: usize = 7;

/// Adjustment requested by a button press.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    ToggleMode,
    Increment(Field),
    Decrement(Field),
}

impl Action {
    /// Applies the adjustment. Works whether or not the stopwatch is running.
    pub fn apply(self, state: &mut TimeState) {
        match self {
            Self::ToggleMode => state.toggle_mode(),
            Self::Increment(field) => {
                state.increment(field);
            }
            Self::Decrement(field) => {
                state.decrement(field);
            }
        }
    }
}

/// The polled buttons, in the order their lines are handed to [`InputDispatcher::new`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Mode,
    HourInc,
    HourDec,
    MinuteInc,
    MinuteDec,
    SecondInc,
    SecondDec,
}

impl Button {
    pub const ALL: [Self; BUTTON_COUNT] = [
        Self::Mode,
        Self::HourInc,
        Self::HourDec,
        Self::MinuteInc,
        Self::MinuteDec,
        Self::SecondInc,
        Self::SecondDec,
    ];

    #[must_use]
    pub const fn action(self) -> Action {
        match self {
            Self::Mode => Action::ToggleMode,
            Self::HourInc => Action::Increment(Field::Hours),
            Self::HourDec => Action::Decrement(Field::Hours),
            Self::MinuteInc => Action::Increment(Field::Minutes),
            Self::MinuteDec => Action::Decrement(Field::Minutes),
            Self::SecondInc => Action::Increment(Field::Seconds),
            Self::SecondDec => Action::Decrement(Field::Seconds),
        }
    }
}

/// Actions fired by one sampling pass.
pub type Actions = Vec<Action, BUTTON_COUNT>;

/// Samples every button line through its own latch.
///
/// Lines are active low: buttons pull them to ground against a pull-up.
pub struct InputDispatcher<P> {
    lines: [P; BUTTON_COUNT],
    latches: [Debouncer<Action>; BUTTON_COUNT],
}

impl<P: InputPin> InputDispatcher<P> {
    /// `lines` must be ordered like [`Button::ALL`].
    pub fn new(lines: [P; BUTTON_COUNT]) -> Self {
        Self {
            lines,
            latches: Button::ALL.map(|button| Debouncer::new(button.action())),
        }
    }

    /// Samples every line once and returns the actions that fired, in button order.
    ///
    /// # Errors
    ///
    /// Propagates the first pin read error; later lines are not sampled.
    pub fn poll(&mut self) -> Result<Actions, P::Error> {
        let mut actions = Actions::new();
        for (pin, latch) in self.lines.iter().zip(&mut self.latches) {
            if let Some(action) = latch.poll(pin.is_low()?) {
                // At most one action per button, so this never overflows.
                actions.push(action).ok();
            }
        }
        Ok(actions)
    }

    /// Samples the buttons and applies whatever fired to `state`.
    ///
    /// # Errors
    ///
    /// Propagates the pin read error; nothing is applied in that case.
    pub fn dispatch(&mut self, state: &mut TimeState) -> Result<Actions, P::Error> {
        let actions = self.poll()?;
        for action in &actions {
            action.apply(state);
        }
        Ok(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Mode;
    use crate::mock::{Finger, MockButton};

    fn dispatcher() -> (InputDispatcher<MockButton>, [Finger; BUTTON_COUNT]) {
        let lines: [(MockButton, Finger); BUTTON_COUNT] = core::array::from_fn(|_| MockButton::new());
        let fingers = core::array::from_fn(|i| lines[i].1.clone());
        (InputDispatcher::new(lines.map(|(pin, _)| pin)), fingers)
    }

    #[test]
    fn buttons_map_to_their_actions() {
        let (mut dispatcher, fingers) = dispatcher();
        for finger in &fingers {
            finger.press();
        }
        let actions = dispatcher.poll().unwrap();
        let expected: Vec<Action, BUTTON_COUNT> =
            Button::ALL.iter().map(|button| button.action()).collect();
        assert_eq!(actions, expected);
    }

    #[test]
    fn holding_adjusts_once_per_press() {
        let (mut dispatcher, fingers) = dispatcher();
        let mut state = TimeState::default();
        let minute_inc = &fingers[3];

        minute_inc.press();
        for _ in 0..50 {
            dispatcher.dispatch(&mut state).unwrap();
        }
        assert_eq!(state.minutes(), 1);

        minute_inc.release();
        dispatcher.dispatch(&mut state).unwrap();
        minute_inc.press();
        dispatcher.dispatch(&mut state).unwrap();
        assert_eq!(state.minutes(), 2);
    }

    #[test]
    fn adjustments_wrap_and_ignore_running() {
        let (mut dispatcher, fingers) = dispatcher();
        let mut state = TimeState::from_hms(0, 0, 0, Mode::CountDown).unwrap();
        state.pause();

        fingers[2].press();
        dispatcher.dispatch(&mut state).unwrap();
        assert_eq!(state.hours(), 23);

        fingers[6].press();
        dispatcher.dispatch(&mut state).unwrap();
        assert_eq!(state.seconds(), 59);
        assert!(!state.is_running());
    }

    #[test]
    fn mode_button_toggles() {
        let (mut dispatcher, fingers) = dispatcher();
        let mut state = TimeState::default();
        fingers[0].press();
        assert_eq!(dispatcher.dispatch(&mut state).unwrap().as_slice(), &[Action::ToggleMode]);
        assert_eq!(state.mode(), Mode::CountDown);
        fingers[0].release();
        dispatcher.dispatch(&mut state).unwrap();
        fingers[0].press();
        dispatcher.dispatch(&mut state).unwrap();
        assert_eq!(state.mode(), Mode::CountUp);
    }
}
