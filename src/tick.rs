//! The once-per-second state machine.

use embedded_hal::digital::v2::OutputPin;

use crate::clock::{Field, Mode, TimeState};
use crate::outputs::Alarm;

/// What a single second tick did to the time value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Not running; nothing changed.
    Paused,
    Advanced,
    /// Counted up past 23:59:59 back to 00:00:00.
    Wrapped,
    /// Counting down found 00:00:00; the stopwatch is now paused.
    ZeroReached,
}

/// Applies one second to `state` according to its mode.
///
/// Counting down from 00:00:00 does not move the value; it pauses the stopwatch and
/// reports [`TickOutcome::ZeroReached`].
pub fn advance(state: &mut TimeState) -> TickOutcome {
    if !state.is_running() {
        return TickOutcome::Paused;
    }
    match state.mode() {
        Mode::CountUp => {
            if state.increment(Field::Seconds)
                && state.increment(Field::Minutes)
                && state.increment(Field::Hours)
            {
                TickOutcome::Wrapped
            } else {
                TickOutcome::Advanced
            }
        }
        Mode::CountDown => {
            if state.is_zero() {
                state.pause();
                return TickOutcome::ZeroReached;
            }
            // Non-zero, so a borrow reaching the hours always finds hours > 0.
            if state.decrement(Field::Seconds) && state.decrement(Field::Minutes) {
                state.decrement(Field::Hours);
            }
            TickOutcome::Advanced
        }
    }
}

/// Handler for the "one second elapsed" event.
///
/// The alarm stays asserted after [`TickOutcome::ZeroReached`]; only a reset clears it.
///
/// # Errors
///
/// Propagates the alarm pin error.
pub fn on_second_elapsed<P: OutputPin>(
    state: &mut TimeState,
    alarm: &mut Alarm<P>,
) -> Result<TickOutcome, P::Error> {
    let outcome = advance(state);
    if outcome == TickOutcome::ZeroReached {
        alarm.assert()?;
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPin;

    fn hms(state: &TimeState) -> (u8, u8, u8) {
        (state.hours(), state.minutes(), state.seconds())
    }

    #[test]
    fn count_up_carries_through_every_field() {
        let mut state = TimeState::from_hms(0, 59, 59, Mode::CountUp).unwrap();
        assert_eq!(advance(&mut state), TickOutcome::Advanced);
        assert_eq!(hms(&state), (1, 0, 0));
    }

    #[test]
    fn count_up_wraps_at_midnight_without_alarm() {
        let (pin, probe) = MockPin::new();
        let mut alarm = Alarm::new(pin).unwrap();
        let mut state = TimeState::from_hms(23, 59, 59, Mode::CountUp).unwrap();

        assert_eq!(on_second_elapsed(&mut state, &mut alarm), Ok(TickOutcome::Wrapped));
        assert!(state.is_zero());
        assert!(state.is_running());
        assert!(!alarm.is_active());
        assert!(!probe.is_high());
    }

    #[test]
    fn count_down_borrows() {
        let mut state = TimeState::from_hms(2, 0, 0, Mode::CountDown).unwrap();
        advance(&mut state);
        assert_eq!(hms(&state), (1, 59, 59));

        let mut state = TimeState::from_hms(0, 3, 0, Mode::CountDown).unwrap();
        advance(&mut state);
        assert_eq!(hms(&state), (0, 2, 59));
    }

    #[test]
    fn count_down_to_zero_then_alarm_once() {
        let (pin, probe) = MockPin::new();
        let mut alarm = Alarm::new(pin).unwrap();
        let mut state = TimeState::from_hms(0, 0, 1, Mode::CountDown).unwrap();

        assert_eq!(on_second_elapsed(&mut state, &mut alarm), Ok(TickOutcome::Advanced));
        assert!(state.is_zero());
        assert!(!alarm.is_active());

        assert_eq!(on_second_elapsed(&mut state, &mut alarm), Ok(TickOutcome::ZeroReached));
        assert!(alarm.is_active());
        assert!(!state.is_running());

        assert_eq!(on_second_elapsed(&mut state, &mut alarm), Ok(TickOutcome::Paused));
        assert!(state.is_zero());
        // Driven low at construction, high once; no redundant re-assertion.
        assert_eq!(probe.history(), vec![false, true]);
    }

    #[test]
    fn paused_tick_changes_nothing() {
        let mut state = TimeState::from_hms(4, 5, 6, Mode::CountUp).unwrap();
        state.pause();
        let before = state;
        assert_eq!(advance(&mut state), TickOutcome::Paused);
        assert_eq!(state, before);
    }

    #[test]
    fn fields_stay_in_range_over_a_full_day() {
        for mode in [Mode::CountUp, Mode::CountDown] {
            let mut state = TimeState::from_hms(23, 59, 59, mode).unwrap();
            for _ in 0..(24 * 60 * 60 + 5) {
                advance(&mut state);
                assert!(state.hours() < 24 && state.minutes() < 60 && state.seconds() < 60);
                state.resume();
            }
        }
    }
}
