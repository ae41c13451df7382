//! Reset, pause and resume: asynchronous edge events that act immediately.

use embedded_hal::digital::v2::OutputPin;

use crate::clock::TimeState;
use crate::outputs::Alarm;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlEvent {
    Reset,
    Pause,
    Resume,
}

impl ControlEvent {
    /// Highest priority first. When several edges are pending in one interrupt they are
    /// handled in this order, so a simultaneous pause and resume leaves the stopwatch running.
    pub const BY_PRIORITY: [Self; 3] = [Self::Reset, Self::Pause, Self::Resume];

    /// Applies the event. Any event is accepted in any state and repeating one is harmless.
    ///
    /// Reset zeroes the time and silences the alarm without touching mode or running.
    ///
    /// # Errors
    ///
    /// Propagates the alarm pin error; the time value is updated regardless.
    pub fn apply<P: OutputPin>(
        self,
        state: &mut TimeState,
        alarm: &mut Alarm<P>,
    ) -> Result<(), P::Error> {
        match self {
            Self::Reset => {
                state.reset();
                alarm.clear()
            }
            Self::Pause => {
                state.pause();
                Ok(())
            }
            Self::Resume => {
                state.resume();
                Ok(())
            }
        }
    }
}
