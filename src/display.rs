use crate::clock::TimeState;
use crate::config::SLOT_COUNT;
use crate::outputs::DigitBus;

/// Splits the time into the six displayed digits, left to right.
#[must_use]
pub fn digits(clock: &TimeState) -> [u8; SLOT_COUNT] {
    [
        clock.hours() / 10,
        clock.hours() % 10,
        clock.minutes() / 10,
        clock.minutes() % 10,
        clock.seconds() / 10,
        clock.seconds() % 10,
    ]
}

/// Refreshes one digit slot per call, cycling H-tens, H-ones, M-tens, M-ones, S-tens, S-ones.
#[derive(Debug, Default)]
pub struct DisplayMultiplexer {
    cursor: usize,
}

impl DisplayMultiplexer {
    #[must_use]
    pub const fn new() -> Self {
        Self { cursor: 0 }
    }

    /// Slot the next refresh will drive.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handler for the "refresh display slot" event.
    ///
    /// `clock` should be a snapshot taken under the clock lock so that all six slots of
    /// one frame come from a consistent time value. Returns the slot that was driven.
    ///
    /// # Errors
    ///
    /// Propagates the bus error; the cursor still advances.
    pub fn on_refresh_slot<B: DigitBus>(
        &mut self,
        clock: &TimeState,
        bus: &mut B,
    ) -> Result<usize, B::Error> {
        let slot = self.cursor;
        self.cursor = (self.cursor + 1) % SLOT_COUNT;
        bus.drive(slot, digits(clock)[slot])?;
        Ok(slot)
    }
}
