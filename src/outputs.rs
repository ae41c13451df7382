//! Output lines driven by the stopwatch: the multiplexed digit bus, the alarm and the
//! mode indicators.

use embedded_hal::digital::v2::OutputPin;

use crate::clock::Mode;
use crate::config::SLOT_COUNT;

/// Number of value lines carrying one BCD digit.
pub const BCD_WIDTH: usize = 4;

/// Decimal digit to the level of each BCD value line, least significant bit first.
const DIGIT_TO_BCD: [[bool; BCD_WIDTH]; 10] = [
    [false, false, false, false],
    [true, false, false, false],
    [false, true, false, false],
    [true, true, false, false],
    [false, false, true, false],
    [true, false, true, false],
    [false, true, true, false],
    [true, true, true, false],
    [false, false, false, true],
    [true, false, false, true],
];

/// Something that can show one digit in one slot of a multiplexed display.
pub trait DigitBus {
    type Error;

    /// Enables `slot` (and only `slot`) showing `digit`.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying output lines.
    fn drive(&mut self, slot: usize, digit: u8) -> Result<(), Self::Error>;
}

/// Six one-hot digit-enable lines sharing four BCD value lines.
pub struct BcdDigitBus<P> {
    enables: [P; SLOT_COUNT],
    bcd: [P; BCD_WIDTH],
    enabled: Option<usize>,
}

impl<P: OutputPin> BcdDigitBus<P> {
    /// Takes ownership of the lines and switches every digit off.
    ///
    /// # Errors
    ///
    /// Propagates the pin error if a line cannot be driven low.
    pub fn new(enables: [P; SLOT_COUNT], bcd: [P; BCD_WIDTH]) -> Result<Self, P::Error> {
        let mut bus = Self {
            enables,
            bcd,
            enabled: None,
        };
        for pin in bus.enables.iter_mut().chain(bus.bcd.iter_mut()) {
            pin.set_low()?;
        }
        Ok(bus)
    }

    /// Slot currently enabled, if any.
    #[must_use]
    pub const fn enabled(&self) -> Option<usize> {
        self.enabled
    }
}

impl<P: OutputPin> DigitBus for BcdDigitBus<P> {
    type Error = P::Error;

    fn drive(&mut self, slot: usize, digit: u8) -> Result<(), Self::Error> {
        let slot = slot % SLOT_COUNT;
        // Release the previous digit before touching the shared value lines so the new
        // value never shows on the old position.
        if let Some(previous) = self.enabled.take() {
            self.enables[previous].set_low()?;
        }
        let levels = DIGIT_TO_BCD[usize::from(digit % 10)];
        for (pin, high) in self.bcd.iter_mut().zip(levels) {
            if high {
                pin.set_high()?;
            } else {
                pin.set_low()?;
            }
        }
        self.enables[slot].set_high()?;
        self.enabled = Some(slot);
        Ok(())
    }
}

/// Alarm line, latched once asserted until explicitly cleared.
pub struct Alarm<P> {
    pin: P,
    active: bool,
}

impl<P: OutputPin> Alarm<P> {
    /// # Errors
    ///
    /// Propagates the pin error if the line cannot be driven low.
    pub fn new(mut pin: P) -> Result<Self, P::Error> {
        pin.set_low()?;
        Ok(Self { pin, active: false })
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Asserts the alarm. Returns true only if it was not already asserted.
    ///
    /// # Errors
    ///
    /// Propagates the pin error.
    pub fn assert(&mut self) -> Result<bool, P::Error> {
        if self.active {
            return Ok(false);
        }
        self.pin.set_high()?;
        self.active = true;
        Ok(true)
    }

    /// # Errors
    ///
    /// Propagates the pin error.
    pub fn clear(&mut self) -> Result<(), P::Error> {
        self.pin.set_low()?;
        self.active = false;
        Ok(())
    }
}

/// Count-up and countdown LEDs; exactly one is lit.
pub struct ModeIndicator<P> {
    count_up: P,
    count_down: P,
}

impl<P: OutputPin> ModeIndicator<P> {
    pub const fn new(count_up: P, count_down: P) -> Self {
        Self {
            count_up,
            count_down,
        }
    }

    /// # Errors
    ///
    /// Propagates the pin error.
    pub fn reflect(&mut self, mode: Mode) -> Result<(), P::Error> {
        let (on, off) = match mode {
            Mode::CountUp => (&mut self.count_up, &mut self.count_down),
            Mode::CountDown => (&mut self.count_down, &mut self.count_up),
        };
        off.set_low()?;
        on.set_high()
    }
}
