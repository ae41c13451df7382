use crate::error::{Error, Result};

pub const MAX_HOURS: u8 = 24;
pub const MAX_MINUTES: u8 = 60;
pub const MAX_SECONDS: u8 = 60;

/// Direction applied on each second tick.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    CountUp,
    CountDown,
}

impl Mode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::CountUp => Self::CountDown,
            Self::CountDown => Self::CountUp,
        }
    }
}

/// One adjustable field of the time value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Hours,
    Minutes,
    Seconds,
}

impl Field {
    /// Exclusive upper bound of the field.
    #[must_use]
    pub const fn max(self) -> u8 {
        match self {
            Self::Hours => MAX_HOURS,
            Self::Minutes => MAX_MINUTES,
            Self::Seconds => MAX_SECONDS,
        }
    }
}

/// Shared state for the stopwatch.
///
/// `hours`, `minutes` and `seconds` always form a valid time of day. Every mutator keeps
/// them in range, so a copy taken under a lock is always a consistent snapshot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeState {
    hours: u8,
    minutes: u8,
    seconds: u8,
    mode: Mode,
    running: bool,
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new(Mode::CountUp, true)
    }
}

impl TimeState {
    /// 00:00:00 in the given mode.
    #[must_use]
    pub const fn new(mode: Mode, running: bool) -> Self {
        Self {
            hours: 0,
            minutes: 0,
            seconds: 0,
            mode,
            running,
        }
    }

    /// Builds a preset time, e.g. the start value of a countdown.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldOutOfRange`] if any field is not below its maximum.
    pub fn from_hms(hours: u8, minutes: u8, seconds: u8, mode: Mode) -> Result<Self> {
        for (field, value) in [
            (Field::Hours, hours),
            (Field::Minutes, minutes),
            (Field::Seconds, seconds),
        ] {
            if value >= field.max() {
                return Err(Error::FieldOutOfRange { field, value });
            }
        }
        Ok(Self {
            hours,
            minutes,
            seconds,
            mode,
            running: true,
        })
    }

    #[must_use]
    pub const fn hours(&self) -> u8 {
        self.hours
    }

    #[must_use]
    pub const fn minutes(&self) -> u8 {
        self.minutes
    }

    #[must_use]
    pub const fn seconds(&self) -> u8 {
        self.seconds
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }

    #[must_use]
    pub const fn get(&self, field: Field) -> u8 {
        match field {
            Field::Hours => self.hours,
            Field::Minutes => self.minutes,
            Field::Seconds => self.seconds,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut u8 {
        match field {
            Field::Hours => &mut self.hours,
            Field::Minutes => &mut self.minutes,
            Field::Seconds => &mut self.seconds,
        }
    }

    /// Increments one field, wrapping to 0 at its maximum. Returns true on wrap.
    ///
    /// Other fields are untouched; carrying is up to the caller.
    pub fn increment(&mut self, field: Field) -> bool {
        let value = self.field_mut(field);
        *value += 1;
        if *value >= field.max() {
            *value = 0;
            true
        } else {
            false
        }
    }

    /// Decrements one field, wrapping to `max - 1` at 0. Returns true on wrap (borrow).
    pub fn decrement(&mut self, field: Field) -> bool {
        let value = self.field_mut(field);
        if *value == 0 {
            *value = field.max() - 1;
            true
        } else {
            *value -= 1;
            false
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// Back to 00:00:00. Mode and running are kept.
    pub fn reset(&mut self) {
        self.hours = 0;
        self.minutes = 0;
        self.seconds = 0;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Renders the time as `HH:MM:SS` into `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if `buf` is shorter than 8 bytes.
    pub fn format_hms<'a>(&self, buf: &'a mut [u8]) -> Result<&'a str> {
        Ok(format_no_std::show(
            buf,
            format_args!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds),
        )?)
    }
}
