//! Compile-time configuration for the stopwatch firmware.

use fugit::{MicrosDurationU32, MicrosDurationU64};

use crate::clock::{Mode, TimeState};

/// Frequency of the crystal on the Pico board.
pub const XTAL_FREQ_HZ: u32 = 12_000_000;

/// Period of the "one second elapsed" event.
pub const TICK_PERIOD: MicrosDurationU64 = MicrosDurationU64::from_ticks(1_000_000);

/// Period of the "refresh display slot" event. One slot per event.
pub const REFRESH_SLOT_PERIOD: MicrosDurationU32 = MicrosDurationU32::from_ticks(1_000);

/// Number of multiplexed digit slots (HH MM SS).
pub const SLOT_COUNT: usize = 6;

pub const REFRESH_SLOT_RATE_HZ: u32 = 1_000_000 / REFRESH_SLOT_PERIOD.ticks();

/// Rate at which every digit gets refreshed once.
pub const FRAME_RATE_HZ: u32 = REFRESH_SLOT_RATE_HZ / SLOT_COUNT as u32;

const _: () = assert!(REFRESH_SLOT_RATE_HZ >= 600, "refresh slot rate too low");
const _: () = assert!(FRAME_RATE_HZ >= 100, "display will flicker");

/// State loaded at power-on: 00:00:00, counting up, running.
pub const INITIAL_STATE: TimeState = TimeState::new(Mode::CountUp, true);
