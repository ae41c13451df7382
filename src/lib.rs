//! Stopwatch and countdown clock on a multiplexed six-digit display.
//!
//! The hardware-independent part of the firmware: the time value and its tick, the display
//! multiplexer, the button latches and the reset/pause/resume events. `main.rs` binds them
//! to RP2040 interrupts with RTIC.
#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod config;
pub mod control;
pub mod debounce;
pub mod display;
mod error;
pub mod input;
pub mod outputs;
pub mod tick;

#[cfg(test)]
mod mock;

pub use clock::{Field, Mode, TimeState};
pub use control::ControlEvent;
pub use display::DisplayMultiplexer;
pub use error::{Error, Result};
pub use input::{Action, Button, InputDispatcher};
pub use outputs::{Alarm, BcdDigitBus, ModeIndicator};
pub use tick::TickOutcome;
