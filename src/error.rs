use derive_more::Display;

use crate::clock::Field;

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised while building or rendering a [`TimeState`](crate::clock::TimeState).
///
/// The tick, display and input paths never fail; only presets and log rendering can.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    #[display("{field:?} value {value} is out of range")]
    FieldOutOfRange { field: Field, value: u8 },

    #[display("Format error")]
    Format,
}

impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        Self::Format
    }
}

impl core::error::Error for Error {}
