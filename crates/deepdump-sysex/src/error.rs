//! Error types for the SysEx protocol layer.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown bank '{0}': expected a letter from A to H")]
    InvalidBank(String),

    #[error("Invalid program range {first}..={last}: expected 0 <= first <= last <= 127")]
    InvalidProgramRange { first: i32, last: i32 },

    #[error("Not a SysEx message: {len} byte(s) without F0/F7 framing")]
    Unframed { len: usize },

    #[error("Patch response too short: {len} byte(s), at least {min} required")]
    TruncatedResponse { len: usize, min: usize },

    #[error("Patch response names bank index {index}, expected 0-7")]
    UnknownBank { index: u8 },

    #[error("Packed parameter block is {len} byte(s), not a multiple of 8")]
    MalformedPackedData { len: usize },

    #[error("Patch name byte {byte:#04X} at parameter offset {offset} is not ASCII")]
    TextDecodeFailure { offset: usize, byte: u8 },
}

pub type Result<T> = std::result::Result<T, Error>;
