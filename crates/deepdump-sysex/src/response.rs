//! Typed view over a patch dump response.
//!
//! ```text
//! F0 00 20 32 .. .. .. .. <bank> <program> <packed parameters ...> F7
//! 0                        8      9         10                     len-1
//! ```

use crate::bank::Bank;
use crate::error::{Error, Result};
use crate::message::SysExMessage;
use crate::pack::unpack;

/// Fixed offsets within a response and its unpacked parameters.
pub mod layout {
    use std::ops::Range;

    /// Bank index (0-7) in the raw response.
    pub const BANK: usize = 8;
    /// Zero-based program index in the raw response.
    pub const PROGRAM: usize = 9;
    /// First byte of the packed parameter block in the raw response.
    pub const PARAMS_START: usize = 10;
    /// Patch name, 16 ASCII bytes, in the *unpacked* parameters.
    pub const NAME: Range<usize> = 223..239;
}

/// Shortest response that still has a header and a terminator.
pub const MIN_RESPONSE_LEN: usize = layout::PARAMS_START + 1;

#[derive(Clone, Copy, Debug)]
pub struct PatchResponse<'a> {
    bytes: &'a [u8],
}

impl<'a> PatchResponse<'a> {
    pub fn new(message: &'a SysExMessage) -> Result<Self> {
        let bytes = message.as_bytes();
        if bytes.len() < MIN_RESPONSE_LEN {
            return Err(Error::TruncatedResponse {
                len: bytes.len(),
                min: MIN_RESPONSE_LEN,
            });
        }
        Ok(Self { bytes })
    }

    /// The whole response, framing included.
    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    #[inline]
    pub fn bank_index(&self) -> u8 {
        self.bytes[layout::BANK]
    }

    pub fn bank(&self) -> Result<Bank> {
        let index = self.bank_index();
        Bank::from_index(index).ok_or(Error::UnknownBank { index })
    }

    /// Zero-based, as carried on the wire.
    #[inline]
    pub fn program_index(&self) -> u8 {
        self.bytes[layout::PROGRAM]
    }

    /// One-based, as shown on the instrument.
    #[inline]
    pub fn program_number(&self) -> u16 {
        self.program_index() as u16 + 1
    }

    /// Everything between the header and the terminator.
    #[inline]
    pub fn packed_params(&self) -> &'a [u8] {
        &self.bytes[layout::PARAMS_START..self.bytes.len() - 1]
    }

    pub fn unpack_params(&self) -> Result<Vec<u8>> {
        unpack(self.packed_params())
    }
}
