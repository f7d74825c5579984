//! Decoded patch identity plus the bytes that get archived.

use crate::bank::Bank;
use crate::error::{Error, Result};
use crate::message::SysExMessage;
use crate::response::{layout, PatchResponse};

/// One decoded patch, borrowing from the response it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatchRecord<'a> {
    bank: Bank,
    program: u16,
    name: String,
    raw: &'a [u8],
    packed: &'a [u8],
}

impl<'a> PatchRecord<'a> {
    /// Reads the header, unpacks the parameters and extracts the name.
    pub fn decode(message: &'a SysExMessage) -> Result<Self> {
        let response = PatchResponse::new(message)?;
        let bank = response.bank()?;
        let params = response.unpack_params()?;
        let name = extract_name(&params)?;

        Ok(Self {
            bank,
            program: response.program_number(),
            name,
            raw: response.bytes(),
            packed: response.packed_params(),
        })
    }

    #[inline]
    pub fn bank(&self) -> Bank {
        self.bank
    }

    /// One-based program number.
    #[inline]
    pub fn program(&self) -> u16 {
        self.program
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full response, `F0` through `F7`.
    #[inline]
    pub fn raw(&self) -> &'a [u8] {
        self.raw
    }

    /// The packed parameter block, as received.
    #[inline]
    pub fn packed(&self) -> &'a [u8] {
        self.packed
    }

    /// `{Letter}_{program:03}_{name}.sysex`
    pub fn file_name(&self) -> String {
        format!("{}_{:03}_{}.sysex", self.bank.letter(), self.program, self.name)
    }
}

/// Reads the patch name from unpacked parameters.
///
/// The 16-byte field is clamped to the available bytes, then trailing NULs and
/// after them trailing whitespace are removed. Leading spaces are kept.
pub fn extract_name(params: &[u8]) -> Result<String> {
    let start = layout::NAME.start.min(params.len());
    let end = layout::NAME.end.min(params.len());
    let field = &params[start..end];

    if let Some(i) = field.iter().position(|b| !b.is_ascii()) {
        return Err(Error::TextDecodeFailure {
            offset: start + i,
            byte: field[i],
        });
    }

    let text: String = field.iter().map(|&b| b as char).collect();
    Ok(text
        .trim_end_matches('\0')
        .trim_end_matches(is_name_padding)
        .to_string())
}

fn is_name_padding(c: char) -> bool {
    // ASCII whitespace plus VT and the FS/GS/RS/US separators.
    c.is_ascii_whitespace() || matches!(c, '\x0b' | '\x1c'..='\x1f')
}
