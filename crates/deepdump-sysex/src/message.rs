//! Framed System Exclusive messages.

use crate::error::{Error, Result};

// MIDI byte ranges
pub const MIDI_DATA_MAX: u8 = 0x7F; // highest data byte
pub const MIDI_SYSEX_START: u8 = 0xF0; // \_ System exclusive messages
pub const MIDI_SYSEX_END: u8 = 0xF7; // /

/// A complete SysEx message, `F0` through `F7` inclusive.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SysExMessage {
    bytes: Vec<u8>,
}

impl SysExMessage {
    /// Wraps `bytes`, which must start with `F0` and end with `F7`.
    pub fn new(bytes: Vec<u8>) -> Result<Self> {
        match (bytes.first(), bytes.last()) {
            (Some(&MIDI_SYSEX_START), Some(&MIDI_SYSEX_END)) if bytes.len() >= 2 => {
                Ok(Self { bytes })
            }
            _ => Err(Error::Unframed { len: bytes.len() }),
        }
    }

    /// Caller guarantees the framing.
    pub(crate) fn from_framed(bytes: Vec<u8>) -> Self {
        debug_assert!(bytes.len() >= 2);
        Self { bytes }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`; the framing bytes are always present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for SysExMessage {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl TryFrom<Vec<u8>> for SysExMessage {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Self::new(bytes)
    }
}

impl TryFrom<&[u8]> for SysExMessage {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::new(bytes.to_vec())
    }
}

impl std::fmt::Debug for SysExMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const PREVIEW: usize = 12;
        let shown = self.bytes.len().min(PREVIEW);
        write!(f, "SysExMessage({} bytes: {:02X?}", self.bytes.len(), &self.bytes[..shown])?;
        if self.bytes.len() > PREVIEW {
            write!(f, "...")?;
        }
        write!(f, ")")
    }
}
