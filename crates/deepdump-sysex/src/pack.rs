//! Packed parameter transform.
//!
//! The instrument carries 8-bit parameter data over the 7-bit MIDI transport in
//! chunks of eight bytes: one flag byte followed by seven payload bytes. Bit
//! `j - 1` of the flag byte belongs to payload byte `j`.
//!
//! The flag bit is ORed into the payload byte at the *same* bit position it
//! occupies in the flag byte. It is not moved up to bit 7 as most 7-bit MIDI
//! packing schemes would do. Do not change this without checking against the
//! instrument's documented SysEx format.

use crate::error::{Error, Result};

/// Bytes per packed chunk: one flag byte plus seven payload bytes.
pub const CHUNK_LEN: usize = 8;

/// Decoded bytes produced per packed chunk.
pub const PAYLOAD_LEN: usize = CHUNK_LEN - 1;

/// Length of the unpacked form of a packed block of `packed_len` bytes.
#[inline]
pub fn unpacked_len(packed_len: usize) -> usize {
    packed_len / CHUNK_LEN * PAYLOAD_LEN
}

/// Unpacks a packed parameter block into raw parameter bytes.
///
/// Fails with [`Error::MalformedPackedData`] unless `packed.len()` is a
/// multiple of [`CHUNK_LEN`]; a trailing partial chunk is never accepted.
pub fn unpack(packed: &[u8]) -> Result<Vec<u8>> {
    if packed.len() % CHUNK_LEN != 0 {
        return Err(Error::MalformedPackedData { len: packed.len() });
    }

    let mut unpacked = Vec::with_capacity(unpacked_len(packed.len()));
    for chunk in packed.chunks_exact(CHUNK_LEN) {
        let flags = chunk[0];
        for (j, &payload) in chunk.iter().enumerate().skip(1) {
            unpacked.push(payload | (flags & (1 << (j - 1))));
        }
    }

    Ok(unpacked)
}
