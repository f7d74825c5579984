//! Reassembles complete SysEx messages from raw MIDI input.
//!
//! Backends may hand over a long SysEx message in several pieces, and the input
//! also carries traffic that is not SysEx at all (clock, active sensing, notes).
//! Only complete `F0 .. F7` messages come out of the assembler.

use deepdump_sysex::{SysExMessage, MIDI_DATA_MAX, MIDI_SYSEX_END, MIDI_SYSEX_START};
use tracing::{debug, warn};

const MIDI_SYSRT_MIN: u8 = 0xF8; // System real-time messages (0xF8-0xFF)

/// Longest SysEx message accepted before the partial message is discarded.
pub const MAX_SYSEX_LEN: usize = 64 * 1024;

#[derive(Debug)]
pub struct SysExAssembler {
    buffer: Vec<u8>,
    in_sysex: bool,
    cap: usize,
}

impl SysExAssembler {
    pub fn new() -> Self {
        Self::with_cap(MAX_SYSEX_LEN)
    }

    pub fn with_cap(cap: usize) -> Self {
        Self {
            buffer: Vec::new(),
            in_sysex: false,
            cap,
        }
    }

    /// Whether a message has been started but not yet terminated.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.in_sysex
    }

    /// Consumes `bytes`, invoking `on_msg` for each message completed by them.
    pub fn feed<F>(&mut self, bytes: &[u8], mut on_msg: F)
    where
        F: FnMut(SysExMessage),
    {
        for &byte in bytes {
            match byte {
                MIDI_SYSEX_START => {
                    if self.in_sysex {
                        warn!(
                            "SysEx message interrupted by new start after {} byte(s)",
                            self.buffer.len()
                        );
                    }
                    self.buffer.clear();
                    self.buffer.push(byte);
                    self.in_sysex = true;
                }
                MIDI_SYSEX_END if self.in_sysex => {
                    self.buffer.push(byte);
                    self.in_sysex = false;
                    match SysExMessage::new(std::mem::take(&mut self.buffer)) {
                        Ok(msg) => on_msg(msg),
                        Err(e) => debug!("Dropping SysEx fragment: {}", e),
                    }
                }
                // Real-time bytes may be interleaved anywhere, even inside SysEx.
                b if b >= MIDI_SYSRT_MIN => {}
                b if b > MIDI_DATA_MAX => {
                    if self.in_sysex {
                        debug!(
                            "SysEx message aborted by status byte {:#04X} after {} byte(s)",
                            b,
                            self.buffer.len()
                        );
                        self.abort();
                    }
                }
                b => {
                    if !self.in_sysex {
                        continue;
                    }
                    if self.buffer.len() + 1 >= self.cap {
                        warn!("SysEx message exceeds {} bytes, discarding", self.cap);
                        self.abort();
                        continue;
                    }
                    self.buffer.push(b);
                }
            }
        }
    }

    fn abort(&mut self) {
        self.buffer.clear();
        self.in_sysex = false;
    }
}

impl Default for SysExAssembler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(assembler: &mut SysExAssembler, bytes: &[u8]) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        assembler.feed(bytes, |msg| out.push(msg.into_bytes()));
        out
    }

    #[test]
    fn test_single_message() {
        let mut asm = SysExAssembler::new();
        let out = collect(&mut asm, &[0xF0, 0x00, 0x20, 0x32, 0xF7]);
        assert_eq!(out, vec![vec![0xF0, 0x00, 0x20, 0x32, 0xF7]]);
        assert!(!asm.is_pending());
    }

    #[test]
    fn test_message_split_across_feeds() {
        let mut asm = SysExAssembler::new();
        assert!(collect(&mut asm, &[0xF0, 0x01, 0x02]).is_empty());
        assert!(asm.is_pending());
        assert!(collect(&mut asm, &[0x03, 0x04]).is_empty());
        let out = collect(&mut asm, &[0x05, 0xF7]);
        assert_eq!(out, vec![vec![0xF0, 0x01, 0x02, 0x03, 0x04, 0x05, 0xF7]]);
    }

    #[test]
    fn test_two_messages_in_one_feed() {
        let mut asm = SysExAssembler::new();
        let out = collect(&mut asm, &[0xF0, 0x01, 0xF7, 0xF0, 0x02, 0xF7]);
        assert_eq!(out, vec![vec![0xF0, 0x01, 0xF7], vec![0xF0, 0x02, 0xF7]]);
    }

    #[test]
    fn test_non_sysex_traffic_ignored() {
        let mut asm = SysExAssembler::new();
        // Note on, clock, active sensing, CC.
        let out = collect(&mut asm, &[0x90, 60, 100, 0xF8, 0xFE, 0xB0, 7, 127]);
        assert!(out.is_empty());
        assert!(!asm.is_pending());
    }

    #[test]
    fn test_realtime_inside_sysex_skipped() {
        let mut asm = SysExAssembler::new();
        let out = collect(&mut asm, &[0xF0, 0x01, 0xF8, 0x02, 0xFE, 0xF7]);
        assert_eq!(out, vec![vec![0xF0, 0x01, 0x02, 0xF7]]);
    }

    #[test]
    fn test_status_byte_aborts_partial_message() {
        let mut asm = SysExAssembler::new();
        let out = collect(&mut asm, &[0xF0, 0x01, 0x90, 60, 100, 0xF7]);
        assert!(out.is_empty());
        assert!(!asm.is_pending());
    }

    #[test]
    fn test_new_start_restarts_message() {
        let mut asm = SysExAssembler::new();
        let out = collect(&mut asm, &[0xF0, 0x01, 0x02, 0xF0, 0x03, 0xF7]);
        assert_eq!(out, vec![vec![0xF0, 0x03, 0xF7]]);
    }

    #[test]
    fn test_stray_end_ignored() {
        let mut asm = SysExAssembler::new();
        assert!(collect(&mut asm, &[0xF7, 0x01, 0xF7]).is_empty());
    }

    #[test]
    fn test_overflow_discards_message() {
        let mut asm = SysExAssembler::with_cap(4);
        let out = collect(&mut asm, &[0xF0, 0x01, 0x02, 0x03, 0x04, 0xF7]);
        assert!(out.is_empty());
        let out = collect(&mut asm, &[0xF0, 0x01, 0xF7]);
        assert_eq!(out, vec![vec![0xF0, 0x01, 0xF7]]);
    }
}
