//! Test helpers and fixtures for deepdump integration tests.
//!
//! [`FakeDeepMind`] stands in for the synth: it answers a dump request by
//! pushing canned patch responses onto a loopback channel, and records what it
//! was sent and whether it was closed.

#![allow(dead_code)]

use deepdump::midi::SysExAssembler;
use deepdump::{sysex_channel, SysExMessage, SysExReceiver, SysExSender, SysExSink};

/// Offset of the 16-byte name field in the unpacked parameters.
pub const NAME_OFFSET: usize = 223;

/// Unpacked parameter bytes per patch.
pub const PARAMS_LEN: usize = 245;

/// Builds a patch response as the synth would send it.
///
/// `fill` sets every parameter byte outside the name so that patches with the
/// same name still carry different data.
pub fn patch(bank: u8, program: u8, name: &[u8], fill: u8) -> SysExMessage {
    let mut params = vec![fill; PARAMS_LEN];
    params[NAME_OFFSET..NAME_OFFSET + 16].fill(0);
    params[NAME_OFFSET..NAME_OFFSET + name.len()].copy_from_slice(name);
    SysExMessage::new(frame(bank, program, &pack(&params))).unwrap()
}

/// Wraps a packed block in the response header and terminator.
pub fn frame(bank: u8, program: u8, packed: &[u8]) -> Vec<u8> {
    let mut bytes = vec![0xF0, 0x00, 0x20, 0x32, 0x20, 0x00, 0x02, 0x06, bank, program];
    bytes.extend_from_slice(packed);
    bytes.push(0xF7);
    bytes
}

/// 7-bit packs `params`, moving each high bit into the chunk's flag byte.
pub fn pack(params: &[u8]) -> Vec<u8> {
    let mut packed = Vec::new();
    for chunk in params.chunks(7) {
        let mut flag = 0u8;
        let mut payload = [0u8; 7];
        for (j, &b) in chunk.iter().enumerate() {
            flag |= b & (1 << j);
            payload[j] = b & !(1 << j);
        }
        packed.push(flag);
        packed.extend_from_slice(&payload);
    }
    packed
}

/// Answers each request with a fixed list of patch responses.
pub struct FakeDeepMind {
    replies: Vec<SysExMessage>,
    tx: SysExSender,
    pub sent: Vec<SysExMessage>,
    pub closed: bool,
}

impl FakeDeepMind {
    /// A synth that replies with `patches`, returning the input side too.
    pub fn new(patches: Vec<SysExMessage>) -> (Self, SysExReceiver) {
        let (tx, rx) = sysex_channel();
        let device = Self {
            replies: patches,
            tx,
            sent: Vec::new(),
            closed: false,
        };
        (device, rx)
    }

    /// A synth whose replies are arbitrary byte chunks, reassembled the way
    /// the hardware input does.
    pub fn with_raw(chunks: Vec<Vec<u8>>) -> (Self, SysExReceiver) {
        let mut assembler = SysExAssembler::new();
        let mut patches = Vec::new();
        for chunk in &chunks {
            assembler.feed(chunk, |msg| patches.push(msg));
        }
        Self::new(patches)
    }
}

impl SysExSink for FakeDeepMind {
    fn send(&mut self, message: &SysExMessage) -> deepdump::midi::Result<()> {
        if self.closed {
            return Err(deepdump::midi::Error::Closed(
                deepdump::midi::PortDirection::Output,
            ));
        }
        self.sent.push(message.clone());
        for reply in &self.replies {
            self.tx.send(reply)?;
        }
        Ok(())
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// An output port that rejects every message.
#[derive(Default)]
pub struct BrokenOutput {
    pub attempts: usize,
    pub closed: bool,
}

impl SysExSink for BrokenOutput {
    fn send(&mut self, _message: &SysExMessage) -> deepdump::midi::Result<()> {
        self.attempts += 1;
        Err(deepdump::midi::Error::Send("device unplugged".to_string()))
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
