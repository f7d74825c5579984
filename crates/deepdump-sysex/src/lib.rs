//! SysEx protocol types for the DeepMind patch dump.
//!
//! Covers the outbound bulk dump request, the typed view over an inbound patch
//! response, the packed-parameter transform and the per-patch record that the
//! archive writers consume. Nothing in this crate performs I/O.

pub mod error;
pub use error::{Error, Result};

mod bank;
pub use bank::{Bank, BANK_COUNT};

mod message;
pub use message::{SysExMessage, MIDI_DATA_MAX, MIDI_SYSEX_END, MIDI_SYSEX_START};

pub mod pack;
pub use pack::{unpack, unpacked_len};

mod request;
pub use request::{
    DumpRequest, DEVICE_ID, MANUFACTURER_ID, PATCH_DUMP_REQUEST, PROGRAM_MAX, REQUEST_LEN, SUB_ID,
};

pub mod response;
pub use response::PatchResponse;

mod record;
pub use record::{extract_name, PatchRecord};
