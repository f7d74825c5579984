//! # deepdump - DeepMind patch dumper
//!
//! Requests a range of programs from a Behringer DeepMind over MIDI SysEx,
//! collects the replies and archives them as individual `.sysex` files plus a
//! `patch_lookup.json` index of name to base64 packed parameters.
//!
//! ## Architecture
//!
//! deepdump is an umbrella crate that coordinates:
//! - **deepdump-sysex** - Protocol (dump request, 7-bit unpacking, patch records)
//! - **deepdump-midi-io** - Transport (SysEx sink/source, reassembly, midir ports)
//!
//! ## Quick Start
//!
//! ```ignore
//! use deepdump::prelude::*;
//!
//! let mut output = SysExOutputPort::connect_by_name("DeepMind")?;
//! let mut input = SysExInputPort::connect_by_name("DeepMind")?;
//!
//! let summary = DumpSession::builder()
//!     .bank("A")
//!     .programs(0, 127)
//!     .output_dir("backup")
//!     .build()?
//!     .run(&mut output, &mut input)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `midi-io` (default) - Hardware MIDI ports via midir

/// Re-export of deepdump-sysex for direct access
pub use deepdump_sysex as sysex;

/// Re-export of deepdump-midi-io for direct access
pub use deepdump_midi_io as midi;

pub use deepdump_sysex::{Bank, DumpRequest, PatchRecord, PatchResponse, SysExMessage};

pub use deepdump_midi_io::{sysex_channel, SysExReceiver, SysExSender, SysExSink, SysExSource};

#[cfg(feature = "midi-io")]
pub use deepdump_midi_io::{SysExInputPort, SysExOutputPort};

mod error;
pub use error::{Error, ErrorKind, Result};

pub mod archive;
pub use archive::{PatchArchive, PatchIndex, INDEX_FILE_NAME};

pub mod collector;
pub use collector::{CancelToken, Collector};

mod session;
pub use session::{DumpSession, DumpSessionBuilder, DumpSummary};

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{CancelToken, DumpSession, DumpSummary, Error, Result};
    pub use crate::{SysExSink, SysExSource};

    #[cfg(feature = "midi-io")]
    pub use crate::{SysExInputPort, SysExOutputPort};
}
