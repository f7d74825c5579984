//! SysEx transport for deepdump.
//!
//! Provides the sink/source traits the dump exchange is written against, a
//! reassembler that turns raw MIDI input into complete SysEx messages, an
//! in-memory loopback channel, and hardware ports over midir.
//!
//! Feature gates: `midi-io` (hardware I/O via midir).

pub mod error;
pub use error::{Error, Result};

mod transport;
pub use transport::{SysExSink, SysExSource};

mod assembler;
pub use assembler::{SysExAssembler, MAX_SYSEX_LEN};

pub mod loopback;
pub use loopback::{sysex_channel, SysExReceiver, SysExSender};

mod device;
pub use device::{find_device, MidiDevice, PortDirection};

#[cfg(feature = "midi-io")]
pub(crate) mod io;

#[cfg(feature = "midi-io")]
pub use io::{SysExInputPort, SysExOutputPort};

pub use deepdump_sysex::SysExMessage;
