//! Hardware MIDI ports via midir.
//!
//! Requires the `midi-io` feature.

mod input;
mod output;

pub use input::SysExInputPort;
pub use output::SysExOutputPort;
