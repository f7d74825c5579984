//! Error types for the SysEx transport.

use thiserror::Error;

use crate::device::PortDirection;

#[derive(Error, Debug)]
pub enum Error {
    #[error("MIDI device error: {0}")]
    MidiDevice(String),

    #[error("MIDI port error: {0}")]
    MidiPort(String),

    #[error("No MIDI {direction} port matching '{name}'")]
    PortNotFound {
        direction: PortDirection,
        name: String,
    },

    #[error("Failed to send SysEx message: {0}")]
    Send(String),

    #[error("MIDI {0} port is closed")]
    Closed(PortDirection),

    #[error("MIDI {0} channel disconnected")]
    Disconnected(PortDirection),
}

#[cfg(feature = "midi-io")]
impl From<midir::InitError> for Error {
    fn from(e: midir::InitError) -> Self {
        Error::MidiDevice(e.to_string())
    }
}

#[cfg(feature = "midi-io")]
impl From<midir::ConnectError<midir::MidiOutput>> for Error {
    fn from(e: midir::ConnectError<midir::MidiOutput>) -> Self {
        Error::MidiPort(e.to_string())
    }
}

#[cfg(feature = "midi-io")]
impl From<midir::ConnectError<midir::MidiInput>> for Error {
    fn from(e: midir::ConnectError<midir::MidiInput>) -> Self {
        Error::MidiPort(e.to_string())
    }
}

#[cfg(feature = "midi-io")]
impl From<midir::SendError> for Error {
    fn from(e: midir::SendError) -> Self {
        Error::Send(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
