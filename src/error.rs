//! Centralized error type for the deepdump umbrella crate.
//!
//! Wraps the protocol and transport errors so `?` propagates naturally across
//! crate boundaries, and adds the failures of collection and output.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("SysEx: {0}")]
    Sysex(#[from] deepdump_sysex::Error),

    #[error("MIDI: {0}")]
    Midi(#[from] deepdump_midi_io::Error),

    #[error("Refusing to overwrite existing file {}", path.display())]
    OutputCollision { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize patch index: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Timed out after receiving {received} of {expected} patch(es)")]
    Timeout { received: usize, expected: usize },

    #[error("Cancelled after receiving {received} of {expected} patch(es)")]
    Cancelled { received: usize, expected: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse failure categories, one per way a dump can go wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRange,
    TransportFailure,
    MalformedPackedData,
    TextDecodeFailure,
    TruncatedResponse,
    UnknownBank,
    OutputCollision,
    Io,
    Timeout,
    Cancelled,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        use deepdump_sysex::Error as Sysex;

        match self {
            Error::Sysex(e) => match e {
                Sysex::InvalidBank(_) | Sysex::InvalidProgramRange { .. } => {
                    ErrorKind::InvalidRange
                }
                Sysex::Unframed { .. } | Sysex::TruncatedResponse { .. } => {
                    ErrorKind::TruncatedResponse
                }
                Sysex::UnknownBank { .. } => ErrorKind::UnknownBank,
                Sysex::MalformedPackedData { .. } => ErrorKind::MalformedPackedData,
                Sysex::TextDecodeFailure { .. } => ErrorKind::TextDecodeFailure,
            },
            Error::Midi(_) => ErrorKind::TransportFailure,
            Error::OutputCollision { .. } => ErrorKind::OutputCollision,
            Error::Io { .. } | Error::Json(_) => ErrorKind::Io,
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::Cancelled { .. } => ErrorKind::Cancelled,
            Error::InvalidConfig(_) => ErrorKind::InvalidRange,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
