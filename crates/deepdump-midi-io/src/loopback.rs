//! In-memory SysEx channel.
//!
//! Connects a sink directly to a source without any MIDI hardware. Used for
//! tests and for driving a dump from a recorded capture.

use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};

use crate::device::PortDirection;
use crate::error::{Error, Result};
use crate::transport::{SysExSink, SysExSource};
use crate::SysExMessage;

/// Creates a connected sender/receiver pair.
pub fn sysex_channel() -> (SysExSender, SysExReceiver) {
    let (tx, rx) = unbounded();
    (
        SysExSender { sender: Some(tx) },
        SysExReceiver { receiver: Some(rx) },
    )
}

#[derive(Debug, Clone)]
pub struct SysExSender {
    sender: Option<Sender<SysExMessage>>,
}

impl SysExSender {
    pub fn is_closed(&self) -> bool {
        self.sender.is_none()
    }
}

impl SysExSink for SysExSender {
    fn send(&mut self, message: &SysExMessage) -> Result<()> {
        let sender = self
            .sender
            .as_ref()
            .ok_or(Error::Closed(PortDirection::Output))?;
        sender
            .send(message.clone())
            .map_err(|_| Error::Disconnected(PortDirection::Output))
    }

    fn close(&mut self) {
        self.sender = None;
    }
}

#[derive(Debug)]
pub struct SysExReceiver {
    receiver: Option<Receiver<SysExMessage>>,
}

impl SysExReceiver {
    pub fn is_closed(&self) -> bool {
        self.receiver.is_none()
    }

    fn receiver(&self) -> Result<&Receiver<SysExMessage>> {
        self.receiver
            .as_ref()
            .ok_or(Error::Closed(PortDirection::Input))
    }
}

impl SysExSource for SysExReceiver {
    fn try_recv(&mut self) -> Result<Option<SysExMessage>> {
        match self.receiver()?.try_recv() {
            Ok(msg) => Ok(Some(msg)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(Error::Disconnected(PortDirection::Input)),
        }
    }

    fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<SysExMessage>> {
        match self.receiver()?.recv_timeout(timeout) {
            Ok(msg) => Ok(Some(msg)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => {
                Err(Error::Disconnected(PortDirection::Input))
            }
        }
    }

    fn close(&mut self) {
        self.receiver = None;
    }
}
