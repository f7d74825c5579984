//! Transport traits the dump exchange is written against.

use std::time::Duration;

use crate::error::Result;
use crate::SysExMessage;

/// Accepts outbound SysEx messages.
pub trait SysExSink {
    /// Transmits one complete message.
    fn send(&mut self, message: &SysExMessage) -> Result<()>;

    /// Releases the underlying port. Further sends fail.
    fn close(&mut self) {}
}

/// Yields inbound SysEx messages, one complete message at a time.
pub trait SysExSource {
    /// Returns a message if one is already waiting.
    fn try_recv(&mut self) -> Result<Option<SysExMessage>>;

    /// Blocks for up to `timeout` waiting for a message.
    fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<SysExMessage>>;

    /// Releases the underlying port. Further receives fail.
    fn close(&mut self) {}
}

impl<T: SysExSink + ?Sized> SysExSink for &mut T {
    fn send(&mut self, message: &SysExMessage) -> Result<()> {
        (**self).send(message)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

impl<T: SysExSource + ?Sized> SysExSource for &mut T {
    fn try_recv(&mut self) -> Result<Option<SysExMessage>> {
        (**self).try_recv()
    }

    fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<SysExMessage>> {
        (**self).recv_timeout(timeout)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

impl<T: SysExSink + ?Sized> SysExSink for Box<T> {
    fn send(&mut self, message: &SysExMessage) -> Result<()> {
        (**self).send(message)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

impl<T: SysExSource + ?Sized> SysExSource for Box<T> {
    fn try_recv(&mut self) -> Result<Option<SysExMessage>> {
        (**self).try_recv()
    }

    fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<SysExMessage>> {
        (**self).recv_timeout(timeout)
    }

    fn close(&mut self) {
        (**self).close()
    }
}
