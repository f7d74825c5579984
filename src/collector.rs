//! Collects the replies to a dump request.
//!
//! The collector blocks on the input transport in short slices so that an
//! optional deadline and an optional cancel flag can be checked between them.
//! With neither set it waits until every expected reply has arrived.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use deepdump_midi_io::{SysExMessage, SysExSource};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Longest single blocking wait on the transport.
pub const WAIT_SLICE: Duration = Duration::from_millis(100);

/// Shared flag that stops a running collection.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct Collector {
    expected: usize,
    timeout: Option<Duration>,
    cancel: Option<CancelToken>,
}

impl Collector {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            timeout: None,
            cancel: None,
        }
    }

    /// Fail with [`Error::Timeout`] if the replies take longer than `timeout` in total.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Receives exactly `expected` messages from `source`, in arrival order.
    pub fn collect<S: SysExSource + ?Sized>(&self, source: &mut S) -> Result<Vec<SysExMessage>> {
        let deadline = self.timeout.map(|t| Instant::now() + t);
        let mut received = Vec::with_capacity(self.expected);

        while received.len() < self.expected {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                return Err(Error::Cancelled {
                    received: received.len(),
                    expected: self.expected,
                });
            }

            let next = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        // Past the deadline only replies already queued still count.
                        match source.try_recv()? {
                            Some(msg) => Some(msg),
                            None => {
                                return Err(Error::Timeout {
                                    received: received.len(),
                                    expected: self.expected,
                                })
                            }
                        }
                    } else {
                        source.recv_timeout(remaining.min(WAIT_SLICE))?
                    }
                }
                None => source.recv_timeout(WAIT_SLICE)?,
            };

            if let Some(msg) = next {
                debug!(
                    "Received SysEx {}/{} ({} bytes)",
                    received.len() + 1,
                    self.expected,
                    msg.len()
                );
                received.push(msg);
            }
        }

        info!("Received {} patch response(s)", received.len());
        Ok(received)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    use deepdump_midi_io::{sysex_channel, PortDirection, SysExSink};

    fn msg(data: u8) -> SysExMessage {
        SysExMessage::new(vec![0xF0, data, 0xF7]).unwrap()
    }

    #[test]
    fn test_collects_exactly_expected_in_order() {
        let (mut tx, mut rx) = sysex_channel();
        for i in 0..4 {
            tx.send(&msg(i)).unwrap();
        }

        let got = Collector::new(3).collect(&mut rx).unwrap();
        assert_eq!(got, vec![msg(0), msg(1), msg(2)]);

        // The surplus reply stays on the transport.
        assert_eq!(rx.try_recv().unwrap(), Some(msg(3)));
    }

    #[test]
    fn test_zero_expected_returns_immediately() {
        let (_tx, mut rx) = sysex_channel();
        assert!(Collector::new(0).collect(&mut rx).unwrap().is_empty());
    }

    #[test]
    fn test_waits_for_slow_sender() {
        let (mut tx, mut rx) = sysex_channel();
        let handle = thread::spawn(move || {
            for i in 0..3 {
                thread::sleep(Duration::from_millis(30));
                tx.send(&msg(i)).unwrap();
            }
            tx
        });

        let got = Collector::new(3).collect(&mut rx).unwrap();
        assert_eq!(got, vec![msg(0), msg(1), msg(2)]);
        handle.join().unwrap();
    }

    #[test]
    fn test_timeout_reports_progress() {
        let (mut tx, mut rx) = sysex_channel();
        tx.send(&msg(1)).unwrap();

        let started = Instant::now();
        let err = Collector::new(3)
            .timeout(Duration::from_millis(50))
            .collect(&mut rx)
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Timeout {
                received: 1,
                expected: 3
            }
        ));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_zero_timeout_takes_queued_replies() {
        let (mut tx, mut rx) = sysex_channel();
        tx.send(&msg(1)).unwrap();
        tx.send(&msg(2)).unwrap();

        let got = Collector::new(2)
            .timeout(Duration::ZERO)
            .collect(&mut rx)
            .unwrap();
        assert_eq!(got, vec![msg(1), msg(2)]);

        let err = Collector::new(1)
            .timeout(Duration::ZERO)
            .collect(&mut rx)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Timeout {
                received: 0,
                expected: 1
            }
        ));
    }

    #[test]
    fn test_cancel_before_start() {
        let (_tx, mut rx) = sysex_channel();
        let token = CancelToken::new();
        token.cancel();

        let err = Collector::new(2)
            .cancel_token(token)
            .collect(&mut rx)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Cancelled {
                received: 0,
                expected: 2
            }
        ));
    }

    #[test]
    fn test_cancel_from_other_thread() {
        let (mut tx, mut rx) = sysex_channel();
        tx.send(&msg(9)).unwrap();

        let token = CancelToken::new();
        let remote = token.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            remote.cancel();
        });

        let err = Collector::new(5)
            .cancel_token(token.clone())
            .collect(&mut rx)
            .unwrap_err();
        handle.join().unwrap();

        assert!(token.is_cancelled());
        assert!(matches!(
            err,
            Error::Cancelled {
                received: 1,
                expected: 5
            }
        ));
    }

    #[test]
    fn test_disconnected_transport_fails() {
        let (mut tx, mut rx) = sysex_channel();
        tx.send(&msg(1)).unwrap();
        tx.close();

        let err = Collector::new(2).collect(&mut rx).unwrap_err();
        assert!(matches!(
            err,
            Error::Midi(deepdump_midi_io::Error::Disconnected(PortDirection::Input))
        ));
    }
}
