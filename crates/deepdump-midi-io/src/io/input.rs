//! MIDI input: device enumeration, connection, and SysEx reception.
//!
//! The midir callback runs on the backend's thread. It reassembles complete
//! SysEx messages and hands them over a channel to whoever reads the port.

use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, TryRecvError};
use midir::{Ignore, MidiInput, MidiInputConnection};
use tracing::debug;

use crate::assembler::SysExAssembler;
use crate::device::{find_device, MidiDevice, PortDirection};
use crate::error::{Error, Result};
use crate::transport::SysExSource;
use crate::SysExMessage;

pub struct SysExInputPort {
    connection: Option<MidiInputConnection<()>>,
    receiver: Receiver<SysExMessage>,
    name: String,
}

impl SysExInputPort {
    pub fn list_devices() -> Result<Vec<MidiDevice>> {
        let midi_input = MidiInput::new("deepdump-device-list")?;
        let devices = midi_input
            .ports()
            .iter()
            .enumerate()
            .map(|(index, port)| MidiDevice {
                index,
                name: midi_input
                    .port_name(port)
                    .unwrap_or_else(|_| format!("Unknown Device {}", index)),
            })
            .collect();
        Ok(devices)
    }

    pub fn connect(device_index: usize) -> Result<Self> {
        let mut midi_input = MidiInput::new("deepdump-midi-input")?;
        // midir drops SysEx by default.
        midi_input.ignore(Ignore::None);

        let ports = midi_input.ports();
        let port = ports.get(device_index).ok_or_else(|| {
            Error::MidiDevice(format!("MIDI input device {} not found", device_index))
        })?;

        let name = midi_input
            .port_name(port)
            .unwrap_or_else(|_| format!("Device {}", device_index));

        let (sender, receiver) = unbounded();
        let mut assembler = SysExAssembler::new();

        let connection = midi_input.connect(
            port,
            "deepdump-input",
            move |_timestamp, bytes, _| {
                assembler.feed(bytes, |msg| {
                    if sender.send(msg).is_err() {
                        debug!("SysEx receiver dropped, discarding message");
                    }
                });
            },
            (),
        )?;
        debug!("Opened MIDI input '{}'", name);

        Ok(Self {
            connection: Some(connection),
            receiver,
            name,
        })
    }

    pub fn connect_by_name(name: &str) -> Result<Self> {
        let devices = Self::list_devices()?;
        let device = find_device(&devices, name).ok_or_else(|| Error::PortNotFound {
            direction: PortDirection::Input,
            name: name.to_string(),
        })?;
        Self::connect(device.index)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.connection.is_none() {
            return Err(Error::Closed(PortDirection::Input));
        }
        Ok(())
    }
}

impl SysExSource for SysExInputPort {
    fn try_recv(&mut self) -> Result<Option<SysExMessage>> {
        self.ensure_open()?;
        match self.receiver.try_recv() {
            Ok(msg) => Ok(Some(msg)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(Error::Disconnected(PortDirection::Input)),
        }
    }

    fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<SysExMessage>> {
        self.ensure_open()?;
        match self.receiver.recv_timeout(timeout) {
            Ok(msg) => Ok(Some(msg)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => {
                Err(Error::Disconnected(PortDirection::Input))
            }
        }
    }

    fn close(&mut self) {
        if let Some(conn) = self.connection.take() {
            let _ = conn.close();
            debug!("Closed MIDI input '{}'", self.name);
        }
    }
}

impl Drop for SysExInputPort {
    fn drop(&mut self) {
        self.close();
    }
}
