//! MIDI output: device enumeration, connection, and SysEx sending.

use midir::{MidiOutput, MidiOutputConnection};
use tracing::debug;

use crate::device::{find_device, MidiDevice, PortDirection};
use crate::error::{Error, Result};
use crate::transport::SysExSink;
use crate::SysExMessage;

pub struct SysExOutputPort {
    connection: Option<MidiOutputConnection>,
    name: String,
}

impl SysExOutputPort {
    pub fn list_devices() -> Result<Vec<MidiDevice>> {
        let midi_output = MidiOutput::new("deepdump-device-list")?;
        let devices = midi_output
            .ports()
            .iter()
            .enumerate()
            .map(|(index, port)| MidiDevice {
                index,
                name: midi_output
                    .port_name(port)
                    .unwrap_or_else(|_| format!("Unknown Device {}", index)),
            })
            .collect();
        Ok(devices)
    }

    pub fn connect(device_index: usize) -> Result<Self> {
        let midi_output = MidiOutput::new("deepdump-midi-output")?;

        let ports = midi_output.ports();
        let port = ports.get(device_index).ok_or_else(|| {
            Error::MidiDevice(format!("MIDI output device {} not found", device_index))
        })?;

        let name = midi_output
            .port_name(port)
            .unwrap_or_else(|_| format!("Device {}", device_index));

        let connection = midi_output.connect(port, "deepdump-output")?;
        debug!("Opened MIDI output '{}'", name);

        Ok(Self {
            connection: Some(connection),
            name,
        })
    }

    pub fn connect_by_name(name: &str) -> Result<Self> {
        let devices = Self::list_devices()?;
        let device = find_device(&devices, name).ok_or_else(|| Error::PortNotFound {
            direction: PortDirection::Output,
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
}

impl SysExSink for SysExOutputPort {
    fn send(&mut self, message: &SysExMessage) -> Result<()> {
        let connection = self
            .connection
            .as_mut()
            .ok_or(Error::Closed(PortDirection::Output))?;
        connection.send(message.as_bytes())?;
        debug!("Sent {} byte SysEx to '{}'", message.len(), self.name);
        Ok(())
    }

    fn close(&mut self) {
        if let Some(conn) = self.connection.take() {
            let _ = conn.close();
            debug!("Closed MIDI output '{}'", self.name);
        }
    }
}

impl Drop for SysExOutputPort {
    fn drop(&mut self) {
        self.close();
    }
}
