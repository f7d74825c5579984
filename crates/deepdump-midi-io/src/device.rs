//! Port descriptions and name matching.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => f.write_str("input"),
            PortDirection::Output => f.write_str("output"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiDevice {
    pub index: usize,
    pub name: String,
}

/// Picks the device called `name`.
///
/// An exact name wins; otherwise the first device whose name contains `name`,
/// ignoring case.
pub fn find_device<'a>(devices: &'a [MidiDevice], name: &str) -> Option<&'a MidiDevice> {
    devices.iter().find(|d| d.name == name).or_else(|| {
        let needle = name.to_lowercase();
        devices
            .iter()
            .find(|d| d.name.to_lowercase().contains(&needle))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn devices() -> Vec<MidiDevice> {
        ["Midi Through:Port-0", "DeepMind 12:DeepMind 12 MIDI 1", "DeepMind 12"]
            .iter()
            .enumerate()
            .map(|(index, name)| MidiDevice {
                index,
                name: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_exact_match_preferred() {
        let devices = devices();
        let found = find_device(&devices, "DeepMind 12").unwrap();
        assert_eq!(found.index, 2);
    }

    #[test]
    fn test_substring_match_ignores_case() {
        let devices = devices();
        let found = find_device(&devices, "deepmind 12 midi").unwrap();
        assert_eq!(found.index, 1);
    }

    #[test]
    fn test_no_match() {
        let devices = devices();
        assert!(find_device(&devices, "Prophet").is_none());
        assert!(find_device(&[], "anything").is_none());
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(PortDirection::Input.to_string(), "input");
        assert_eq!(PortDirection::Output.to_string(), "output");
    }
}
