//! Bulk patch dump request.

use crate::bank::Bank;
use crate::error::{Error, Result};
use crate::message::{SysExMessage, MIDI_SYSEX_END, MIDI_SYSEX_START};

/// Behringer manufacturer ID.
pub const MANUFACTURER_ID: [u8; 3] = [0x00, 0x20, 0x32];
pub const DEVICE_ID: u8 = 0x20;
pub const SUB_ID: u8 = 0x00;
/// Command byte: "bulk patch dump request".
pub const PATCH_DUMP_REQUEST: u8 = 0x09;

pub const PROGRAM_MAX: u8 = 127;

/// Length of an encoded request, framing included.
pub const REQUEST_LEN: usize = 11;

/// Request for programs `first..=last` of one bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DumpRequest {
    bank: Bank,
    first: u8,
    last: u8,
}

impl DumpRequest {
    /// Validates `0 <= first <= last <= 127`.
    pub fn new(bank: Bank, first: i32, last: i32) -> Result<Self> {
        let max = PROGRAM_MAX as i32;
        if first < 0 || first > max || last < first || last > max {
            return Err(Error::InvalidProgramRange { first, last });
        }
        Ok(Self {
            bank,
            first: first as u8,
            last: last as u8,
        })
    }

    /// Like [`DumpRequest::new`], taking the bank as a letter.
    pub fn parse(bank: &str, first: i32, last: i32) -> Result<Self> {
        Self::new(bank.parse()?, first, last)
    }

    #[inline]
    pub fn bank(&self) -> Bank {
        self.bank
    }

    #[inline]
    pub fn first(&self) -> u8 {
        self.first
    }

    #[inline]
    pub fn last(&self) -> u8 {
        self.last
    }

    /// Number of patch responses the device sends back.
    #[inline]
    pub fn expected_replies(&self) -> usize {
        (self.last - self.first) as usize + 1
    }

    pub fn to_bytes(&self) -> [u8; REQUEST_LEN] {
        let [m0, m1, m2] = MANUFACTURER_ID;
        [
            MIDI_SYSEX_START,
            m0,
            m1,
            m2,
            DEVICE_ID,
            SUB_ID,
            PATCH_DUMP_REQUEST,
            self.bank.index(),
            self.first,
            self.last,
            MIDI_SYSEX_END,
        ]
    }

    pub fn to_message(&self) -> SysExMessage {
        SysExMessage::from_framed(self.to_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_bytes() {
        let request = DumpRequest::new(Bank::C, 10, 15).unwrap();
        assert_eq!(
            request.to_bytes(),
            [0xF0, 0x00, 0x20, 0x32, 0x20, 0x00, 0x09, 0x02, 0x0A, 0x0F, 0xF7]
        );
        assert_eq!(request.to_message().as_bytes(), &request.to_bytes()[..]);
    }

    #[test]
    fn test_parse_bank_letter() {
        let request = DumpRequest::parse("h", 0, 127).unwrap();
        assert_eq!(request.bank(), Bank::H);
        assert_eq!(request.to_bytes()[7], 0x07);
        assert_eq!(request.to_bytes()[9], 0x7F);
    }

    #[test]
    fn test_expected_replies() {
        assert_eq!(DumpRequest::new(Bank::A, 0, 0).unwrap().expected_replies(), 1);
        assert_eq!(DumpRequest::new(Bank::A, 10, 15).unwrap().expected_replies(), 6);
        assert_eq!(DumpRequest::new(Bank::A, 0, 127).unwrap().expected_replies(), 128);
    }

    #[test]
    fn test_range_validation() {
        for (first, last) in [(-1, 5), (5, 4), (0, 128), (128, 128), (-3, -1), (200, 100)] {
            let err = DumpRequest::new(Bank::A, first, last).unwrap_err();
            assert_eq!(err, Error::InvalidProgramRange { first, last });
        }
    }

    #[test]
    fn test_unknown_bank_letter() {
        let err = DumpRequest::parse("J", 0, 1).unwrap_err();
        assert_eq!(err, Error::InvalidBank("J".to_string()));
    }
}
