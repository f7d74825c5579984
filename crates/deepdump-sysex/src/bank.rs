//! Patch banks A-H.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub const BANK_COUNT: usize = 8;

/// One of the eight patch banks, carried on the wire as a 0-based index.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bank {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl Bank {
    pub const ALL: [Bank; BANK_COUNT] = [
        Bank::A,
        Bank::B,
        Bank::C,
        Bank::D,
        Bank::E,
        Bank::F,
        Bank::G,
        Bank::H,
    ];

    #[inline]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn letter(self) -> char {
        (b'A' + self.index()) as char
    }
}

impl FromStr for Bank {
    type Err = Error;

    /// Accepts a single letter, either case.
    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                let upper = c.to_ascii_uppercase() as u8;
                upper
                    .checked_sub(b'A')
                    .and_then(Bank::from_index)
                    .ok_or_else(|| Error::InvalidBank(s.to_string()))
            }
            _ => Err(Error::InvalidBank(s.to_string())),
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}
