//! Serial code models
//!
//! A serial code is a letter followed by a zero-padded four digit sequence
//! number. The letter encodes the first digit of the padded number:
//! `A` for 0, `B` for 1, ... `J` for 9.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest sequence number in the pool
pub const FIRST_SEQUENCE: u16 = 1;

/// Highest sequence number in the pool
pub const LAST_SEQUENCE: u16 = 9999;

/// Number of codes in a freshly generated pool
pub const POOL_SIZE: usize = (LAST_SEQUENCE - FIRST_SEQUENCE + 1) as usize;

/// A serial code assigned to exactly one produced robot
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerialCode(String);

/// Reasons a token is not a serial code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerialCodeError {
    #[error("serial code must be 5 characters, got {0}")]
    Length(usize),

    #[error("serial code must start with a letter from A to J")]
    Prefix,

    #[error("serial code must end with 4 digits")]
    Digits,
}

impl SerialCode {
    /// Build the code for a sequence number in `1..=9999`
    pub fn from_sequence(sequence: u16) -> Option<Self> {
        if !(FIRST_SEQUENCE..=LAST_SEQUENCE).contains(&sequence) {
            return None;
        }
        let digits = format!("{:04}", sequence);
        let letter = char::from(b'A' + (sequence / 1000) as u8);
        Some(Self(format!("{}{}", letter, digits)))
    }

    /// Every code of a fresh pool, in ascending sequence order
    pub fn full_pool() -> impl Iterator<Item = SerialCode> {
        (FIRST_SEQUENCE..=LAST_SEQUENCE).filter_map(Self::from_sequence)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SerialCode {
    type Err = SerialCodeError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let bytes = token.as_bytes();
        if bytes.len() != 5 {
            return Err(SerialCodeError::Length(token.chars().count()));
        }
        if !(b'A'..=b'J').contains(&bytes[0]) {
            return Err(SerialCodeError::Prefix);
        }
        if !bytes[1..].iter().all(u8::is_ascii_digit) {
            return Err(SerialCodeError::Digits);
        }
        Ok(Self(token.to_string()))
    }
}

impl TryFrom<String> for SerialCode {
    type Error = SerialCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SerialCode> for String {
    fn from(code: SerialCode) -> Self {
        code.0
    }
}

impl fmt::Display for SerialCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
