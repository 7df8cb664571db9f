use core::fmt::Display;

use bitflags::bitflags;
use thiserror_no_std::Error;

bitflags! {
    /// What an `update` samples.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Mode: u8 {
        /// Channel A, the VAD input.
        const CHA = 0x01;
        /// Channel B, read from the current register.
        const CHB = 0x02;
        const TEMPERATURE = 0x04;
    }
}

impl Mode {
    /// Build a mode from raw bits. Unknown bits are dropped.
    pub fn from_raw(bits: u8) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl From<u8> for Mode {
    fn from(bits: u8) -> Self {
        Self::from_raw(bits)
    }
}

/// One of the two voltage inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Channel {
    A = 0,
    B = 1,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChannelError {
    #[error("Unknown channel id {0}")]
    Unknown(u8),
}

impl TryFrom<u8> for Channel {
    type Error = ChannelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Channel::A),
            1 => Ok(Channel::B),
            other => Err(ChannelError::Unknown(other)),
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Channel::A => write!(f, "CHA"),
            Channel::B => write!(f, "CHB"),
        }
    }
}
