use crate::{commands::CHANNEL_SELECT_BIT, mode::Channel};

/// Number of bytes read back for one page: 8 data bytes and the CRC.
pub const PAGE_LEN: usize = 9;

/// Degrees Celsius per LSB of the temperature register.
const TEMPERATURE_RESOLUTION: f32 = 0.03125;

/// Volts per LSB of the VAD register.
const VOLTAGE_A_RESOLUTION: f32 = 100.0;

/// Full scale divisor of the current register read as channel B.
const VOLTAGE_B_RESOLUTION: f32 = 4096.0;

/// Raw contents of scratchpad page 0.
///
/// | byte | content |
/// |------|---------|
/// | 0    | status / configuration |
/// | 1..2 | temperature, LSB first |
/// | 3..4 | voltage |
/// | 5..6 | current |
/// | 7    | threshold |
/// | 8    | CRC-8 of bytes 0..8 |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scratchpad {
    bytes: [u8; PAGE_LEN],
}

impl Scratchpad {
    pub fn new(bytes: [u8; PAGE_LEN]) -> Self {
        Self { bytes }
    }

    /// The 8 data bytes, without the CRC.
    pub fn data(&self) -> &[u8] {
        &self.bytes[..PAGE_LEN - 1]
    }

    pub fn checksum(&self) -> u8 {
        self.bytes[PAGE_LEN - 1]
    }

    /// Temperature in degrees Celsius.
    /// Signed 13-bit value left aligned in a 16-bit register.
    pub fn temperature(&self) -> f32 {
        decode_temperature(self.bytes[1], self.bytes[2])
    }

    /// Channel A voltage in volts.
    pub fn voltage_a(&self) -> f32 {
        decode_voltage_a(self.bytes[3], self.bytes[4])
    }

    /// Channel B voltage in volts.
    pub fn voltage_b(&self) -> f32 {
        decode_voltage_b(self.bytes[5], self.bytes[6])
    }

    /// Page data with the A/D routed to `channel`. Every other bit is kept.
    pub fn with_channel(&self, channel: Channel) -> [u8; PAGE_LEN - 1] {
        let mut data = [0u8; PAGE_LEN - 1];
        data.copy_from_slice(self.data());
        match channel {
            Channel::B => data[0] |= CHANNEL_SELECT_BIT,
            Channel::A => data[0] &= !CHANNEL_SELECT_BIT,
        }
        data
    }
}

fn decode_temperature(lsb: u8, msb: u8) -> f32 {
    (i16::from_le_bytes([lsb, msb]) >> 3) as f32 * TEMPERATURE_RESOLUTION
}

fn decode_voltage_a(lsb: u8, msb: u8) -> f32 {
    let raw = (((msb as u16) << 8) & 0x0300) | lsb as u16;
    raw as f32 / VOLTAGE_A_RESOLUTION
}

/// Magnitude of the signed register. `i16::MIN` reads as +8.0 V; a 16-bit
/// C `abs()` overflows there and yields -8.0 V.
fn decode_voltage_b(lsb: u8, msb: u8) -> f32 {
    i16::from_le_bytes([lsb, msb]).unsigned_abs() as f32 / VOLTAGE_B_RESOLUTION
}
