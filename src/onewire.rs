use core::fmt::Debug;

/// 64-bit ROM id of a device on the bus (family code, serial, CRC).
pub type Address = [u8; 8];

/// The 1-Wire transport the driver talks through.
///
/// Implementations own the bit-level timing. The driver only sequences
/// byte-level transactions on top of these primitives.
pub trait OneWire {
    type Error: Debug;

    /// Issue a reset pulse.
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Address a single device (MATCH ROM).
    fn select(&mut self, address: &Address) -> Result<(), Self::Error>;

    /// Write a byte. `power` keeps the line driven high afterwards for
    /// parasite powered devices.
    fn write(&mut self, byte: u8, power: bool) -> Result<(), Self::Error>;

    fn read(&mut self) -> Result<u8, Self::Error>;

    /// Dallas/Maxim CRC-8 over `data`.
    /// Override when the transport has a hardware or table driven version.
    fn crc8(&self, data: &[u8]) -> u8 {
        crc8(data)
    }
}

impl<T: OneWire + ?Sized> OneWire for &mut T {
    type Error = T::Error;

    fn reset(&mut self) -> Result<(), Self::Error> {
        (**self).reset()
    }

    fn select(&mut self, address: &Address) -> Result<(), Self::Error> {
        (**self).select(address)
    }

    fn write(&mut self, byte: u8, power: bool) -> Result<(), Self::Error> {
        (**self).write(byte, power)
    }

    fn read(&mut self) -> Result<u8, Self::Error> {
        (**self).read()
    }

    fn crc8(&self, data: &[u8]) -> u8 {
        (**self).crc8(data)
    }
}

/// Dallas/Maxim CRC-8 (x^8 + x^5 + x^4 + 1, reflected, init 0).
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for byte in data.iter() {
        let mut byte = *byte;
        for _ in 0..8 {
            let mix = (crc ^ byte) & 0x01;
            crc >>= 1;
            if mix != 0x00 {
                crc ^= 0x8C;
            }
            byte >>= 1;
        }
    }
    crc
}
