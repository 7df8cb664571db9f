//! Function commands and constants of the DS2438.

/// Start a temperature conversion (Convert T).
pub const TEMPERATURE_CONVERSION: u8 = 0x44;
/// Start an A/D conversion on the channel picked by the AD bit (Convert V).
pub const VOLTAGE_CONVERSION: u8 = 0xB4;
/// Write a page of the scratchpad.
pub const WRITE_SCRATCHPAD: u8 = 0x4E;
/// Copy a scratchpad page into memory.
pub const COPY_SCRATCHPAD: u8 = 0x48;
/// Read a page of the scratchpad.
pub const READ_SCRATCHPAD: u8 = 0xBE;
/// Recall a memory page into the scratchpad.
pub const RECALL_MEMORY: u8 = 0xB8;

/// Page 0 holds status/config, temperature, voltage and current.
pub const PAGE_0: u8 = 0x00;

/// Bit of scratchpad byte 0 that routes the A/D to channel B when set.
pub const CHANNEL_SELECT_BIT: u8 = 0x08;

/// Wait after Convert T, in milliseconds.
pub const TEMPERATURE_DELAY: u16 = 10;
/// Wait after Convert V, in milliseconds.
pub const VOLTAGE_CONVERSION_DELAY: u16 = 8;
