use core::fmt::Debug;

use thiserror_no_std::Error;

/// Why an `update` stopped early.
///
/// Either variant leaves the driver flagged as in error until the next
/// successful `update`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Ds2438Error<E: Debug> {
    /// The scratchpad CRC byte did not match the page contents. Covers a
    /// missing device, line noise and timing faults alike.
    #[error("Scratchpad checksum mismatch (expected {expected:#04x}, computed {computed:#04x})")]
    Checksum { expected: u8, computed: u8 },

    /// The transport itself reported a failure.
    #[error("1-Wire bus error: {0:?}")]
    Bus(E),
}
