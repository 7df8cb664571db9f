//! Driver for the DS2438 smart battery monitor on a 1-Wire bus.
//!
//! ```
//! use ds2438::{Channel, Clock, Ds2438, Mode, OneWire};
//! # use embedded_hal::blocking::delay::DelayMs;
//! # struct Bus;
//! # impl OneWire for Bus {
//! #     type Error = ();
//! #     fn reset(&mut self) -> Result<(), ()> { Ok(()) }
//! #     fn select(&mut self, _: &[u8; 8]) -> Result<(), ()> { Ok(()) }
//! #     fn write(&mut self, _: u8, _: bool) -> Result<(), ()> { Ok(()) }
//! #     fn read(&mut self) -> Result<u8, ()> { Ok(0) }
//! # }
//! # struct Timer;
//! # impl Clock for Timer { fn millis(&self) -> u32 { 0 } }
//! # impl DelayMs<u16> for Timer { fn delay_ms(&mut self, _: u16) {} }
//! let address = [0x26, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x9C];
//! let mut monitor = Ds2438::new(Bus, Timer);
//! monitor.begin(Mode::CHA | Mode::TEMPERATURE);
//!
//! if monitor.update(&address).is_ok() {
//!     let _celsius = monitor.temperature();
//!     let _volts = monitor.voltage(Channel::A);
//! }
//! ```
//!
//! The crate is `no_std`. Logging goes through `tracing`, whose `no_std`
//! build still links `alloc`, so targets without a global allocator must
//! provide one. Enable the `std` feature on hosts.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod clock;
pub mod commands;
mod driver;
mod error;
mod mode;
mod onewire;
mod reading;
mod scratchpad;
mod timing;

#[cfg(test)]
mod test_utils;

pub use clock::Clock;
pub use driver::Ds2438;
pub use error::Ds2438Error;
pub use mode::{Channel, ChannelError, Mode};
pub use onewire::{crc8, Address, OneWire};
pub use reading::Reading;
pub use scratchpad::{Scratchpad, PAGE_LEN};
pub use timing::Timing;
