//! Simulated DS2438 and clock used by the driver tests.

use std::collections::{HashSet, VecDeque};

use embedded_hal::blocking::delay::DelayMs;
use tracing::level_filters::LevelFilter;

use crate::{
    clock::Clock,
    commands::*,
    onewire::{crc8, Address, OneWire},
};

pub const DEVICE: Address = [0x26, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x9C];
pub const OTHER_DEVICE: Address = [0x26, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x11];

/// Route driver logs to the test output. Safe to call from every test.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_test_writer()
        .with_target(false)
        .with_max_level(LevelFilter::TRACE)
        .try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    Reset,
    Select(Address),
    Write(u8),
    Read,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Command,
    Page(u8),
    Data(usize),
}

/// One DS2438 on a bus.
///
/// Conversions fill page 0 from the analog values below, the AD bit of byte 0
/// picks what lands in the voltage register. Reads can be overridden with
/// scripted pages and individual reads can have their CRC corrupted.
pub struct MockBus {
    pub address: Address,
    pub transactions: Vec<Transaction>,

    /// Page 0 as the device currently holds it.
    pub page: [u8; 8],

    /// Successive Convert T results in degC. The last one sticks.
    pub temperatures: VecDeque<f32>,
    /// VAD input, in 10 mV counts.
    pub vad: u16,
    /// VDD input, in 10 mV counts.
    pub vdd: u16,
    /// Current register contents.
    pub current: i16,

    /// Pages returned by READ_SCRATCHPAD ahead of the simulated page.
    pub scripted: VecDeque<[u8; 8]>,
    /// Zero based READ_SCRATCHPAD indices whose CRC byte is flipped.
    pub corrupt_reads: HashSet<usize>,
    /// Zero based bus operation indices that report an error.
    pub failing_ops: HashSet<usize>,

    pub copies: usize,
    ops: usize,
    reads: usize,
    state: State,
    selected: bool,
    outgoing: VecDeque<u8>,
}

impl MockBus {
    pub fn new() -> Self {
        Self {
            address: DEVICE,
            transactions: Vec::new(),
            page: [0u8; 8],
            temperatures: VecDeque::new(),
            vad: 0,
            vdd: 0,
            current: 0,
            scripted: VecDeque::new(),
            corrupt_reads: HashSet::new(),
            failing_ops: HashSet::new(),
            ops: 0,
            copies: 0,
            reads: 0,
            state: State::Idle,
            selected: false,
            outgoing: VecDeque::new(),
        }
    }

    pub fn with_temperatures(mut self, temperatures: &[f32]) -> Self {
        self.temperatures = temperatures.iter().copied().collect();
        self
    }

    pub fn with_inputs(mut self, vad: u16, vdd: u16, current: i16) -> Self {
        self.vad = vad;
        self.vdd = vdd;
        self.current = current;
        self
    }

    pub fn with_scripted(mut self, pages: &[[u8; 8]]) -> Self {
        self.scripted = pages.iter().copied().collect();
        self
    }

    pub fn corrupt_read(mut self, index: usize) -> Self {
        self.corrupt_reads.insert(index);
        self
    }

    pub fn fail_op(mut self, index: usize) -> Self {
        self.failing_ops.insert(index);
        self
    }

    /// Number of times `byte` was written as a command.
    pub fn count_command(&self, command: u8) -> usize {
        self.transactions
            .windows(2)
            .filter(|pair| {
                matches!(pair[0], Transaction::Select(_))
                    && pair[1] == Transaction::Write(command)
            })
            .count()
    }

    /// Number of scratchpad pages read back.
    pub fn page_reads(&self) -> usize {
        self.reads
    }

    fn check_failure(&mut self) -> Result<(), MockBusError> {
        let op = self.ops;
        self.ops += 1;
        if self.failing_ops.contains(&op) {
            return Err(MockBusError);
        }
        Ok(())
    }

    fn command(&mut self, command: u8) {
        self.state = State::Idle;
        match command {
            TEMPERATURE_CONVERSION => {
                let celsius = if self.temperatures.len() > 1 {
                    self.temperatures.pop_front().unwrap_or(0.0)
                } else {
                    self.temperatures.front().copied().unwrap_or(0.0)
                };
                let raw = ((celsius / 0.03125) as i16) << 3;
                self.page[1..3].copy_from_slice(&raw.to_le_bytes());
            }
            VOLTAGE_CONVERSION => {
                let input = if self.page[0] & CHANNEL_SELECT_BIT != 0 {
                    self.vdd
                } else {
                    self.vad
                };
                self.page[3..5].copy_from_slice(&input.to_le_bytes());
                self.page[5..7].copy_from_slice(&self.current.to_le_bytes());
            }
            RECALL_MEMORY | READ_SCRATCHPAD | WRITE_SCRATCHPAD | COPY_SCRATCHPAD => {
                self.state = State::Page(command);
            }
            _ => {}
        }
    }

    fn page_selected(&mut self, command: u8) {
        self.state = State::Idle;
        match command {
            READ_SCRATCHPAD => {
                let page = self.scripted.pop_front().unwrap_or(self.page);
                let mut checksum = crc8(&page);
                if self.corrupt_reads.contains(&self.reads) {
                    checksum = !checksum;
                }
                self.reads += 1;
                self.outgoing.clear();
                self.outgoing.extend(page.iter().copied());
                self.outgoing.push_back(checksum);
            }
            WRITE_SCRATCHPAD => self.state = State::Data(0),
            COPY_SCRATCHPAD => self.copies += 1,
            _ => {}
        }
    }
}

impl OneWire for MockBus {
    type Error = MockBusError;

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.check_failure()?;
        self.transactions.push(Transaction::Reset);
        self.state = State::Idle;
        self.selected = false;
        self.outgoing.clear();
        Ok(())
    }

    fn select(&mut self, address: &Address) -> Result<(), Self::Error> {
        self.check_failure()?;
        self.transactions.push(Transaction::Select(*address));
        self.selected = *address == self.address;
        if self.selected {
            self.state = State::Command;
        }
        Ok(())
    }

    fn write(&mut self, byte: u8, _power: bool) -> Result<(), Self::Error> {
        self.check_failure()?;
        self.transactions.push(Transaction::Write(byte));
        if !self.selected {
            return Ok(());
        }
        match self.state {
            State::Idle => {}
            State::Command => self.command(byte),
            State::Page(command) => self.page_selected(command),
            State::Data(index) => {
                self.page[index] = byte;
                self.state = if index + 1 < self.page.len() {
                    State::Data(index + 1)
                } else {
                    State::Idle
                };
            }
        }
        Ok(())
    }

    fn read(&mut self) -> Result<u8, Self::Error> {
        self.check_failure()?;
        self.transactions.push(Transaction::Read);
        // An idle line reads as ones.
        Ok(self.outgoing.pop_front().unwrap_or(0xFF))
    }
}

/// Millisecond clock that only moves when the driver waits or a test says so.
#[derive(Debug, Default)]
pub struct MockClock {
    pub now: u32,
    pub delays: Vec<u16>,
}

impl MockClock {
    pub fn at(now: u32) -> Self {
        Self {
            now,
            delays: Vec::new(),
        }
    }
}

impl Clock for MockClock {
    fn millis(&self) -> u32 {
        self.now
    }
}

impl DelayMs<u16> for MockClock {
    fn delay_ms(&mut self, ms: u16) {
        self.delays.push(ms);
        self.now = self.now.wrapping_add(ms as u32);
    }
}
