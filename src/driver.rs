use embedded_hal::blocking::delay::DelayMs;
use tracing::{debug, trace, warn};

use crate::{
    clock::Clock,
    commands::*,
    error::Ds2438Error,
    mode::{Channel, Mode},
    onewire::{Address, OneWire},
    reading::Reading,
    scratchpad::{Scratchpad, PAGE_LEN},
    timing::Timing,
};

/// Polling driver for one DS2438.
///
/// Call `begin` to pick what is sampled, then `update` once per polling cycle
/// and read the results through the accessors. Values are only meaningful
/// while `is_error` is false.
pub struct Ds2438<B, C> {
    bus: B,
    clock: C,
    timing: Timing,

    mode: Mode,
    temperature: f32,
    voltage_a: f32,
    voltage_b: f32,
    error: bool,
    timestamp: u32,
}

impl<B, C> Ds2438<B, C>
where
    B: OneWire,
    C: Clock + DelayMs<u16>,
{
    pub fn new(bus: B, clock: C) -> Self {
        Self::with_timing(bus, clock, Timing::default())
    }

    pub fn with_timing(bus: B, clock: C, timing: Timing) -> Self {
        let mut driver = Self {
            bus,
            clock,
            timing,
            mode: Mode::empty(),
            temperature: 0.0,
            voltage_a: 0.0,
            voltage_b: 0.0,
            error: true,
            timestamp: 0,
        };
        driver.begin(Mode::empty());
        driver
    }

    /// Pick what `update` samples and forget any previous results.
    /// Accepts a `Mode` or raw bits; unknown bits are dropped.
    pub fn begin(&mut self, mode: impl Into<Mode>) {
        self.mode = mode.into();
        self.temperature = 0.0;
        self.voltage_a = 0.0;
        self.voltage_b = 0.0;
        self.error = true;
        self.timestamp = 0;
        debug!("DS2438 mode set to {:?}", self.mode);
    }

    /// Run a full conversion cycle against `address`.
    ///
    /// Blocks for the conversion delays of every sampled channel. The first
    /// failing step aborts the cycle, leaving `is_error` set and the
    /// remaining fields untouched.
    pub fn update(&mut self, address: &Address) -> Result<(), Ds2438Error<B::Error>> {
        self.error = true;
        self.timestamp = self.clock.millis();

        match self.convert_all(address) {
            Ok(()) => {
                self.error = false;
                Ok(())
            }
            Err(err) => {
                warn!("DS2438 {:02x?} update failed: {}", address, err);
                Err(err)
            }
        }
    }

    fn convert_all(&mut self, address: &Address) -> Result<(), Ds2438Error<B::Error>> {
        let has_temperature = self.mode.contains(Mode::TEMPERATURE);
        let has_cha = self.mode.contains(Mode::CHA);

        if has_cha || self.mode == Mode::TEMPERATURE {
            let page = self.measure(address, Channel::A, has_temperature)?;
            if has_temperature {
                self.temperature = page.temperature();
            }
            if has_cha {
                self.voltage_a = page.voltage_a();
            }
        }

        if self.mode.contains(Mode::CHB) {
            // Channel A already fetched the temperature.
            let do_temperature = has_temperature && !has_cha;
            let page = self.measure(address, Channel::B, do_temperature)?;
            if do_temperature {
                self.temperature = page.temperature();
            }
            self.voltage_b = page.voltage_b();
        }

        debug!(
            temperature = self.temperature,
            voltage_a = self.voltage_a,
            voltage_b = self.voltage_b,
            "DS2438 update complete"
        );
        Ok(())
    }

    fn measure(
        &mut self,
        address: &Address,
        channel: Channel,
        do_temperature: bool,
    ) -> Result<Scratchpad, Ds2438Error<B::Error>> {
        self.start_conversion(address, channel, do_temperature)?;
        self.read_page_zero(address)
    }

    fn start_conversion(
        &mut self,
        address: &Address,
        channel: Channel,
        do_temperature: bool,
    ) -> Result<(), Ds2438Error<B::Error>> {
        self.select_channel(address, channel)?;
        self.address_device(address)?;
        if do_temperature {
            trace!("Converting temperature");
            self.send(TEMPERATURE_CONVERSION)?;
            self.clock.delay_ms(self.timing.temperature_delay_ms);
            self.address_device(address)?;
        }
        trace!("Converting {}", channel);
        self.send(VOLTAGE_CONVERSION)?;
        self.clock.delay_ms(self.timing.voltage_conversion_delay_ms);
        Ok(())
    }

    /// Route the A/D to `channel` by rewriting the AD bit of page 0.
    fn select_channel(
        &mut self,
        address: &Address,
        channel: Channel,
    ) -> Result<(), Ds2438Error<B::Error>> {
        let page = self.read_page_zero(address)?;
        self.write_page_zero(address, &page.with_channel(channel));
        Ok(())
    }

    /// Write page 0 and commit it. Not read back, failures are only logged.
    fn write_page_zero(&mut self, address: &Address, data: &[u8; PAGE_LEN - 1]) {
        let mut commit = || -> Result<(), Ds2438Error<B::Error>> {
            self.address_device(address)?;
            self.send(WRITE_SCRATCHPAD)?;
            self.send(PAGE_0)?;
            for byte in data.iter() {
                self.send(*byte)?;
            }
            self.address_device(address)?;
            self.send(COPY_SCRATCHPAD)?;
            self.send(PAGE_0)
        };
        if let Err(err) = commit() {
            warn!("DS2438 {:02x?} page 0 write dropped: {}", address, err);
        }
    }

    fn read_page_zero(&mut self, address: &Address) -> Result<Scratchpad, Ds2438Error<B::Error>> {
        self.address_device(address)?;
        self.send(RECALL_MEMORY)?;
        self.send(PAGE_0)?;
        self.address_device(address)?;
        self.send(READ_SCRATCHPAD)?;
        self.send(PAGE_0)?;

        let mut bytes = [0u8; PAGE_LEN];
        for byte in bytes.iter_mut() {
            *byte = self.bus.read().map_err(Ds2438Error::Bus)?;
        }
        let page = Scratchpad::new(bytes);
        trace!("Page 0: {:02x?}", bytes);

        let computed = self.bus.crc8(page.data());
        if computed != page.checksum() {
            return Err(Ds2438Error::Checksum {
                expected: page.checksum(),
                computed,
            });
        }
        Ok(page)
    }

    fn address_device(&mut self, address: &Address) -> Result<(), Ds2438Error<B::Error>> {
        self.bus.reset().map_err(Ds2438Error::Bus)?;
        self.bus.select(address).map_err(Ds2438Error::Bus)
    }

    fn send(&mut self, byte: u8) -> Result<(), Ds2438Error<B::Error>> {
        self.bus.write(byte, false).map_err(Ds2438Error::Bus)
    }
}

impl<B, C> Ds2438<B, C> {
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn voltage(&self, channel: Channel) -> f32 {
        match channel {
            Channel::A => self.voltage_a,
            Channel::B => self.voltage_b,
        }
    }

    /// Voltage by raw channel id. Unknown ids read as 0.0.
    pub fn voltage_raw(&self, channel: u8) -> f32 {
        match Channel::try_from(channel) {
            Ok(channel) => self.voltage(channel),
            Err(_) => 0.0,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error
    }

    /// Clock value at the start of the last `update`, whether or not it
    /// succeeded. Zero after `begin`.
    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Results of the last update, or `None` while in error.
    pub fn reading(&self) -> Option<Reading> {
        if self.error {
            return None;
        }
        Some(Reading {
            timestamp_ms: self.timestamp,
            temperature: self
                .mode
                .contains(Mode::TEMPERATURE)
                .then_some(self.temperature),
            voltage_a: self.mode.contains(Mode::CHA).then_some(self.voltage_a),
            voltage_b: self.mode.contains(Mode::CHB).then_some(self.voltage_b),
        })
    }

    /// Hand back the bus and clock.
    pub fn release(self) -> (B, C) {
        (self.bus, self.clock)
    }
}
