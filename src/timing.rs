use serde::{Deserialize, Serialize};

use crate::commands::{TEMPERATURE_DELAY, VOLTAGE_CONVERSION_DELAY};

/// Settling waits after each conversion command.
///
/// The defaults are the datasheet conversion times. Longer waits are safe,
/// shorter ones read back the previous conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    /// Wait after Convert T.
    pub temperature_delay_ms: u16,

    /// Wait after Convert V.
    pub voltage_conversion_delay_ms: u16,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            temperature_delay_ms: TEMPERATURE_DELAY,
            voltage_conversion_delay_ms: VOLTAGE_CONVERSION_DELAY,
        }
    }
}

impl Timing {
    /// Worst case time `update` spends waiting for one channel.
    pub fn channel_budget_ms(&self, with_temperature: bool) -> u32 {
        let mut budget = self.voltage_conversion_delay_ms as u32;
        if with_temperature {
            budget += self.temperature_delay_ms as u32;
        }
        budget
    }
}
