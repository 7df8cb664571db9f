use core::fmt::Display;

use serde::{Deserialize, Serialize};

/// Snapshot of a successful `update`.
/// Fields for quantities outside the active mode are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Clock value when the update started.
    pub timestamp_ms: u32,

    /// Degrees Celsius.
    pub temperature: Option<f32>,

    /// Channel A volts.
    pub voltage_a: Option<f32>,

    /// Channel B volts.
    pub voltage_b: Option<f32>,
}

impl Display for Reading {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "<Reading @ {} ms:", self.timestamp_ms)?;
        if let Some(temperature) = self.temperature {
            write!(f, " {} degC", temperature)?;
        }
        if let Some(voltage) = self.voltage_a {
            write!(f, " CHA {} V", voltage)?;
        }
        if let Some(voltage) = self.voltage_b {
            write!(f, " CHB {} V", voltage)?;
        }
        write!(f, ">")
    }
}
