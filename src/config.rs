//! Station configuration parameters
//!
//! All tunable parameters for the TempStation controller.  Defaults match
//! the shipped panel behaviour; the host binary can override them from a
//! JSON file.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Largest duty value the PWM core accepts.
pub const MAX_DUTY: u16 = 1023;

/// Core station configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    // --- Sensor ---
    /// 7-bit bus address of the ADT7420
    pub sensor_address: u8,
    /// Value the identity register is expected to return
    pub expected_device_id: u8,
    /// Read the identity register before every temperature read
    pub verify_identity: bool,

    // --- Calibration ---
    /// Samples averaged by set-baseline
    pub calibration_samples: u8,
    /// Pause after an averaged read completes (milliseconds)
    pub settle_delay_ms: u32,
    /// Pause between the sweep animation and sampling (milliseconds)
    pub pre_sample_delay_ms: u32,
    /// Hold after the baseline has been rendered (milliseconds)
    pub calibrate_hold_ms: u32,
    /// Refresh period of the difference display (milliseconds)
    pub difference_refresh_ms: u32,

    // --- Display / animation ---
    /// How long the LIVE and DIFF banners stay up (milliseconds)
    pub banner_hold_ms: u32,
    /// Reset flash on-time (milliseconds)
    pub reset_flash_ms: u32,
    /// Per-LED step of the sweep animation (milliseconds)
    pub sweep_step_ms: u32,
    /// Exact switch word that selects Fahrenheit in live mode
    pub fahrenheit_switch_word: u16,

    // --- Indicator ---
    /// Duty written to a lit direction channel (0-1023)
    pub full_duty: u16,
    /// Duty written to the at-baseline channel (0-1023)
    pub baseline_duty: u16,

    // --- Timing ---
    /// Pause at the end of every control-loop iteration (milliseconds)
    pub poll_interval_ms: u32,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            // Sensor
            sensor_address: 0x4B,
            expected_device_id: 0xCB,
            verify_identity: true,

            // Calibration
            calibration_samples: 30,
            settle_delay_ms: 1000,
            pre_sample_delay_ms: 1000,
            calibrate_hold_ms: 500,
            difference_refresh_ms: 500,

            // Display / animation
            banner_hold_ms: 2000,
            reset_flash_ms: 1000,
            sweep_step_ms: 100,
            fahrenheit_switch_word: 0x0001,

            // Indicator
            full_duty: MAX_DUTY,
            baseline_duty: 1,

            // Timing
            poll_interval_ms: 0, // free-running, like the bare-metal loop
        }
    }
}

impl StationConfig {
    /// Reject values the hardware or the state machine cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.sensor_address > 0x7F {
            return Err(Error::Config("sensor_address must be a 7-bit address"));
        }
        if self.calibration_samples == 0 {
            return Err(Error::Config("calibration_samples must be non-zero"));
        }
        if self.full_duty == 0 || self.full_duty > MAX_DUTY {
            return Err(Error::Config("full_duty must be in 1..=1023"));
        }
        if self.baseline_duty == 0 || self.baseline_duty >= self.full_duty {
            return Err(Error::Config("baseline_duty must be non-zero and below full_duty"));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.  Missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }
}
