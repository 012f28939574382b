//! Host-side simulation of the station hardware.
//!
//! - [`SimBus`] answers two-wire transactions the way an ADT7420 does,
//!   so the real driver runs unchanged on the host.
//! - [`SimPanel`] replays a script of button words and records what the
//!   core drives onto the display, PWM, and LEDs.
//! - [`StdDelay`] sleeps the calling thread.

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use log::{debug, trace};

use crate::app::ports::{ButtonPort, DisplayPort, IndicatorPort, LedPort, SwitchPort};
use crate::display::encoder::DIGIT_POSITIONS;
use crate::sensors::adt7420::{REG_ID, REG_TEMPERATURE};

/// Encode degrees Celsius as the 13-bit temperature register.
pub fn encode_register(celsius: f32) -> [u8; 2] {
    let counts = (celsius * 16.0).round() as i32;
    let word = ((counts & 0x1FFF) as u16) << 3;
    word.to_be_bytes()
}

// ───────────────────────────────────────────────────────────────
// SimBus
// ───────────────────────────────────────────────────────────────

/// Emulated ADT7420 behind an I2C bus.
pub struct SimBus {
    address: u8,
    device_id: u8,
    celsius: f32,
    drift_per_read: f32,
    pointer: u8,
}

impl SimBus {
    pub fn new(address: u8, device_id: u8, celsius: f32) -> Self {
        Self {
            address,
            device_id,
            celsius,
            drift_per_read: 0.0,
            pointer: REG_TEMPERATURE,
        }
    }

    /// Change the simulated temperature by `step` after every read.
    pub fn with_drift(mut self, step: f32) -> Self {
        self.drift_per_read = step;
        self
    }

    pub fn celsius(&self) -> f32 {
        self.celsius
    }

    fn fill(&mut self, buf: &mut [u8]) {
        let source: [u8; 2] = match self.pointer {
            REG_ID => [self.device_id, 0],
            REG_TEMPERATURE => {
                let raw = encode_register(self.celsius);
                self.celsius += self.drift_per_read;
                raw
            }
            _ => [0, 0],
        };
        for (dst, src) in buf.iter_mut().zip(source.iter().chain(core::iter::repeat(&0))) {
            *dst = *src;
        }
    }
}

impl ErrorType for SimBus {
    type Error = ErrorKind;
}

impl I2c for SimBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    if let Some(&reg) = bytes.first() {
                        self.pointer = reg;
                    }
                }
                Operation::Read(buf) => self.fill(buf),
            }
        }
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// SimPanel
// ───────────────────────────────────────────────────────────────

/// Scripted buttons plus recorded outputs.
pub struct SimPanel {
    script: VecDeque<u8>,
    switches: u16,
    patterns: [u8; DIGIT_POSITIONS],
    duty: [u16; 3],
    leds: u8,
}

impl SimPanel {
    /// Each scripted word is seen by exactly one control tick; after the
    /// script runs out no button is held.
    pub fn new(script: impl IntoIterator<Item = u8>, switches: u16) -> Self {
        Self {
            script: script.into_iter().collect(),
            switches,
            patterns: [0xFF; DIGIT_POSITIONS],
            duty: [0; 3],
            leds: 0,
        }
    }

    pub fn script_remaining(&self) -> usize {
        self.script.len()
    }

    pub fn patterns(&self) -> &[u8; DIGIT_POSITIONS] {
        &self.patterns
    }

    pub fn duty(&self) -> [u16; 3] {
        self.duty
    }

    /// LED states, bit `i` = LED `i`.
    pub fn leds(&self) -> u8 {
        self.leds
    }
}

impl ButtonPort for SimPanel {
    fn read_buttons(&mut self) -> u8 {
        self.script.pop_front().unwrap_or(0)
    }
}

impl SwitchPort for SimPanel {
    fn read_switches(&mut self) -> u16 {
        self.switches
    }
}

impl DisplayPort for SimPanel {
    fn write_pattern(&mut self, position: u8, pattern: u8) {
        if let Some(slot) = self.patterns.get_mut(usize::from(position)) {
            *slot = pattern;
        }
    }

    fn set_decimal_points(&mut self, mask: u8) {
        if mask != 0 || self.patterns.iter().any(|&p| p != 0xFF) {
            debug!("DISPLAY | {:02x?} dp=0x{:02x}", self.patterns, mask);
        }
    }
}

impl IndicatorPort for SimPanel {
    fn set_duty(&mut self, channel: u8, duty: u16) {
        if let Some(slot) = self.duty.get_mut(usize::from(channel)) {
            if *slot != duty {
                debug!("PWM     | ch{} = {}", channel, duty);
            }
            *slot = duty;
        }
    }
}

impl LedPort for SimPanel {
    fn set_led(&mut self, index: u8, on: bool) {
        if index < 8 {
            if on {
                self.leds |= 1 << index;
            } else {
                self.leds &= !(1 << index);
            }
            trace!("LED     | {:04b}", self.leds);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// StdDelay
// ───────────────────────────────────────────────────────────────

/// Blocking delay backed by `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}
