//! ADT7420 digital temperature sensor on the two-wire bus.
//!
//! Register access is write-register-address-then-read.  The default
//! 13-bit mode packs the temperature into the upper bits of a big-endian
//! word:
//!
//! ```text
//!  bit  15 14 ........ 3   2 1 0
//!       S  ─ magnitude ─   flags
//! ```
//!
//! `word >> 3` leaves a 13-bit two's-complement count of 1/16 °C.  When
//! bit 15 is set the logical shift leaves bit 12 high, so subtracting
//! 8192 restores the negative value.

use embedded_hal::i2c::{Error as _, I2c};
use log::{debug, warn};

use crate::app::ports::SensorPort;
use crate::config::StationConfig;
use crate::error::SensorError;

/// Temperature register (2 bytes, MSB first).
pub const REG_TEMPERATURE: u8 = 0x00;
/// Identity register (1 byte).
pub const REG_ID: u8 = 0x0B;

/// Decode the raw temperature register into degrees Celsius.
pub fn decode(msb: u8, lsb: u8) -> f32 {
    let word = u16::from_be_bytes([msb, lsb]);
    let count = i32::from(word >> 3);
    if word & 0x8000 != 0 {
        (count - 8192) as f32 / 16.0
    } else {
        count as f32 / 16.0
    }
}

/// Blocking ADT7420 driver.
pub struct Adt7420<I2C> {
    i2c: I2C,
    address: u8,
    expected_id: u8,
    verify_identity: bool,
}

impl<I2C: I2c> Adt7420<I2C> {
    pub fn new(i2c: I2C, config: &StationConfig) -> Self {
        Self {
            i2c,
            address: config.sensor_address,
            expected_id: config.expected_device_id,
            verify_identity: config.verify_identity,
        }
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Read the identity register.
    pub fn read_id(&mut self) -> Result<u8, SensorError> {
        let mut buf = [0u8; 1];
        self.read_register(REG_ID, &mut buf)?;
        Ok(buf[0])
    }

    /// Identity check followed by a temperature read.  A mismatching
    /// identity is logged and the read continues.
    pub fn read_temperature(&mut self) -> Result<f32, SensorError> {
        if self.verify_identity {
            let id = self.read_id()?;
            if id == self.expected_id {
                debug!("ADT7420: id 0x{:02x}", id);
            } else {
                warn!(
                    "ADT7420: id 0x{:02x} (expected 0x{:02x}), reading anyway",
                    id, self.expected_id
                );
            }
        }

        let mut buf = [0u8; 2];
        self.read_register(REG_TEMPERATURE, &mut buf)?;
        let celsius = decode(buf[0], buf[1]);
        debug!("ADT7420: raw 0x{:02x}{:02x} -> {:.4} C", buf[0], buf[1], celsius);
        Ok(celsius)
    }

    fn read_register(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), SensorError> {
        self.i2c
            .write_read(self.address, &[reg], buf)
            .map_err(|e| SensorError::Bus(e.kind()))
    }
}

impl<I2C: I2c> SensorPort for Adt7420<I2C> {
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        self.read_temperature()
    }
}
