//! Board adapter: composes the sensor, the front panel, and a delay
//! into one value satisfying [`StationHardware`].
//!
//! The panel HAL (buttons, switches, seven-segment, PWM, LEDs) is an
//! external collaborator; anything implementing the panel ports can be
//! plugged in.  This is the only place the three are tied together.
//!
//! [`StationHardware`]: crate::app::ports::StationHardware

use embedded_hal::delay::DelayNs;

use crate::app::ports::{
    ButtonPort, DisplayPort, IndicatorPort, LedPort, SensorPort, SwitchPort,
};
use crate::error::SensorError;

/// Everything on the front panel.
pub trait Panel: ButtonPort + SwitchPort + DisplayPort + IndicatorPort + LedPort {}

impl<T> Panel for T where T: ButtonPort + SwitchPort + DisplayPort + IndicatorPort + LedPort {}

/// Concrete adapter that combines all hardware behind the port traits.
pub struct Board<S, P, D> {
    sensor: S,
    panel: P,
    delay: D,
}

impl<S, P, D> Board<S, P, D>
where
    S: SensorPort,
    P: Panel,
    D: DelayNs,
{
    pub fn new(sensor: S, panel: P, delay: D) -> Self {
        Self {
            sensor,
            panel,
            delay,
        }
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Take the parts back.
    pub fn into_parts(self) -> (S, P, D) {
        (self.sensor, self.panel, self.delay)
    }
}

// ── Input ports ───────────────────────────────────────────────

impl<S, P: ButtonPort, D> ButtonPort for Board<S, P, D> {
    fn read_buttons(&mut self) -> u8 {
        self.panel.read_buttons()
    }
}

impl<S, P: SwitchPort, D> SwitchPort for Board<S, P, D> {
    fn read_switches(&mut self) -> u16 {
        self.panel.read_switches()
    }
}

impl<S: SensorPort, P, D> SensorPort for Board<S, P, D> {
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        self.sensor.read_celsius()
    }
}

// ── Output ports ──────────────────────────────────────────────

impl<S, P: DisplayPort, D> DisplayPort for Board<S, P, D> {
    fn write_pattern(&mut self, position: u8, pattern: u8) {
        self.panel.write_pattern(position, pattern);
    }

    fn set_decimal_points(&mut self, mask: u8) {
        self.panel.set_decimal_points(mask);
    }
}

impl<S, P: IndicatorPort, D> IndicatorPort for Board<S, P, D> {
    fn set_duty(&mut self, channel: u8, duty: u16) {
        self.panel.set_duty(channel, duty);
    }
}

impl<S, P: LedPort, D> LedPort for Board<S, P, D> {
    fn set_led(&mut self, index: u8, on: bool) {
        self.panel.set_led(index, on);
    }
}

// ── Time ──────────────────────────────────────────────────────

impl<S, P, D: DelayNs> DelayNs for Board<S, P, D> {
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
