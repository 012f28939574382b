//! Three-channel direction indicator.
//!
//! Maps a signed temperature difference onto PWM duties.  Exactly one
//! channel is non-zero for every input:
//!
//! | Difference | ch0  | ch1 | ch2  |
//! |------------|------|-----|------|
//! | `< 0`      | full | 0   | 0    |
//! | `== 0`     | 0    | min | 0    |
//! | `> 0`      | 0    | 0   | full |

use crate::app::ports::IndicatorPort;
use crate::config::StationConfig;

/// Which side of the baseline the difference falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Negative = 0,
    Zero = 1,
    Positive = 2,
}

impl Direction {
    /// NaN has no side and is treated as `Zero`.
    pub fn of(difference: f32) -> Self {
        if difference < 0.0 {
            Self::Negative
        } else if difference > 0.0 {
            Self::Positive
        } else {
            Self::Zero
        }
    }

    pub fn channel(self) -> u8 {
        self as u8
    }
}

/// Duty per channel, index = channel number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorDuty(pub [u16; 3]);

impl IndicatorDuty {
    pub const OFF: Self = Self([0; 3]);

    pub fn lit_channels(&self) -> usize {
        self.0.iter().filter(|&&d| d != 0).count()
    }

    /// Write all three channels.
    pub fn apply<P: IndicatorPort + ?Sized>(&self, port: &mut P) {
        for (channel, &duty) in self.0.iter().enumerate() {
            port.set_duty(channel as u8, duty);
        }
    }
}

/// Difference → duty policy.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorMapper {
    full_duty: u16,
    baseline_duty: u16,
}

impl IndicatorMapper {
    pub fn new(full_duty: u16, baseline_duty: u16) -> Self {
        Self {
            full_duty,
            baseline_duty,
        }
    }

    pub fn from_config(config: &StationConfig) -> Self {
        Self::new(config.full_duty, config.baseline_duty)
    }

    pub fn drive(&self, difference: f32) -> IndicatorDuty {
        let direction = Direction::of(difference);
        let mut duty = IndicatorDuty::OFF;
        duty.0[direction.channel() as usize] = match direction {
            Direction::Zero => self.baseline_duty,
            Direction::Negative | Direction::Positive => self.full_duty,
        };
        duty
    }
}

impl Default for IndicatorMapper {
    fn default() -> Self {
        Self::from_config(&StationConfig::default())
    }
}
