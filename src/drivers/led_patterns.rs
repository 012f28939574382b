//! Status-LED confirmation animations.
//!
//! Four discrete LEDs acknowledge long-running actions.  Both animations
//! block on the injected delay and leave every LED off.
//!
//! | Animation   | Shape                                  | Used by        |
//! |-------------|----------------------------------------|----------------|
//! | Reset flash | all on, hold, all off                  | Idle entry     |
//! | Sweep       | on 0→3 then off 3→0, one step per tick | set-baseline   |

use embedded_hal::delay::DelayNs;

use crate::app::ports::LedPort;

/// LEDs taking part in the animations.
pub const ANIMATED_LEDS: u8 = 4;

/// Light every LED, hold for `hold_ms`, then turn them off.
pub fn reset_flash<H>(hw: &mut H, hold_ms: u32)
where
    H: LedPort + DelayNs + ?Sized,
{
    for i in 0..ANIMATED_LEDS {
        hw.set_led(i, true);
    }
    hw.delay_ms(hold_ms);
    all_off(hw);
}

/// Light LEDs one at a time left to right, then clear them right to left.
pub fn sweep<H>(hw: &mut H, step_ms: u32)
where
    H: LedPort + DelayNs + ?Sized,
{
    for i in 0..ANIMATED_LEDS {
        hw.set_led(i, true);
        hw.delay_ms(step_ms);
    }
    for i in (0..ANIMATED_LEDS).rev() {
        hw.set_led(i, false);
        hw.delay_ms(step_ms);
    }
}

pub fn all_off<H: LedPort + ?Sized>(hw: &mut H) {
    for i in (0..ANIMATED_LEDS).rev() {
        hw.set_led(i, false);
    }
}
