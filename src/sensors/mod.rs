//! Temperature sensing: the ADT7420 driver and sample averaging.

pub mod adt7420;

use embedded_hal::delay::DelayNs;
use log::info;

use crate::app::ports::SensorPort;
use crate::error::SensorError;

/// Average `samples` consecutive readings, then block for `settle_ms`.
///
/// Any failed read aborts the average; a partial mean is never returned.
pub fn read_average<H>(hw: &mut H, samples: u8, settle_ms: u32) -> Result<f32, SensorError>
where
    H: SensorPort + DelayNs + ?Sized,
{
    if samples == 0 {
        return Err(SensorError::NoSamples);
    }

    let mut total = 0.0f32;
    for _ in 0..samples {
        total += hw.read_celsius()?;
    }
    let average = total / f32::from(samples);
    info!("AVG: total {:.4} C over {} samples, mean {:.4} C", total, samples, average);

    hw.delay_ms(settle_ms);
    Ok(average)
}
