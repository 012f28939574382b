//! Integration tests for the StationService → FSM → panel pipeline.
//!
//! Button words and sensor readings are scripted through
//! [`MockHardware`]; assertions look at the display, PWM, LEDs, and the
//! emitted event stream.

use crate::mock_hw::{MockHardware, RecordingSink};

use tempstation::app::events::StationEvent;
use tempstation::app::service::StationService;
use tempstation::config::StationConfig;
use tempstation::display::segments::{BLANK, Glyph};
use tempstation::display::{Banner, Frame};
use tempstation::error::SensorError;
use tempstation::fsm::Mode;
use tempstation::fsm::context::CalibratePhase;

use embedded_hal::i2c::ErrorKind;

const IDLE: u8 = 1;
const SET_BASELINE: u8 = 2;
const CALIBRATE: u8 = 4;
const SHOW_DIFFERENCE: u8 = 8;
const LIVE: u8 = 16;

fn make_station() -> (StationService<MockHardware>, MockHardware, RecordingSink) {
    let mut service = StationService::new(StationConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    service.start(&mut hw, &mut sink);
    (service, hw, sink)
}

fn press(
    service: &mut StationService<MockHardware>,
    hw: &mut MockHardware,
    sink: &mut RecordingSink,
    code: u8,
) {
    hw.press(code);
    service.tick(hw, sink);
}

fn idle_tick(
    service: &mut StationService<MockHardware>,
    hw: &mut MockHardware,
    sink: &mut RecordingSink,
) {
    service.tick(hw, sink);
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn startup_flashes_reset_and_leaves_outputs_cleared() {
    let (service, hw, sink) = make_station();

    assert_eq!(service.mode(), Mode::Idle);
    assert_eq!(service.baseline(), None);
    assert!(hw.display_blank(), "reset banner is cleared after the flash");
    assert_eq!(hw.duty, [0, 0, 0]);
    assert_eq!(hw.leds, [false; 4]);
    assert_eq!(hw.slept_ms(), 1000);
    assert_eq!(sink.events, vec![StationEvent::Started(Mode::Idle)]);
}

#[test]
fn idle_with_no_button_stays_idle_and_reads_nothing() {
    let (mut service, mut hw, mut sink) = make_station();
    for _ in 0..5 {
        idle_tick(&mut service, &mut hw, &mut sink);
    }
    assert_eq!(service.mode(), Mode::Idle);
    assert_eq!(hw.sensor_reads, 0);
    assert_eq!(service.tick_count(), 5);
}

// ── Live mode ─────────────────────────────────────────────────

#[test]
fn live_shows_banner_then_celsius_reading() {
    let (mut service, mut hw, mut sink) = make_station();

    press(&mut service, &mut hw, &mut sink, LIVE);
    assert_eq!(service.mode(), Mode::Live);
    assert_eq!(hw.patterns, Frame::banner(Banner::Live).patterns);
    assert_eq!(hw.sensor_reads, 0);

    hw.queue_readings(25.0625, 1);
    idle_tick(&mut service, &mut hw, &mut sink);

    assert_eq!(hw.patterns[0], Glyph::C.pattern());
    assert_eq!(hw.patterns[1], Glyph::Digit(2).pattern());
    assert_eq!(hw.patterns[2], Glyph::Digit(6).pattern());
    assert_eq!(hw.patterns[3], Glyph::Digit(0).pattern());
    assert_eq!(hw.patterns[4], Glyph::Digit(5).pattern());
    assert_eq!(hw.patterns[5], Glyph::Digit(2).pattern());
    assert_eq!(hw.patterns[6], BLANK);
    assert_eq!(hw.decimal_points, 0x10);
    assert!(sink.events.contains(&StationEvent::LiveReading {
        celsius: 25.0625,
        unit: tempstation::display::Unit::Celsius,
    }));
}

#[test]
fn live_switch_selects_fahrenheit() {
    let (mut service, mut hw, mut sink) = make_station();
    press(&mut service, &mut hw, &mut sink, LIVE);

    hw.switches = 0x0001;
    hw.queue_readings(25.0, 1);
    idle_tick(&mut service, &mut hw, &mut sink);

    // 77.000 F
    assert_eq!(hw.patterns[0], Glyph::F.pattern());
    assert_eq!(hw.patterns[4], Glyph::Digit(7).pattern());
    assert_eq!(hw.patterns[5], Glyph::Digit(7).pattern());
}

#[test]
fn live_fahrenheit_needs_exact_switch_word() {
    let (mut service, mut hw, mut sink) = make_station();
    press(&mut service, &mut hw, &mut sink, LIVE);

    hw.switches = 0x0003;
    hw.queue_readings(25.0, 1);
    idle_tick(&mut service, &mut hw, &mut sink);

    assert_eq!(hw.patterns[0], Glyph::C.pattern());
    assert_eq!(hw.patterns[5], Glyph::Digit(2).pattern());
    assert!(sink.events.contains(&StationEvent::LiveReading {
        celsius: 25.0,
        unit: tempstation::display::Unit::Celsius,
    }));
}

#[test]
fn live_refreshes_every_tick() {
    let (mut service, mut hw, mut sink) = make_station();
    press(&mut service, &mut hw, &mut sink, LIVE);
    for _ in 0..4 {
        idle_tick(&mut service, &mut hw, &mut sink);
    }
    assert_eq!(hw.sensor_reads, 4);
    assert_eq!(
        sink.count(|e| matches!(e, StationEvent::LiveReading { .. })),
        4
    );
}

#[test]
fn live_sensor_failure_blanks_display_and_keeps_running() {
    let (mut service, mut hw, mut sink) = make_station();
    press(&mut service, &mut hw, &mut sink, LIVE);
    hw.queue_readings(21.5, 1);
    idle_tick(&mut service, &mut hw, &mut sink);
    assert!(!hw.display_blank());

    hw.queue_failure(SensorError::Bus(ErrorKind::Other));
    idle_tick(&mut service, &mut hw, &mut sink);

    assert_eq!(service.mode(), Mode::Live);
    assert!(hw.display_blank(), "no stale reading left on the display");
    assert!(sink.events.contains(&StationEvent::ReadingUnavailable(
        SensorError::Bus(ErrorKind::Other)
    )));

    idle_tick(&mut service, &mut hw, &mut sink);
    assert!(!hw.display_blank(), "next good reading is shown again");
}

#[test]
fn live_to_idle_clears_display() {
    let (mut service, mut hw, mut sink) = make_station();
    press(&mut service, &mut hw, &mut sink, LIVE);
    idle_tick(&mut service, &mut hw, &mut sink);
    press(&mut service, &mut hw, &mut sink, IDLE);
    assert_eq!(service.mode(), Mode::Idle);
    assert!(hw.display_blank());
}

// ── Unrecognised input ────────────────────────────────────────

#[test]
fn unrecognised_codes_are_ignored() {
    let (mut service, mut hw, mut sink) = make_station();
    sink.clear();

    for code in [3u8, 5, 0x1F, 32, 0xFF, SET_BASELINE, SHOW_DIFFERENCE] {
        press(&mut service, &mut hw, &mut sink, code);
        assert_eq!(service.mode(), Mode::Idle, "code {code} must not change mode");
    }
    assert!(sink.events.is_empty());
    assert_eq!(hw.sensor_reads, 0);
}

#[test]
fn idle_in_idle_reruns_reset() {
    let (mut service, mut hw, mut sink) = make_station();
    let before = hw.slept_ms();
    press(&mut service, &mut hw, &mut sink, IDLE);
    assert_eq!(service.mode(), Mode::Idle);
    assert_eq!(hw.slept_ms() - before, 1000);
    assert!(sink.events.contains(&StationEvent::ModeChanged {
        from: Mode::Idle,
        to: Mode::Idle
    }));
}

// ── Calibrate mode ────────────────────────────────────────────

#[test]
fn calibrate_shows_avg_banner_and_waits() {
    let (mut service, mut hw, mut sink) = make_station();
    press(&mut service, &mut hw, &mut sink, CALIBRATE);

    assert_eq!(service.mode(), Mode::Calibrate);
    assert_eq!(service.calibrate_phase(), CalibratePhase::AwaitingAction);
    assert_eq!(hw.patterns, Frame::banner(Banner::Average).patterns);

    idle_tick(&mut service, &mut hw, &mut sink);
    assert_eq!(hw.sensor_reads, 0, "nothing is sampled until an action");
}

#[test]
fn set_baseline_averages_thirty_samples() {
    let (mut service, mut hw, mut sink) = make_station();
    press(&mut service, &mut hw, &mut sink, CALIBRATE);

    hw.queue_readings(20.0, 15);
    hw.queue_readings(21.0, 15);
    let before = hw.slept_ms();
    press(&mut service, &mut hw, &mut sink, SET_BASELINE);

    assert_eq!(hw.sensor_reads, 30);
    assert_eq!(service.baseline(), Some(20.5));
    assert!(sink.events.contains(&StationEvent::BaselineSet(20.5)));
    // sweep 8 x 100, pre-sample 1000, settle 1000, hold 500
    assert_eq!(hw.slept_ms() - before, 3300);
    assert_eq!(hw.leds, [false; 4], "sweep leaves every LED off");

    // 20.500 C on display
    assert_eq!(hw.patterns[0], Glyph::C.pattern());
    assert_eq!(hw.patterns[3], Glyph::Digit(5).pattern());
    assert_eq!(hw.patterns[4], Glyph::Digit(0).pattern());
    assert_eq!(hw.patterns[5], Glyph::Digit(2).pattern());
    assert_eq!(service.mode(), Mode::Calibrate);
}

#[test]
fn failed_average_keeps_previous_baseline() {
    let (mut service, mut hw, mut sink) = make_station();
    press(&mut service, &mut hw, &mut sink, CALIBRATE);
    hw.queue_readings(19.0, 30);
    press(&mut service, &mut hw, &mut sink, SET_BASELINE);
    assert_eq!(service.baseline(), Some(19.0));

    hw.queue_readings(30.0, 4);
    hw.queue_failure(SensorError::Bus(ErrorKind::Other));
    press(&mut service, &mut hw, &mut sink, SET_BASELINE);

    assert_eq!(service.baseline(), Some(19.0));
    assert_eq!(hw.patterns, Frame::banner(Banner::Average).patterns);
}

#[test]
fn full_scenario_negative_difference() {
    let (mut service, mut hw, mut sink) = make_station();

    press(&mut service, &mut hw, &mut sink, CALIBRATE);
    hw.queue_readings(20.0, 30);
    press(&mut service, &mut hw, &mut sink, SET_BASELINE);
    assert_eq!(service.baseline(), Some(20.0));

    hw.queue_readings(20.475, 1);
    press(&mut service, &mut hw, &mut sink, SHOW_DIFFERENCE);
    assert_eq!(service.calibrate_phase(), CalibratePhase::ShowingDifference);

    // 20.0 - 20.475 = -0.475 → "C 5 7 4 0 -"
    assert_eq!(hw.patterns[0], Glyph::C.pattern());
    assert_eq!(hw.patterns[1], Glyph::Digit(5).pattern());
    assert_eq!(hw.patterns[2], Glyph::Digit(7).pattern());
    assert_eq!(hw.patterns[3], Glyph::Digit(4).pattern());
    assert_eq!(hw.patterns[4], Glyph::Digit(0).pattern());
    assert_eq!(hw.patterns[5], Glyph::Dash.pattern());
    assert_eq!(hw.decimal_points, 0x10);
    assert_eq!(hw.duty, [1023, 0, 0]);

    press(&mut service, &mut hw, &mut sink, LIVE);
    assert_eq!(service.mode(), Mode::Live);
    assert_eq!(hw.duty, [0, 0, 0], "indicator is off outside the difference display");
}

#[test]
fn difference_refreshes_until_mode_change() {
    let (mut service, mut hw, mut sink) = make_station();
    press(&mut service, &mut hw, &mut sink, CALIBRATE);
    hw.queue_readings(20.0, 30);
    press(&mut service, &mut hw, &mut sink, SET_BASELINE);

    hw.queue_readings(20.0, 1);
    hw.queue_readings(19.0, 1);
    press(&mut service, &mut hw, &mut sink, SHOW_DIFFERENCE);
    assert_eq!(hw.duty, [0, 1, 0], "at baseline: dim middle channel");

    idle_tick(&mut service, &mut hw, &mut sink);
    assert_eq!(hw.duty, [0, 0, 1023], "warmer baseline: positive channel");

    // Set-baseline is not honoured inside the difference display.
    press(&mut service, &mut hw, &mut sink, SET_BASELINE);
    assert_eq!(service.baseline(), Some(20.0));
    assert_eq!(service.calibrate_phase(), CalibratePhase::ShowingDifference);

    assert_eq!(
        sink.count(|e| matches!(e, StationEvent::Difference { .. })),
        3
    );
}

#[test]
fn difference_before_calibration_uses_zero_baseline() {
    let (mut service, mut hw, mut sink) = make_station();
    press(&mut service, &mut hw, &mut sink, CALIBRATE);

    hw.queue_readings(1.5, 1);
    press(&mut service, &mut hw, &mut sink, SHOW_DIFFERENCE);

    assert_eq!(service.baseline(), None);
    assert!(sink.events.contains(&StationEvent::Difference {
        stored: 0.0,
        current: 1.5,
        difference: -1.5,
    }));
    assert_eq!(hw.duty, [1023, 0, 0]);
}

#[test]
fn difference_sensor_failure_turns_indicator_off() {
    let (mut service, mut hw, mut sink) = make_station();
    press(&mut service, &mut hw, &mut sink, CALIBRATE);
    hw.queue_readings(20.0, 30);
    press(&mut service, &mut hw, &mut sink, SET_BASELINE);
    hw.queue_readings(25.0, 1);
    press(&mut service, &mut hw, &mut sink, SHOW_DIFFERENCE);
    assert_eq!(hw.duty, [1023, 0, 0]);

    hw.queue_failure(SensorError::Bus(ErrorKind::Other));
    idle_tick(&mut service, &mut hw, &mut sink);
    assert_eq!(hw.duty, [0, 0, 0]);
    assert!(hw.display_blank());
    assert_eq!(service.mode(), Mode::Calibrate);
}

// ── Baseline lifetime ─────────────────────────────────────────

#[test]
fn baseline_survives_live_round_trip() {
    let (mut service, mut hw, mut sink) = make_station();
    press(&mut service, &mut hw, &mut sink, CALIBRATE);
    hw.queue_readings(18.25, 30);
    press(&mut service, &mut hw, &mut sink, SET_BASELINE);

    press(&mut service, &mut hw, &mut sink, LIVE);
    idle_tick(&mut service, &mut hw, &mut sink);
    press(&mut service, &mut hw, &mut sink, CALIBRATE);

    assert_eq!(service.mode(), Mode::Calibrate);
    assert_eq!(service.baseline(), Some(18.25));
}

#[test]
fn idle_clears_baseline() {
    let (mut service, mut hw, mut sink) = make_station();
    press(&mut service, &mut hw, &mut sink, CALIBRATE);
    hw.queue_readings(18.25, 30);
    press(&mut service, &mut hw, &mut sink, SET_BASELINE);
    assert!(service.baseline().is_some());

    press(&mut service, &mut hw, &mut sink, IDLE);
    assert_eq!(service.mode(), Mode::Idle);
    assert_eq!(service.baseline(), None);
}

#[test]
fn poll_interval_is_slept_every_tick() {
    let config = StationConfig {
        poll_interval_ms: 50,
        ..StationConfig::default()
    };
    let mut service = StationService::new(config);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    service.start(&mut hw, &mut sink);
    let before = hw.slept_ms();
    for _ in 0..3 {
        service.tick(&mut hw, &mut sink);
    }
    assert_eq!(hw.slept_ms() - before, 150);
}

#[test]
fn button_sequence_from_idle() {
    let (mut service, mut hw, mut sink) = make_station();
    hw.fallback_reading = 24.0;
    sink.clear();

    let expected = [
        (IDLE, Mode::Idle),
        (CALIBRATE, Mode::Calibrate),
        (SET_BASELINE, Mode::Calibrate),
        (SHOW_DIFFERENCE, Mode::Calibrate),
        (LIVE, Mode::Live),
    ];
    for (code, mode) in expected {
        press(&mut service, &mut hw, &mut sink, code);
        assert_eq!(service.mode(), mode, "after code {code}");
    }

    assert_eq!(service.baseline(), Some(24.0));
    assert_eq!(hw.duty, [0, 0, 0]);
    assert_eq!(
        sink.count(|e| matches!(e, StationEvent::ModeChanged { .. })),
        3
    );
}
