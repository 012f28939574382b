//! TempStation: host entry point.
//!
//! Runs the control loop against simulated hardware: the real ADT7420
//! driver talks to an emulated sensor, and the front panel replays a
//! script of button words given on the command line.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  Board<Adt7420<SimBus>, SimPanel, StdDelay>     LogEventSink   │
//! │  (every station port + DelayNs)                 (EventSink)    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            StationService (pure logic)                 │    │
//! │  │  FSM · encoder · indicator                             │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `tempstation [--config FILE] [--celsius T] [--drift D]
//! [--switches N] [CODE ...]`.  With no codes the loop runs forever in
//! Idle; with codes each is held for one tick and the process exits a
//! few ticks after the script ends.
#![deny(unused_must_use)]

use anyhow::{Context, Result, bail};
use log::info;

use tempstation::adapters::board::Board;
use tempstation::adapters::log_sink::LogEventSink;
use tempstation::adapters::sim::{SimBus, SimPanel, StdDelay};
use tempstation::app::service::StationService;
use tempstation::config::StationConfig;
use tempstation::sensors::adt7420::Adt7420;

/// Ticks run after the last scripted code so its effect is visible.
const TRAILING_TICKS: u32 = 3;

// ── Command line ──────────────────────────────────────────────

struct Args {
    config_path: Option<String>,
    celsius: f32,
    drift: f32,
    switches: u16,
    script: Vec<u8>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config_path: None,
        celsius: 22.0,
        drift: 0.0,
        switches: 0,
        script: Vec::new(),
    };

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => args.config_path = Some(it.next().context("--config needs a path")?),
            "--celsius" => {
                let v = it.next().context("--celsius needs a value")?;
                args.celsius = v.parse().with_context(|| format!("bad temperature '{v}'"))?;
            }
            "--drift" => {
                let v = it.next().context("--drift needs a value")?;
                args.drift = v.parse().with_context(|| format!("bad drift '{v}'"))?;
            }
            "--switches" => {
                let v = it.next().context("--switches needs a value")?;
                args.switches = v.parse().with_context(|| format!("bad switch word '{v}'"))?;
            }
            flag if flag.starts_with("--") => bail!("unknown option '{flag}'"),
            code => args
                .script
                .push(code.parse().with_context(|| format!("bad button code '{code}'"))?),
        }
    }
    Ok(args)
}

fn load_config(path: Option<&str>) -> Result<StationConfig> {
    let Some(path) = path else {
        return Ok(StationConfig::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let config = StationConfig::from_json(&text).with_context(|| format!("parsing {path}"))?;
    info!("Config loaded from {}", path);
    Ok(config)
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("TempStation v{}", env!("CARGO_PKG_VERSION"));

    let args = parse_args()?;
    let config = load_config(args.config_path.as_deref())?;
    config.validate().context("invalid configuration")?;

    let bus = SimBus::new(config.sensor_address, config.expected_device_id, args.celsius)
        .with_drift(args.drift);
    let sensor = Adt7420::new(bus, &config);
    let panel = SimPanel::new(args.script.iter().copied(), args.switches);
    let mut hw = Board::new(sensor, panel, StdDelay);
    let mut sink = LogEventSink::new();

    let mut service = StationService::new(config);

    if args.script.is_empty() {
        service.run(&mut hw, &mut sink);
    }

    service.start(&mut hw, &mut sink);
    while hw.panel().script_remaining() > 0 {
        service.tick(&mut hw, &mut sink);
    }
    for _ in 0..TRAILING_TICKS {
        service.tick(&mut hw, &mut sink);
    }

    info!(
        "Script finished after {} ticks in {:?}, baseline {:?}",
        service.tick_count(),
        service.mode(),
        service.baseline()
    );
    Ok(())
}
