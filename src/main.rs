//! Greenhouse Controller Firmware: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   LogEventSink   LogTelemetrySink  SystemClock│
//! │  (Sensor+Actuator) (EventSink)    (TelemetrySink)   (Clock)    │
//! │  JsonConfigAdapter        console reader ──▶ CommandMailbox    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │         ControllerService (pure logic)                 │    │
//! │  │  Supervisor · Watering · Motion light                  │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  CycleScheduler (fixed cadence, mailbox drained per cycle)     │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::Ets;
use esp_idf_hal::gpio::{AnyIOPin, PinDriver, Pull};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::FromValueType;
use log::{info, warn};

use greenhouse::adapters::config_file::JsonConfigAdapter;
use greenhouse::adapters::console;
use greenhouse::adapters::hardware::HardwareAdapter;
use greenhouse::adapters::log_sink::LogEventSink;
use greenhouse::adapters::telemetry::LogTelemetrySink;
use greenhouse::adapters::time::SystemClock;
use greenhouse::app::mailbox::CommandMailbox;
use greenhouse::app::ports::ConfigPort;
use greenhouse::app::service::ControllerService;
use greenhouse::config::SystemConfig;
use greenhouse::drivers::digital_out::DigitalOutput;
use greenhouse::drivers::servo::ServoDriver;
use greenhouse::error::Error;
use greenhouse::scheduler::CycleScheduler;
use greenhouse::sensors::SensorHub;
use greenhouse::sensors::dht22::Dht22;
use greenhouse::sensors::motion::MotionSensor;

/// Commands from the console thread to the control loop.
static MAILBOX: CommandMailbox = CommandMailbox::new();

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Greenhouse v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = match JsonConfigAdapter::from_env().load() {
        Ok(c) => c,
        Err(e) => {
            warn!("{}, using defaults", Error::from(e));
            SystemConfig::default()
        }
    };
    info!(
        "Config: interval={}ms enabled={} pins={:?}",
        config.control_loop_interval_ms, config.initially_enabled, config.pins
    );

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;

    // SAFETY: `validate()` guarantees the four GPIO numbers are distinct,
    // and `peripherals.pins` is never used, so each pin has one owner.
    let (dht_pin, pir_pin, servo_pin, light_pin) = unsafe {
        (
            AnyIOPin::new(config.pins.dht_gpio),
            AnyIOPin::new(config.pins.pir_gpio),
            AnyIOPin::new(config.pins.servo_gpio),
            AnyIOPin::new(config.pins.light_gpio),
        )
    };

    let mut dht_pin = PinDriver::input_output_od(dht_pin)?;
    dht_pin.set_pull(Pull::Up)?;
    let pir_pin = PinDriver::input(pir_pin)?;
    let light_pin = PinDriver::output(light_pin)?;

    let servo_timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::default()
            .frequency(config.servo.frequency_hz.Hz())
            // ~1.2 µs steps at 50 Hz
            .resolution(Resolution::Bits14),
    )?;
    let servo_pwm = LedcDriver::new(peripherals.ledc.channel0, &servo_timer, servo_pin)?;

    let sensor_hub = SensorHub::new(Dht22::new(dht_pin, Ets), MotionSensor::new(pir_pin));
    let mut hw = HardwareAdapter::new(
        sensor_hub,
        ServoDriver::new(servo_pwm, config.servo),
        DigitalOutput::new(light_pin, config.pins.light_gpio),
    );
    info!("Hardware initialised");

    // ── 4. Command source ─────────────────────────────────────
    console::spawn(&MAILBOX).map_err(|_| Error::Init("console thread"))?;
    info!("Console ready: type 'on' or 'off'");

    // ── 5. Application core ───────────────────────────────────
    let mut telemetry = LogTelemetrySink::new();
    let mut events = LogEventSink::new();
    let mut app = ControllerService::new(config);
    app.start(&mut hw, &mut telemetry, &mut events);

    // ── 6. Control loop (never returns) ───────────────────────
    let mut clock = SystemClock::new();
    let mut scheduler = CycleScheduler::new(&MAILBOX, app.config().control_loop_interval_ms);
    scheduler.run(&mut clock, &mut app, &mut hw, &mut telemetry, &mut events)
}
