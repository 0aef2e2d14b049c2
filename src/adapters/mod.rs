//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                  |
//! |----------------|--------------------|------------------------------|
//! | `hardware`     | SensorPort         | DHT22, PIR (GPIO)            |
//! |                | ActuatorPort       | Servo (LEDC PWM), light GPIO |
//! | `log_sink`     | EventSink          | Serial log output            |
//! | `telemetry`    | TelemetrySink      | Serial log output            |
//! | `time`         | ClockPort          | Monotonic system timer       |
//! | `config_file`  | ConfigPort         | JSON file                    |
//! | `console`      | (command source)   | UART console → mailbox       |

pub mod config_file;
pub mod console;
pub mod hardware;
pub mod log_sink;
pub mod telemetry;
pub mod time;
