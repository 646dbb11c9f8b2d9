//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements         | Connects to                    |
//! |---------------|--------------------|--------------------------------|
//! | `hardware`    | LightSensorPort    | injected ADC read              |
//! |               | BumperPort         | `embedded-hal` input pins      |
//! |               | DrivePort          | `embedded-hal` PWM + dir pins  |
//! | `sim`         | LightSensorPort    | simulated arena                |
//! |               | BumperPort         |                                |
//! |               | DrivePort          |                                |
//! | `time`        | ClockPort          | `std::time::Instant`           |
//! | `log_sink`    | EventSink          | `log` facade                   |
//! | `diagnostics` | EventSink          | any DiagnosticPort (stdout)    |
//! |               | DiagnosticPort     |                                |
//! | `console`     | `log::Log`         | stderr                         |

pub mod console;
pub mod diagnostics;
pub mod hardware;
pub mod log_sink;
pub mod sim;
pub mod time;
