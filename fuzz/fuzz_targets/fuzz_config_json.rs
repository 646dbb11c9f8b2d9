//! Fuzz target: JSON calibration overrides
//!
//! Parses arbitrary bytes as a `RoachConfig` override and validates it.
//! Any config that passes validation must build a service and report
//! telemetry without panicking.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use roach::app::service::RoachService;
use roach::config::RoachConfig;
use roach::random;

fuzz_target!(|data: &[u8]| {
    let Ok(config) = serde_json::from_slice::<RoachConfig>(data) else {
        return;
    };
    if config.validate().is_err() {
        return;
    }
    let seed = config.direction_seed;
    let app = RoachService::new(config, random::from_seed(seed));
    assert_eq!(app.tick_count(), 0);
    let _ = app.build_telemetry();
});
