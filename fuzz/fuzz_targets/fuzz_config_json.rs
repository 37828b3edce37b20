//! Fuzz target: `SignalConfig::from_json`
//!
//! Arbitrary override text must never panic, and anything accepted must
//! pass validation.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use crosswalk::config::SignalConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = SignalConfig::from_json(text) {
        assert!(config.validate().is_ok());
    }
});
