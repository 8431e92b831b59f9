#![no_main]

use libfuzzer_sys::fuzz_target;
use metastate_engine::config::EngineConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml) = std::str::from_utf8(data) {
        // Loading and building must fail with an error, never panic
        if let Ok(config) = EngineConfig::from_yaml_str(yaml) {
            let _ = config.with_parallel(Default::default()).build();
        }
    }
});
