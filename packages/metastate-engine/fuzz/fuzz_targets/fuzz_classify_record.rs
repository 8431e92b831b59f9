#![no_main]

use libfuzzer_sys::fuzz_target;
use metastate_engine::config::{EngineConfig, ParallelConfig};
use metastate_engine::{CoreField, MetadataEngine};
use std::sync::OnceLock;

static ENGINE: OnceLock<Option<MetadataEngine>> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let Some(engine) = ENGINE
        .get_or_init(|| {
            EngineConfig::builtin()
                .with_parallel(ParallelConfig::sequential())
                .build()
                .ok()
        })
        .as_ref()
    else {
        return;
    };

    if let Ok(record) = serde_json::from_slice::<serde_json::Value>(data) {
        let matrix = engine.classify_core(std::slice::from_ref(&record));
        assert_eq!(matrix.len(), CoreField::ALL.len());
        let _ = engine.explain(&record, 0);
    }
});
