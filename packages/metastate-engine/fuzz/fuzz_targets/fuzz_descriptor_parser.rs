#![no_main]

use libfuzzer_sys::fuzz_target;
use metastate_engine::TypeDescriptor;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Whatever parses must print back to an equal descriptor
        if let Ok(descriptor) = text.parse::<TypeDescriptor>() {
            let printed = descriptor.to_string();
            assert_eq!(printed.parse::<TypeDescriptor>().ok(), Some(descriptor));
        }
    }
});
