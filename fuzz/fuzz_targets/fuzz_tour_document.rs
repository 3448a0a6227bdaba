#![no_main]

use libfuzzer_sys::fuzz_target;
use wt_runtime::{Options, TourDocument};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Parsers must reject, never panic.
    let _ = Options::from_json_str(text);
    let _ = Options::from_toml_str(text);
    if let Ok(doc) = TourDocument::from_json_str(text) {
        let _config: wt_runtime::TourConfig<u32> = doc.into_config();
    }
});
