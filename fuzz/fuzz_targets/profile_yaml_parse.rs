//! Fuzz target for z/OSMF profile documents.
//!
//! Feeds arbitrary UTF-8 text through YAML parsing and plaintext
//! credential resolution, checking for panics or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use zosmf_files::profile::fuzz_resolve_profile;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = fuzz_resolve_profile(text);
});
