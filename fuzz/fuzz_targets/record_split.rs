#![no_main]

use libfuzzer_sys::fuzz_target;
use zosmf_files::files::records::split_record_prefixed;

fuzz_target!(|data: &[u8]| {
    if let Ok(records) = split_record_prefixed(data) {
        let total: usize = records.iter().map(|r| r.len() + 4).sum();
        assert_eq!(total, data.len());
    }
});
