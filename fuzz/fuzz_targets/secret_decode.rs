//! Fuzz target for decoding secure-store values with both codecs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use zosmf_files::profile::{Base64Codec, SecretCodec, WideQuotedCodec};

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    let _ = Base64Codec.decode(raw);
    let _ = WideQuotedCodec.decode(raw);
});
