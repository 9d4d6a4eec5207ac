//! Secret codecs: how a secure value is laid out inside the credential store.
//!
//! Zowe CLI stores each secure field as the base64 form of its JSON-quoted
//! value. On Windows the credential blob is handed back as UTF-16 text, so the
//! raw string has to be re-encoded to bytes before base64 decoding and the
//! JSON quotes stripped afterwards. Elsewhere the stored text is plain base64.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::SecretError;

/// Encodes and decodes secure values for one platform layout.
pub trait SecretCodec: Send + Sync {
    /// Decodes a raw value read from the credential store to plaintext.
    fn decode(&self, raw: &str) -> Result<String, SecretError>;

    /// Encodes plaintext the way the credential store would hold it.
    ///
    /// `decode(&encode(s))` returns `s` for every string.
    fn encode(&self, plain: &str) -> String;
}

/// Plain base64 layout used on macOS and Linux.
#[derive(Clone, Copy, Debug, Default)]
pub struct Base64Codec;

impl SecretCodec for Base64Codec {
    fn decode(&self, raw: &str) -> Result<String, SecretError> {
        let bytes = STANDARD.decode(raw.trim())?;
        Ok(String::from_utf8(bytes)?)
    }

    fn encode(&self, plain: &str) -> String {
        STANDARD.encode(plain)
    }
}

/// Windows layout: UTF-16 wrapped base64 of a double-quoted value.
#[derive(Clone, Copy, Debug, Default)]
pub struct WideQuotedCodec;

impl SecretCodec for WideQuotedCodec {
    fn decode(&self, raw: &str) -> Result<String, SecretError> {
        // Bytes outside the base64 alphabet (NUL padding, stray BOMs) are
        // dropped, matching lenient base64 decoders.
        let narrow: Vec<u8> = raw
            .encode_utf16()
            .flat_map(u16::to_le_bytes)
            .filter(|b| is_base64_byte(*b))
            .collect();
        let bytes = STANDARD.decode(narrow)?;
        let text = String::from_utf8(bytes)?;
        match text
            .strip_prefix('"')
            .and_then(|inner| inner.strip_suffix('"'))
        {
            Some(inner) => Ok(inner.to_string()),
            None => Ok(text),
        }
    }

    fn encode(&self, plain: &str) -> String {
        // Padded base64 always has an even length.
        let bytes = STANDARD.encode(format!("\"{}\"", plain)).into_bytes();
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        // Base64 bytes are ASCII, so every unit is below the surrogate range.
        String::from_utf16_lossy(&units)
    }
}

fn is_base64_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'='
}

/// Returns the codec matching the credential layout of the host platform.
pub fn default_codec() -> Box<dyn SecretCodec> {
    if cfg!(windows) {
        Box::new(WideQuotedCodec)
    } else {
        Box::new(Base64Codec)
    }
}
