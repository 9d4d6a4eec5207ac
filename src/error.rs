use std::path::PathBuf;
use thiserror::Error;

/// The main error type for z/OSMF profile and file operations.
#[derive(Debug, Error)]
pub enum ZosmfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read profile file {path}: {source}")]
    ProfileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse profile YAML from {path}: {source}")]
    ProfileParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Profile '{profile}' is missing required field '{field}'")]
    MissingField { profile: String, field: &'static str },

    #[error(
        "Profile '{profile}' marks only '{field}' as a secure value; user and password must both be secure or both be plain"
    )]
    PartialSecureMarker { profile: String, field: &'static str },

    #[error("Secure credentials for profile '{profile}' are unavailable: {reason}")]
    SecureStoreUnavailable { profile: String, reason: String },

    #[error("Failed to load secure profile '{profile}': {source}")]
    SecureProfileLoadFailed {
        profile: String,
        #[source]
        source: SecretError,
    },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Invalid request URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("HTTP {method} {url} failed: {source}")]
    Http {
        method: &'static str,
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("HTTP {method} {url} returned status {status} (expected {expected:?}): {body}")]
    UnexpectedStatus {
        method: &'static str,
        url: String,
        expected: Vec<u16>,
        status: u16,
        body: String,
    },

    #[error("Failed to encode request body for {url}: {source}")]
    RequestEncode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to decode response from {url}: {source}")]
    ResponseDecode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Record at offset {offset} is truncated: prefix declares {declared} byte(s), {available} remain")]
    TruncatedRecord {
        offset: usize,
        declared: usize,
        available: usize,
    },
}

/// Failures while reading or decoding a single secure value.
///
/// A missing entry and a malformed entry are reported through the same type so
/// callers see one failure class for the whole secure lookup.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("no secure value stored for account '{account}'")]
    Missing { account: String },

    #[error("secure store lookup for account '{account}' failed: {message}")]
    Store { account: String, message: String },

    #[error("secure value is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("secure value is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
