use std::io::ErrorKind;

use zosmf_files::profile::{
    Base64Codec, SecretCodec, SecureCredentialResolver, WideQuotedCodec, ZosmfProfile,
};
use zosmf_files::{SecretError, ZosmfError};

mod common;

const SECURE_PROFILE: &str = "host: mf.example.com
port: 10443
user: managed by @zowe/cli
password: managed by @zowe/cli
rejectUnauthorized: true
";

fn plain_resolver() -> SecureCredentialResolver {
    SecureCredentialResolver::without_store()
}

fn resolver_with(codec: impl SecretCodec + Copy + 'static, profile: &str) -> SecureCredentialResolver {
    let store = common::seeded_store(&codec, profile, "IBMUSER", "p@ss:w0rd");
    SecureCredentialResolver::new(Some(Box::new(store)), Box::new(codec))
}

#[test]
fn plaintext_profile_loads_verbatim() {
    let temp = tempfile::tempdir().expect("create temp dir");
    common::write_profile(
        temp.path(),
        "dev",
        "host: mf.example.com\nport: 443\nuser: IBMUSER\npassword: 'sys1 pw'\n",
    );

    let conn = ZosmfProfile::with_profiles_dir("dev", temp.path())
        .load(&plain_resolver())
        .expect("load profile");

    assert_eq!(conn.host(), "mf.example.com:443");
    assert_eq!(conn.user(), "IBMUSER");
    assert_eq!(conn.password(), "sys1 pw");
    assert!(conn.ssl_verification());
}

#[test]
fn secure_profile_resolves_with_base64_store() {
    let temp = tempfile::tempdir().expect("create temp dir");
    common::write_profile(temp.path(), "prod", SECURE_PROFILE);

    let conn = ZosmfProfile::with_profiles_dir("prod", temp.path())
        .load(&resolver_with(Base64Codec, "prod"))
        .expect("load secure profile");

    assert_eq!(conn.host(), "mf.example.com:10443");
    assert_eq!(conn.user(), "IBMUSER");
    assert_eq!(conn.password(), "p@ss:w0rd");
    assert!(!conn.ssl_verification());
}

#[test]
fn secure_profile_resolves_with_wide_quoted_store() {
    let temp = tempfile::tempdir().expect("create temp dir");
    common::write_profile(temp.path(), "prod", SECURE_PROFILE);

    let conn = ZosmfProfile::with_profiles_dir("prod", temp.path())
        .load(&resolver_with(WideQuotedCodec, "prod"))
        .expect("load secure profile");

    assert_eq!(conn.user(), "IBMUSER");
    assert_eq!(conn.password(), "p@ss:w0rd");
}

#[test]
fn secure_entries_of_another_profile_are_not_used() {
    let temp = tempfile::tempdir().expect("create temp dir");
    common::write_profile(temp.path(), "prod", SECURE_PROFILE);

    let err = ZosmfProfile::with_profiles_dir("prod", temp.path())
        .load(&resolver_with(Base64Codec, "test"))
        .unwrap_err();

    match err {
        ZosmfError::SecureProfileLoadFailed { profile, source } => {
            assert_eq!(profile, "prod");
            assert!(matches!(source, SecretError::Missing { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_profile_file_is_not_found() {
    let temp = tempfile::tempdir().expect("create temp dir");

    let err = ZosmfProfile::with_profiles_dir("absent", temp.path())
        .load(&plain_resolver())
        .unwrap_err();

    match err {
        ZosmfError::ProfileRead { path, source } => {
            assert_eq!(path, temp.path().join("absent.yaml"));
            assert_eq!(source.kind(), ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn malformed_yaml_is_parse_error() {
    let temp = tempfile::tempdir().expect("create temp dir");
    common::write_profile(temp.path(), "broken", "host: [unterminated\n");

    let err = ZosmfProfile::with_profiles_dir("broken", temp.path())
        .load(&plain_resolver())
        .unwrap_err();

    assert!(matches!(err, ZosmfError::ProfileParse { .. }));
}

#[test]
fn non_numeric_port_is_parse_error() {
    let temp = tempfile::tempdir().expect("create temp dir");
    common::write_profile(
        temp.path(),
        "dev",
        "host: mf\nport: https\nuser: u\npassword: p\n",
    );

    let err = ZosmfProfile::with_profiles_dir("dev", temp.path())
        .load(&plain_resolver())
        .unwrap_err();

    assert!(matches!(err, ZosmfError::ProfileParse { .. }));
}

#[test]
fn missing_host_is_missing_field() {
    let temp = tempfile::tempdir().expect("create temp dir");
    common::write_profile(temp.path(), "dev", "port: 443\nuser: u\npassword: p\n");

    let err = ZosmfProfile::with_profiles_dir("dev", temp.path())
        .load(&plain_resolver())
        .unwrap_err();

    assert!(matches!(
        err,
        ZosmfError::MissingField { ref profile, field: "host" } if profile == "dev"
    ));
}

#[test]
fn secure_markers_without_store_are_unavailable() {
    let temp = tempfile::tempdir().expect("create temp dir");
    common::write_profile(temp.path(), "prod", SECURE_PROFILE);

    let err = ZosmfProfile::with_profiles_dir("prod", temp.path())
        .load(&plain_resolver())
        .unwrap_err();

    assert!(matches!(
        err,
        ZosmfError::SecureStoreUnavailable { ref profile, .. } if profile == "prod"
    ));
}

#[test]
fn single_secure_marker_is_rejected() {
    let temp = tempfile::tempdir().expect("create temp dir");
    common::write_profile(
        temp.path(),
        "dev",
        "host: mf\nuser: managed by @zowe/cli\npassword: literal\n",
    );

    let err = ZosmfProfile::with_profiles_dir("dev", temp.path())
        .load(&resolver_with(Base64Codec, "dev"))
        .unwrap_err();

    assert!(matches!(
        err,
        ZosmfError::PartialSecureMarker { field: "user", .. }
    ));
}
