//! Zowe z/OSMF profile loading.
//!
//! A profile is a YAML document at
//! `<zowe home>/profiles/zosmf/<name>.yaml`. The Zowe home directory is
//! `$ZOWE_CLI_HOME` when set, otherwise `~/.zowe`. Credentials are either
//! stored inline or replaced by a placeholder starting with
//! [`SECURE_VALUE_PREFIX`], in which case both user and password are fetched
//! from the secure credential store through a [`SecureCredentialResolver`].
//!
//! ```no_run
//! use zosmf_files::profile::{SecureCredentialResolver, ZosmfProfile};
//!
//! let connection = ZosmfProfile::new("dev")
//!     .load(&SecureCredentialResolver::from_environment())?;
//! println!("{}", connection.host());
//! # Ok::<(), zosmf_files::ZosmfError>(())
//! ```

mod codec;
mod secure;
mod store;

pub use codec::{default_codec, Base64Codec, SecretCodec, WideQuotedCodec};
pub use secure::{
    account_name, is_secure_placeholder, SecureCredentialResolver, CREDENTIAL_SERVICE,
    SECURE_VALUE_PREFIX,
};
#[cfg(feature = "secure-store")]
pub use store::KeyringStore;
pub use store::{MemorySecureStore, SecureStore};

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::connection::ZosmfConnection;
use crate::error::ZosmfError;

/// Environment variable overriding the Zowe home directory.
pub const ZOWE_HOME_ENV: &str = "ZOWE_CLI_HOME";

/// Fields recognized in a z/OSMF profile document. Other keys are ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ProfileDocument {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "rejectUnauthorized")]
    pub reject_unauthorized: Option<bool>,
}

/// Parses the YAML text of a profile document.
///
/// Useful for fuzzing and for tests that do not touch the file system.
pub fn parse_profile_document(text: &str) -> Result<ProfileDocument, serde_yaml::Error> {
    serde_yaml::from_str(text)
}

/// Fuzz-only entrypoint for parsing and resolving a profile document
/// without a secure store.
#[cfg(feature = "fuzzing")]
pub fn fuzz_resolve_profile(text: &str) -> Result<(), ZosmfError> {
    let Ok(document) = parse_profile_document(text) else {
        return Ok(());
    };
    let profile = ZosmfProfile::with_profiles_dir("fuzz", "<fuzz>");
    let _ = profile.resolve(document, &SecureCredentialResolver::without_store())?;
    Ok(())
}

/// Directory holding z/OSMF profiles for the current user, if a home
/// directory can be determined.
pub fn default_profiles_dir() -> Option<PathBuf> {
    let zowe_home = match std::env::var_os(ZOWE_HOME_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()?.join(".zowe"),
    };
    Some(zowe_home.join("profiles").join("zosmf"))
}

/// A named z/OSMF profile.
#[derive(Clone, Debug)]
pub struct ZosmfProfile {
    name: String,
    profiles_dir: PathBuf,
}

impl ZosmfProfile {
    /// Profile `name` in the default per-user profiles directory.
    pub fn new(name: impl Into<String>) -> Self {
        let profiles_dir = default_profiles_dir().unwrap_or_else(|| PathBuf::from(".zowe/profiles/zosmf"));
        Self::with_profiles_dir(name, profiles_dir)
    }

    /// Profile `name` looked up in an explicit directory.
    pub fn with_profiles_dir(name: impl Into<String>, profiles_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            profiles_dir: profiles_dir.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn profiles_dir(&self) -> &Path {
        &self.profiles_dir
    }

    /// Path of the profile document.
    pub fn path(&self) -> PathBuf {
        self.profiles_dir.join(format!("{}.yaml", self.name))
    }

    /// Loads the profile and resolves it into a connection descriptor.
    ///
    /// # Errors
    /// - [`ZosmfError::ProfileRead`] if the document cannot be read
    /// - [`ZosmfError::ProfileParse`] if it is not valid YAML
    /// - [`ZosmfError::MissingField`] if `host`, `user` or `password` is absent
    /// - [`ZosmfError::PartialSecureMarker`] if only one credential is a
    ///   secure placeholder
    /// - resolver errors when both credentials are secure placeholders
    pub fn load(&self, resolver: &SecureCredentialResolver) -> Result<ZosmfConnection, ZosmfError> {
        if self.name.is_empty() {
            return Err(ZosmfError::MissingField {
                profile: String::new(),
                field: "profile name",
            });
        }

        let path = self.path();
        let text = fs::read_to_string(&path).map_err(|source| ZosmfError::ProfileRead {
            path: path.clone(),
            source,
        })?;
        let document = parse_profile_document(&text).map_err(|source| ZosmfError::ProfileParse {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(profile = %self.name, path = %path.display(), "loaded profile document");
        self.resolve(document, resolver)
    }

    /// Turns an already parsed document into a connection descriptor.
    pub fn resolve(
        &self,
        document: ProfileDocument,
        resolver: &SecureCredentialResolver,
    ) -> Result<ZosmfConnection, ZosmfError> {
        let host = document.host.ok_or_else(|| self.missing("host"))?;
        let host = match document.port {
            Some(port) => format!("{}:{}", host, port),
            None => host,
        };

        let user = document.user.ok_or_else(|| self.missing("user"))?;
        let password = document.password.ok_or_else(|| self.missing("password"))?;

        let (user, password) = match (is_secure_placeholder(&user), is_secure_placeholder(&password)) {
            (true, true) => {
                tracing::debug!(profile = %self.name, "credentials deferred to secure store");
                resolver.resolve(&self.name)?
            }
            (true, false) => return Err(self.partial_marker("user")),
            (false, true) => return Err(self.partial_marker("password")),
            (false, false) => (user, password),
        };

        let ssl_verification = document.reject_unauthorized.map_or(true, |reject| !reject);

        Ok(ZosmfConnection::new(host, user, password, ssl_verification))
    }

    fn missing(&self, field: &'static str) -> ZosmfError {
        ZosmfError::MissingField {
            profile: self.name.clone(),
            field,
        }
    }

    fn partial_marker(&self, field: &'static str) -> ZosmfError {
        ZosmfError::PartialSecureMarker {
            profile: self.name.clone(),
            field,
        }
    }
}
