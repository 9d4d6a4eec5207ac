//! Resolution of profile credentials held in a secure credential store.

use crate::error::{SecretError, ZosmfError};

use super::codec::{default_codec, SecretCodec};
use super::store::SecureStore;

/// Prefix marking a profile value whose real content lives in the secure store.
pub const SECURE_VALUE_PREFIX: &str = "managed by";

/// Service namespace Zowe CLI uses for its credential entries.
pub const CREDENTIAL_SERVICE: &str = "@zowe/cli";

/// Returns true if `value` is a secure store placeholder.
pub fn is_secure_placeholder(value: &str) -> bool {
    value.starts_with(SECURE_VALUE_PREFIX)
}

/// Account name under which a profile field is stored.
pub fn account_name(profile_name: &str, field: &str) -> String {
    format!("zosmf_{}_{}", profile_name, field)
}

/// Looks up and decodes the user/password pair of a secure profile.
///
/// The store is optional: a resolver built without one fails every lookup
/// with [`ZosmfError::SecureStoreUnavailable`].
pub struct SecureCredentialResolver {
    store: Option<Box<dyn SecureStore>>,
    codec: Box<dyn SecretCodec>,
}

impl SecureCredentialResolver {
    pub fn new(store: Option<Box<dyn SecureStore>>, codec: Box<dyn SecretCodec>) -> Self {
        Self { store, codec }
    }

    /// Resolver for the current host: the OS keychain when the `secure-store`
    /// feature is enabled, and the platform's secret codec.
    pub fn from_environment() -> Self {
        Self::new(platform_store(), default_codec())
    }

    /// Resolver without a secure store, for plaintext-only profiles.
    pub fn without_store() -> Self {
        Self::new(None, default_codec())
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    /// Returns `(user, password)` for `profile_name`. Either both resolve or
    /// the call fails.
    pub fn resolve(&self, profile_name: &str) -> Result<(String, String), ZosmfError> {
        let store = self
            .store
            .as_deref()
            .ok_or_else(|| ZosmfError::SecureStoreUnavailable {
                profile: profile_name.to_string(),
                reason: "no secure credential store is configured".to_string(),
            })?;

        let lookup = |field: &str| {
            self.secure_value(store, profile_name, field)
                .map_err(|source| ZosmfError::SecureProfileLoadFailed {
                    profile: profile_name.to_string(),
                    source,
                })
        };

        let user = lookup("user")?;
        let password = lookup("password")?;
        tracing::debug!(profile = profile_name, "resolved secure credentials");
        Ok((user, password))
    }

    fn secure_value(
        &self,
        store: &dyn SecureStore,
        profile_name: &str,
        field: &str,
    ) -> Result<String, SecretError> {
        let account = account_name(profile_name, field);
        let service = format!("{}/{}", CREDENTIAL_SERVICE, account);
        let raw = store
            .get_secret(&service, &account)?
            .ok_or(SecretError::Missing { account })?;
        self.codec.decode(&raw)
    }
}

#[cfg(feature = "secure-store")]
fn platform_store() -> Option<Box<dyn SecureStore>> {
    Some(Box::new(super::store::KeyringStore))
}

#[cfg(not(feature = "secure-store"))]
fn platform_store() -> Option<Box<dyn SecureStore>> {
    None
}
