//! Secure credential store backends.

use std::collections::HashMap;

use crate::error::SecretError;

/// Keyed lookup into an OS-level secure credential store.
///
/// Some backends address secrets by a service/account pair, so both are
/// passed. `Ok(None)` means no entry exists.
pub trait SecureStore: Send + Sync {
    fn get_secret(&self, service: &str, account: &str) -> Result<Option<String>, SecretError>;
}

/// In-memory store, for hosts that seed credentials themselves and for tests.
#[derive(Clone, Debug, Default)]
pub struct MemorySecureStore {
    entries: HashMap<(String, String), String>,
}

impl MemorySecureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `secret` under the `(service, account)` pair, replacing any
    /// previous value.
    pub fn insert(
        &mut self,
        service: impl Into<String>,
        account: impl Into<String>,
        secret: impl Into<String>,
    ) {
        self.entries
            .insert((service.into(), account.into()), secret.into());
    }
}

impl SecureStore for MemorySecureStore {
    fn get_secret(&self, service: &str, account: &str) -> Result<Option<String>, SecretError> {
        Ok(self
            .entries
            .get(&(service.to_string(), account.to_string()))
            .cloned())
    }
}

/// Store backed by the platform keychain through the `keyring` crate
/// (Windows Credential Manager, macOS Keychain, the kernel keyring on Linux).
#[cfg(feature = "secure-store")]
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyringStore;

#[cfg(feature = "secure-store")]
impl SecureStore for KeyringStore {
    fn get_secret(&self, service: &str, account: &str) -> Result<Option<String>, SecretError> {
        let store_error = |source: keyring::Error| SecretError::Store {
            account: account.to_string(),
            message: source.to_string(),
        };

        let entry = keyring::Entry::new(service, account).map_err(store_error)?;
        match entry.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(source) => Err(store_error(source)),
        }
    }
}
