//! The resolved connection descriptor handed from profile loading to the
//! files client.

use std::fmt;

/// Resolved, immutable connection details for one z/OSMF instance.
///
/// Built once per profile load and never mutated afterwards. The password is
/// kept out of `Debug` output so descriptors can be logged safely.
#[derive(Clone, PartialEq, Eq)]
pub struct ZosmfConnection {
    host: String,
    user: String,
    password: String,
    ssl_verification: bool,
}

impl ZosmfConnection {
    /// Creates a connection descriptor.
    ///
    /// `host` may carry a `:port` suffix and, optionally, an explicit
    /// `http://` or `https://` scheme.
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        ssl_verification: bool,
    ) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            password: password.into(),
            ssl_verification,
        }
    }

    /// Host with optional `:port`, exactly as assembled from the profile.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Whether the server certificate is verified.
    pub fn ssl_verification(&self) -> bool {
        self.ssl_verification
    }

    /// Base URL of the server. Hosts without a scheme default to HTTPS.
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        }
    }
}

impl fmt::Debug for ZosmfConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZosmfConnection")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("ssl_verification", &self.ssl_verification)
            .finish()
    }
}

impl fmt::Display for ZosmfConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "host:             {}", self.host)?;
        writeln!(f, "user:             {}", self.user)?;
        writeln!(f, "password:         ********")?;
        write!(f, "ssl verification: {}", self.ssl_verification)
    }
}
