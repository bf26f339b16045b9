//! Driver configuration

use std::collections::BTreeMap;

use crate::packstream::PackValue;

pub const DEFAULT_USER_AGENT: &str = concat!("neolink/", env!("CARGO_PKG_VERSION"));

/// Environment variable that overrides [`DriverConfig::secure`]
pub const SECURE_ENV_VAR: &str = "NEO4J_SECURE";

/// Credentials sent with INIT
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub scheme: String,
    pub principal: String,
    pub credentials: String,
}

impl AuthToken {
    #[must_use]
    pub fn basic(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            scheme: "basic".to_string(),
            principal: user.into(),
            credentials: password.into(),
        }
    }

    pub(crate) fn to_pack_value(&self) -> PackValue {
        let mut map = BTreeMap::new();
        map.insert("scheme".to_string(), PackValue::from(self.scheme.as_str()));
        map.insert(
            "principal".to_string(),
            PackValue::from(self.principal.as_str()),
        );
        map.insert(
            "credentials".to_string(),
            PackValue::from(self.credentials.as_str()),
        );
        PackValue::Map(map)
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("scheme", &self.scheme)
            .field("principal", &self.principal)
            .field("credentials", &"***")
            .finish()
    }
}

/// Configuration for a driver and the sessions it opens
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub uri: String,
    pub user_agent: String,
    pub auth: Option<AuthToken>,
    pub secure: bool,
    /// Record per-statement timings on each session
    pub bench: bool,
}

impl DriverConfig {
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            auth: None,
            secure: false,
            bench: false,
        }
    }

    #[must_use]
    pub fn with_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some(AuthToken::basic(user, password));
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    #[must_use]
    pub fn with_bench(mut self, bench: bool) -> Self {
        self.bench = bench;
        self
    }

    /// Whether to secure the connection, letting `NEO4J_SECURE` win when set
    #[must_use]
    pub fn resolve_secure(&self) -> bool {
        match std::env::var(SECURE_ENV_VAR) {
            Ok(value) => !matches!(value.trim().to_ascii_lowercase().as_str(), "" | "0" | "false"),
            Err(_) => self.secure,
        }
    }
}
