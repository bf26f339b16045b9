//! Compatibility matrix

use thiserror::Error;

/// Interpreter versions the documented release supports
pub const SUPPORTED_RUNTIMES: [&str; 3] = ["2.7", "3.3", "3.4"];

/// Server `major.minor` versions the documented release supports
pub const SUPPORTED_SERVER_VERSIONS: [(u32, u32); 6] =
    [(1, 8), (1, 9), (2, 0), (2, 1), (2, 2), (2, 3)];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid server version: {0:?}")]
    Invalid(String),
}

/// A server version such as `2.2.5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServerVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
}

impl ServerVersion {
    /// Parse `major.minor[.patch]`, ignoring a leading product name such as
    /// `Neo4j/` and any pre-release suffix after `-`
    ///
    /// # Errors
    /// Returns [`VersionError::Invalid`] unless major and minor are numbers.
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let invalid = || VersionError::Invalid(text.to_string());
        let version = text.trim().rsplit('/').next().unwrap_or_default();
        let version = version.split('-').next().unwrap_or_default();

        let mut parts = version.split('.');
        let mut next = || {
            parts
                .next()
                .map(|part| part.parse::<u32>().map_err(|_| invalid()))
        };
        let major = next().ok_or_else(invalid)??;
        let minor = next().ok_or_else(invalid)??;
        let patch = next().transpose()?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self {
            major,
            minor,
            patch,
        })
    }

    /// Whether `major.minor` is in the compatibility matrix
    #[must_use]
    pub fn is_supported(&self) -> bool {
        SUPPORTED_SERVER_VERSIONS.contains(&(self.major, self.minor))
    }
}

impl std::fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(patch) = self.patch {
            write!(f, ".{patch}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for ServerVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
