//! Configuration loader - connection string from the environment
//!
//! The only setting is `DATABASE_URL`, optionally hydrated from a local
//! `.env` file. Loading happens once at process start, before any command
//! runs; a missing or empty value is fatal. Nothing here validates the
//! string itself; a malformed one surfaces later as a connection error.

use crate::{Error, Result};

/// Environment variable holding the database connection string.
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";

/// Process configuration, constructed in `main` and passed down to
/// whichever command needs database access.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
}

impl Settings {
    /// Load settings from the process environment, hydrating it from a
    /// `.env` file first when one exists (a missing file is not an error).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(std::env::var(ENV_DATABASE_URL).ok())
    }

    /// Separated from `from_env` so tests never have to mutate the
    /// process environment.
    fn from_lookup(value: Option<String>) -> Result<Self> {
        match value {
            Some(url) if !url.trim().is_empty() => Ok(Self { database_url: url }),
            _ => Err(Error::Configuration {
                name: ENV_DATABASE_URL,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lookup_accepts_value() {
        let settings = Settings::from_lookup(Some("sqlite://chunks.db".to_string())).unwrap();
        assert_eq!(settings.database_url, "sqlite://chunks.db");
    }

    #[test]
    fn test_from_lookup_rejects_unset() {
        assert!(matches!(
            Settings::from_lookup(None),
            Err(Error::Configuration { name: ENV_DATABASE_URL })
        ));
    }

    #[test]
    fn test_from_lookup_rejects_empty_and_blank() {
        assert!(Settings::from_lookup(Some(String::new())).is_err());
        assert!(Settings::from_lookup(Some("   ".to_string())).is_err());
    }
}
