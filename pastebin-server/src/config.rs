//! Runtime settings resolved from environment variables
//!
//! - `PORT` is required; startup fails before binding when it is absent.
//! - The active connection target is the fixed local database. The
//!   `DATABASE_URL` target is opt-in, with TLS controlled by `LOCAL`.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::http::ServerConfig;

pub const LOCAL_HOST: &str = "localhost";
pub const LOCAL_PORT: u16 = 5432;
pub const LOCAL_USER: &str = "academy";
pub const LOCAL_DATABASE: &str = "pastebin";

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing PORT environment variable. Set it in .env file.")]
    MissingPort,

    #[error("invalid PORT value '{0}'")]
    InvalidPort(String),

    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,

    #[error("invalid DATABASE_URL: {0}")]
    InvalidDatabaseUrl(#[source] sqlx::Error),
}

/// Where the shared connection points.
#[derive(Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    /// Fixed local credentials, no TLS.
    Local,
    /// Connection string from `DATABASE_URL`.
    Url { url: String, tls: bool },
}

impl ConnectionTarget {
    /// Build driver options for this target.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        match self {
            Self::Local => Ok(PgConnectOptions::new()
                .host(LOCAL_HOST)
                .port(LOCAL_PORT)
                .username(LOCAL_USER)
                .password("")
                .database(LOCAL_DATABASE)
                .ssl_mode(PgSslMode::Disable)),
            Self::Url { url, tls } => {
                let options =
                    PgConnectOptions::from_str(url).map_err(ConfigError::InvalidDatabaseUrl)?;
                // Hosted databases get TLS without certificate verification.
                let mode = if *tls {
                    PgSslMode::Require
                } else {
                    PgSslMode::Disable
                };
                Ok(options.ssl_mode(mode))
            }
        }
    }
}

// Debug and Display never print the connection string: it may carry a password.
impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(
                f,
                "{}@{}:{}/{}",
                LOCAL_USER, LOCAL_HOST, LOCAL_PORT, LOCAL_DATABASE
            ),
            Self::Url { tls, .. } => write!(
                f,
                "DATABASE_URL (tls {})",
                if *tls { "required" } else { "disabled" }
            ),
        }
    }
}

impl fmt::Debug for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConnectionTarget({})", self)
    }
}

/// Settings for one server process
#[derive(Debug, Clone)]
pub struct Settings {
    /// Port to listen on (`PORT`)
    pub port: u16,

    /// Interface to bind (all interfaces)
    pub host: IpAddr,

    /// Connection string for the alternate target (`DATABASE_URL`)
    pub database_url: Option<String>,

    /// `LOCAL` present and non-empty: no TLS on the alternate target
    pub local: bool,

    /// Use `DATABASE_URL` instead of the fixed local database
    pub use_database_url: bool,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through a variable lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_port = lookup("PORT")
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingPort)?;
        let port = raw_port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(raw_port.clone()))?;

        Ok(Self {
            port,
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            database_url: lookup("DATABASE_URL").filter(|value| !value.is_empty()),
            local: lookup("LOCAL").is_some_and(|value| !value.is_empty()),
            use_database_url: false,
        })
    }

    /// Select the `DATABASE_URL` target instead of the local one.
    pub fn with_database_url_target(mut self, enabled: bool) -> Self {
        self.use_database_url = enabled;
        self
    }

    /// Resolve the connection target.
    pub fn connection_target(&self) -> Result<ConnectionTarget, ConfigError> {
        if !self.use_database_url {
            return Ok(ConnectionTarget::Local);
        }

        let url = self
            .database_url
            .clone()
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        Ok(ConnectionTarget::Url {
            url,
            tls: !self.local,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind_addr(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn missing_port_is_fatal() {
        let err = settings(&[("DATABASE_URL", "postgres://db/x")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingPort));
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn empty_port_is_missing() {
        let err = settings(&[("PORT", "")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingPort));
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let err = settings(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(ref v) if v == "eighty"));
    }

    #[test]
    fn binds_all_interfaces() {
        let settings = settings(&[("PORT", "4000")]).unwrap();
        assert_eq!(settings.bind_addr().port(), 4000);
        assert!(settings.bind_addr().ip().is_unspecified());
        assert_eq!(settings.server_config().bind_addr, settings.bind_addr());
    }

    #[test]
    fn local_target_is_default_even_with_database_url() {
        let settings = settings(&[("PORT", "4000"), ("DATABASE_URL", "postgres://db/x")]).unwrap();
        assert_eq!(settings.connection_target().unwrap(), ConnectionTarget::Local);
    }

    #[test]
    fn local_target_uses_fixed_credentials() {
        let options = ConnectionTarget::Local.connect_options().unwrap();
        assert_eq!(options.get_host(), LOCAL_HOST);
        assert_eq!(options.get_port(), LOCAL_PORT);
        assert_eq!(options.get_username(), LOCAL_USER);
        assert_eq!(options.get_database(), Some(LOCAL_DATABASE));
    }

    #[test]
    fn url_target_requires_tls_unless_local() {
        let remote = settings(&[("PORT", "1"), ("DATABASE_URL", "postgres://u:p@db/x")])
            .unwrap()
            .with_database_url_target(true);
        assert!(matches!(
            remote.connection_target().unwrap(),
            ConnectionTarget::Url { tls: true, .. }
        ));

        let local = settings(&[
            ("PORT", "1"),
            ("DATABASE_URL", "postgres://u:p@db/x"),
            ("LOCAL", "1"),
        ])
        .unwrap()
        .with_database_url_target(true);
        assert!(matches!(
            local.connection_target().unwrap(),
            ConnectionTarget::Url { tls: false, .. }
        ));
    }

    #[test]
    fn empty_local_does_not_disable_tls() {
        let settings = settings(&[("PORT", "1"), ("LOCAL", "")]).unwrap();
        assert!(!settings.local);
    }

    #[test]
    fn url_target_without_url_fails() {
        let settings = settings(&[("PORT", "1")])
            .unwrap()
            .with_database_url_target(true);
        assert!(matches!(
            settings.connection_target(),
            Err(ConfigError::MissingDatabaseUrl)
        ));
    }

    #[test]
    fn url_target_applies_ssl_mode() {
        let target = ConnectionTarget::Url {
            url: "postgres://u:p@db.example.com:6543/posts".into(),
            tls: false,
        };
        let options = target.connect_options().unwrap();
        assert_eq!(options.get_host(), "db.example.com");
        assert_eq!(options.get_port(), 6543);
        assert!(matches!(options.get_ssl_mode(), PgSslMode::Disable));
    }

    #[test]
    fn display_hides_connection_string() {
        let target = ConnectionTarget::Url {
            url: "postgres://u:secret@db/x".into(),
            tls: true,
        };
        assert!(!target.to_string().contains("secret"));
        assert!(!format!("{:?}", target).contains("secret"));
        assert_eq!(ConnectionTarget::Local.to_string(), "academy@localhost:5432/pastebin");
    }
}
