//! Connection configuration

use std::time::Duration;

/// Default MySQL port
pub const DEFAULT_PORT: u16 = 3306;

/// Default host when none is given
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default connect timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Connection configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Host address
    pub host: String,
    /// Port number (0 for the driver default)
    pub port: u16,
    /// Username
    pub username: Option<String>,
    /// Password
    pub password: Option<String>,
    /// Upper bound on establishing the connection
    pub connect_timeout: Duration,
}

impl ConnectionConfig {
    /// Create a MySQL configuration for `host:port`
    pub fn new_mysql(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            username: None,
            password: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Builder method: set username, empty strings are treated as unset
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into()).filter(|u: &String| !u.is_empty());
        self
    }

    /// Builder method: set password, empty strings are treated as unset
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into()).filter(|p: &String| !p.is_empty());
        self
    }

    /// Builder method: set connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Port to dial, falling back to the MySQL default
    pub fn get_port(&self) -> u16 {
        if self.port > 0 { self.port } else { DEFAULT_PORT }
    }
}
