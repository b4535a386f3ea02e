use crate::error::ConfigError;
use huddle_core::IceServerConfig;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_STUN_URL: &str = "stun:stun.l.google.com:19302";

/// Placeholder in a TURN url replaced by the host the client used to reach us.
pub const HOST_PLACEHOLDER: &str = "{host}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            username: "admin".to_owned(),
            password: "admin".to_owned(),
        }
    }
}

/// PEM files for serving HTTPS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub ice_servers: Vec<IceServerConfig>,
    pub admin: AdminCredentials,
    /// Bound of the queue between the hub and the session recorder.
    pub recorder_capacity: usize,
    /// How many session rows the analytics view keeps.
    pub recent_sessions: usize,
    /// Bound of the hub command queue.
    pub hub_capacity: usize,
    /// Serve HTTPS when set, plain HTTP otherwise.
    pub tls: Option<TlsPaths>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3030)),
            ice_servers: vec![IceServerConfig::stun(DEFAULT_STUN_URL)],
            admin: AdminCredentials::default(),
            recorder_capacity: 1024,
            recent_sessions: 100,
            hub_capacity: 1024,
            tls: None,
        }
    }
}

impl ServerConfig {
    /// Build a configuration from `HUDDLE_*`, `STUN_URL` and `TURN_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind = parse_or("HUDDLE_BIND", lookup("HUDDLE_BIND"), defaults.bind)?;
        let recorder_capacity = parse_or(
            "HUDDLE_RECORDER_CAPACITY",
            lookup("HUDDLE_RECORDER_CAPACITY"),
            defaults.recorder_capacity,
        )?;
        let recent_sessions = parse_or(
            "HUDDLE_RECENT_SESSIONS",
            lookup("HUDDLE_RECENT_SESSIONS"),
            defaults.recent_sessions,
        )?;

        if recorder_capacity == 0 {
            return Err(ConfigError::Invalid {
                key: "HUDDLE_RECORDER_CAPACITY",
                value: "0".to_owned(),
                reason: "must be at least 1".to_owned(),
            });
        }

        let stun_url = lookup("STUN_URL").unwrap_or_else(|| DEFAULT_STUN_URL.to_owned());
        let mut ice_servers = vec![IceServerConfig::stun(stun_url)];

        if let Some(turn_url) = lookup("TURN_URL") {
            ice_servers.push(IceServerConfig {
                urls: vec![turn_url],
                username: lookup("TURN_USERNAME"),
                credential: lookup("TURN_CREDENTIAL"),
            });
        }

        let admin = AdminCredentials {
            username: lookup("HUDDLE_ADMIN_USERNAME").unwrap_or(defaults.admin.username),
            password: lookup("HUDDLE_ADMIN_PASSWORD").unwrap_or(defaults.admin.password),
        };

        let tls = tls_paths(
            lookup("HUDDLE_TLS_CERT").filter(|v| !v.trim().is_empty()),
            lookup("HUDDLE_TLS_KEY").filter(|v| !v.trim().is_empty()),
        )?;

        Ok(Self {
            bind,
            ice_servers,
            admin,
            recorder_capacity,
            recent_sessions,
            hub_capacity: defaults.hub_capacity,
            tls,
        })
    }

    pub fn is_tls(&self) -> bool {
        self.tls.is_some()
    }

    /// ICE servers as handed to a browser that reached us through `host`.
    pub fn ice_servers_for_host(&self, host: &str) -> Vec<IceServerConfig> {
        self.ice_servers
            .iter()
            .cloned()
            .map(|mut server| {
                for url in server.urls.iter_mut() {
                    if url.contains(HOST_PLACEHOLDER) {
                        *url = url.replace(HOST_PLACEHOLDER, host);
                    }
                }
                server
            })
            .collect()
    }
}

/// Certificate and key come as a pair; one without the other is an error.
pub fn tls_paths(cert: Option<String>, key: Option<String>) -> Result<Option<TlsPaths>, ConfigError> {
    match (cert, key) {
        (None, None) => Ok(None),
        (Some(cert), Some(key)) => Ok(Some(TlsPaths {
            cert: PathBuf::from(cert),
            key: PathBuf::from(key),
        })),
        (Some(cert), None) => Err(ConfigError::Invalid {
            key: "HUDDLE_TLS_KEY",
            value: String::new(),
            reason: format!("required because HUDDLE_TLS_CERT is set to {:?}", cert),
        }),
        (None, Some(key)) => Err(ConfigError::Invalid {
            key: "HUDDLE_TLS_CERT",
            value: String::new(),
            reason: format!("required because HUDDLE_TLS_KEY is set to {:?}", key),
        }),
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}
