//! Configuration types for the IndexAdapter and its OpenSearch connection.

use std::env;
use std::fmt;
use std::path::PathBuf;

use tracing::warn;

/// Default port used when a host does not carry one.
pub const DEFAULT_PORT: u16 = 9200;

/// Default host when none is configured.
pub const DEFAULT_HOST: &str = "localhost";

/// Default number of actions sent per bulk request.
pub const DEFAULT_BULK_CHUNK_SIZE: usize = 500;

/// Configuration for the IndexAdapter.
///
/// Bulk loads are chunked by the provider, so by default any number of rows
/// may be submitted at once. Set `max_batch_size` to reject oversized
/// datasets before any work is done.
#[derive(Debug, Clone, Default)]
pub struct AdapterConfig {
    /// Maximum number of rows allowed in a single bulk call.
    ///
    /// `None` means unlimited.
    pub max_batch_size: Option<usize>,
}

impl AdapterConfig {
    /// Create a config with no batch size limit.
    pub fn unlimited() -> Self {
        Self {
            max_batch_size: None,
        }
    }

    /// Create a config with a custom batch size limit.
    ///
    /// # Arguments
    ///
    /// * `max_batch_size` - Maximum number of rows allowed in a single bulk call
    pub fn with_max_batch_size(max_batch_size: usize) -> Self {
        Self {
            max_batch_size: Some(max_batch_size),
        }
    }
}

/// Connection settings for the search cluster.
///
/// Without a username the connection is plain `http` and certificates are
/// not checked. With a username it is `https` with basic auth, and
/// certificates are validated against `ca_cert_path` when given.
#[derive(Clone)]
pub struct ConnectionConfig {
    /// Cluster hosts. Only the first one is connected to.
    pub hosts: Vec<String>,
    pub username: Option<String>,
    pub passkey: Option<String>,
    /// Port appended to hosts that do not carry one.
    pub port: u16,
    /// PEM file with the CA certificate of the cluster.
    pub ca_cert_path: Option<PathBuf>,
    /// Number of actions per bulk request.
    pub bulk_chunk_size: usize,
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("hosts", &self.hosts)
            .field("username", &self.username)
            .field("passkey", &self.passkey.as_ref().map(|_| "<redacted>"))
            .field("port", &self.port)
            .field("ca_cert_path", &self.ca_cert_path)
            .field("bulk_chunk_size", &self.bulk_chunk_size)
            .finish()
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            hosts: vec![DEFAULT_HOST.to_string()],
            username: None,
            passkey: None,
            port: DEFAULT_PORT,
            ca_cert_path: None,
            bulk_chunk_size: DEFAULT_BULK_CHUNK_SIZE,
        }
    }
}

impl ConnectionConfig {
    /// Create an unauthenticated config for the given hosts.
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hosts: hosts.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set basic auth credentials.
    pub fn with_credentials(mut self, username: impl Into<String>, passkey: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.passkey = Some(passkey.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_ca_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_cert_path = Some(path.into());
        self
    }

    pub fn with_bulk_chunk_size(mut self, bulk_chunk_size: usize) -> Self {
        self.bulk_chunk_size = bulk_chunk_size;
        self
    }

    /// Whether requests are authenticated (and therefore sent over https).
    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    /// Load the config from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `INDEX_HOSTS`: Comma-separated hosts (default: localhost)
    /// - `INDEX_USERNAME`: Basic auth username (default: none, plain http)
    /// - `INDEX_PASSKEY`: Basic auth password
    /// - `INDEX_PORT`: Port for hosts without one (default: 9200)
    /// - `INDEX_CA_CERT_PATH`: PEM file with the cluster CA certificate
    /// - `INDEX_BULK_CHUNK_SIZE`: Actions per bulk request (default: 500)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load the config through an arbitrary key lookup.
    ///
    /// Invalid numeric values fall back to their defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let hosts: Vec<String> = non_empty("INDEX_HOSTS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|h| !h.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .filter(|hosts: &Vec<String>| !hosts.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_HOST.to_string()]);

        let port = match non_empty("INDEX_PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                warn!(value = %raw, "Invalid INDEX_PORT, defaulting to {}", DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let bulk_chunk_size = match non_empty("INDEX_BULK_CHUNK_SIZE") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    warn!(
                        value = %raw,
                        "Invalid INDEX_BULK_CHUNK_SIZE, defaulting to {}",
                        DEFAULT_BULK_CHUNK_SIZE
                    );
                    DEFAULT_BULK_CHUNK_SIZE
                }
            },
            None => DEFAULT_BULK_CHUNK_SIZE,
        };

        Self {
            hosts,
            username: non_empty("INDEX_USERNAME"),
            passkey: non_empty("INDEX_PASSKEY"),
            port,
            ca_cert_path: non_empty("INDEX_CA_CERT_PATH").map(PathBuf::from),
            bulk_chunk_size,
        }
    }
}
