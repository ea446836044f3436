use std::time::Duration;

use crate::persistence::storage::StorageEngineKind;

#[derive(Debug, Clone)]
pub struct DatabaseOptions {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: usize,
    pub connect_timeout: Duration,
    pub storage_engine: StorageEngineKind,
}

// Implements: https://rust-unofficial.github.io/patterns/patterns/creational/builder.html
impl DatabaseOptions {
    pub fn set_host(mut self, host: String) -> Self {
        self.host = host;
        self
    }

    pub fn set_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn set_credentials(mut self, user: String, password: String) -> Self {
        self.user = user;
        self.password = password;
        self
    }

    pub fn set_database(mut self, database: String) -> Self {
        self.database = database;
        self
    }

    /// Upper bound of open connections, checkouts beyond it wait for a connection to be returned
    pub fn set_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Bounds how long opening a new connection to the store may take. This is the only
    /// timeout applied to store I/O
    pub fn set_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn set_storage_engine(mut self, storage_engine: StorageEngineKind) -> Self {
        self.storage_engine = storage_engine;
        self
    }
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: "".to_string(),
            database: "crud_db".to_string(),
            max_connections: 10,
            connect_timeout: Duration::from_secs(5),
            storage_engine: StorageEngineKind::Postgres,
        }
    }
}

#[cfg(test)]
impl DatabaseOptions {
    /// Options pointing at a port nothing listens on, used to exercise the unavailable store paths
    pub fn new_unreachable() -> Self {
        DatabaseOptions::default()
            .set_host("127.0.0.1".to_string())
            .set_port(1)
            .set_max_connections(2)
            .set_connect_timeout(Duration::from_millis(500))
    }

    /// Options for a running server, read from the same `DB_*` variables as the http client
    pub fn new_live_test() -> Self {
        let defaults = DatabaseOptions::default();
        let var = |name: &str, default: String| std::env::var(name).unwrap_or(default);

        DatabaseOptions::default()
            .set_host(var("DB_HOST", defaults.host))
            .set_port(
                std::env::var("DB_PORT")
                    .ok()
                    .and_then(|port| port.parse().ok())
                    .unwrap_or(defaults.port),
            )
            .set_credentials(
                var("DB_USER", defaults.user),
                var("DB_PASSWORD", defaults.password),
            )
            .set_database(var("DB_NAME", defaults.database))
            .set_max_connections(1)
    }
}
