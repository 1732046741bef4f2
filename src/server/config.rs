use std::path::PathBuf;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: String,
    /// SQLite database file
    pub db_path: PathBuf,
    /// Directory the built client is served from
    pub public_dir: PathBuf,
    /// Broadcast buffer per subscriber
    pub broadcast_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3001".to_string(),
            db_path: PathBuf::from("./data/office.db"),
            public_dir: PathBuf::from("./public"),
            broadcast_capacity: 256,
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `OFFICE_PORT`, `OFFICE_DB` and
    /// `OFFICE_PUBLIC_DIR` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(port) = std::env::var("OFFICE_PORT") {
            config.bind_addr = format!("127.0.0.1:{port}");
        }
        if let Ok(db) = std::env::var("OFFICE_DB") {
            config.db_path = PathBuf::from(db);
        }
        if let Ok(dir) = std::env::var("OFFICE_PUBLIC_DIR") {
            config.public_dir = PathBuf::from(dir);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_dev_server() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:3001");
        assert_eq!(config.db_path, PathBuf::from("./data/office.db"));
    }
}
