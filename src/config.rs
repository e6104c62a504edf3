use serde::Deserialize;
use std::{env, fs, path::PathBuf};

use tracing::level_filters::LevelFilter;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Interface the HTTP server binds to.
    pub http_host: String,

    /// HTTP port to listen on.
    pub http_port: u16,

    /// Interface the socket server binds to. The HTTP server sends its
    /// outbound datagrams to this address, so it should stay loopback
    /// unless the two servers run on different hosts.
    pub socket_host: String,

    /// UDP port the socket server listens on.
    pub socket_port: u16,

    /// Receive buffer size for inbound datagrams. Longer datagrams are
    /// truncated by the transport.
    pub buffer_size: usize,

    /// Path to the JSON data file.
    pub storage_path: String,

    /// Directory holding the HTML pages and the static/ subdirectory.
    pub assets_dir: String,

    /// Log level for tracing (e.g. "info", "debug").
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http_host: "0.0.0.0".to_string(),
            http_port: 3000,
            socket_host: "127.0.0.1".to_string(),
            socket_port: 5000,
            buffer_size: 1024,
            storage_path: "storage/data.json".to_string(),
            assets_dir: "assets".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &str) -> Self {
        let file = fs::read_to_string(path).expect("Failed to read config.json");

        serde_json::from_str::<AppConfig>(&file).expect("Invalid config.json")
    }

    /// Load config.json from the executable's directory, its parent, or the
    /// working directory, in that order. Falls back to built-in defaults
    /// when no config file is found.
    pub fn load_or_default() -> Self {
        match Self::locate_file() {
            Some(path) => {
                let cfg = Self::load_from_file(path.to_str().expect("Non-UTF-8 config path"));
                tracing::info!("Loaded config.json from {}", path.display());
                cfg
            }
            None => {
                tracing::info!("No config.json found, using built-in defaults");
                Self::default()
            }
        }
    }

    fn locate_file() -> Option<PathBuf> {
        let mut candidates: Vec<PathBuf> = Vec::new();

        if let Ok(exe_path) = env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                candidates.push(exe_dir.join("config.json"));
                candidates.push(exe_dir.join("..").join("config.json"));
            }
        }
        candidates.push(PathBuf::from("config.json"));

        candidates.into_iter().find(|p| p.exists())
    }

    /// Map the configured log level string onto a tracing filter.
    pub fn log_filter(&self) -> LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "trace" => LevelFilter::TRACE,
            "debug" => LevelFilter::DEBUG,
            "info" => LevelFilter::INFO,
            "warn" => LevelFilter::WARN,
            "error" => LevelFilter::ERROR,
            _ => LevelFilter::INFO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_binds() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.http_port, 3000);
        assert_eq!(cfg.socket_host, "127.0.0.1");
        assert_eq!(cfg.socket_port, 5000);
        assert_eq!(cfg.buffer_size, 1024);
        assert_eq!(cfg.storage_path, "storage/data.json");
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let cfg = AppConfig {
            log_level: "loud".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(cfg.log_filter(), LevelFilter::INFO);

        let cfg = AppConfig {
            log_level: "DEBUG".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(cfg.log_filter(), LevelFilter::DEBUG);
    }
}
