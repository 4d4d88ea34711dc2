// Configuration module
// Layered load: config.toml (optional) -> SLOWPOKE_* environment -> defaults

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DELAY_MS: u64 = 200;
const DEFAULT_MAX_BODY_SIZE: u64 = 1_048_576; // 1MB
const DEFAULT_SERVER_NAME: &str = "slowpoke/0.1";
const DEFAULT_ACCESS_LOG_FORMAT: &str = "dev";
const DEFAULT_KEEP_ALIVE_TIMEOUT: u64 = 75;
const DEFAULT_READ_TIMEOUT: u64 = 30;
const DEFAULT_WRITE_TIMEOUT: u64 = 30;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// HTTP behavior configuration
///
/// `delay_ms` is the artificial latency inserted before every response on
/// the echo and failure routes. It is read once at startup and never
/// changes while the process runs.
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub delay_ms: u64,
    pub max_body_size: u64,
    pub server_name: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format: `dev`, `common`, `combined`, or `json`
    pub access_log_format: String,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

impl Config {
    /// Load configuration from the default `config.toml` location.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension).
    ///
    /// The file is optional; environment variables prefixed with `SLOWPOKE`
    /// override it, and code-level defaults fill whatever remains.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SLOWPOKE"))
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", DEFAULT_PORT)?
            .set_default("http.delay_ms", DEFAULT_DELAY_MS)?
            .set_default("http.max_body_size", DEFAULT_MAX_BODY_SIZE)?
            .set_default("http.server_name", DEFAULT_SERVER_NAME)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", DEFAULT_ACCESS_LOG_FORMAT)?
            .set_default("performance.keep_alive_timeout", DEFAULT_KEEP_ALIVE_TIMEOUT)?
            .set_default("performance.read_timeout", DEFAULT_READ_TIMEOUT)?
            .set_default("performance.write_timeout", DEFAULT_WRITE_TIMEOUT)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// The response delay as a `Duration`, handed to the dispatcher at
    /// construction time.
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.http.delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
                workers: None,
            },
            http: HttpConfig {
                delay_ms: DEFAULT_DELAY_MS,
                max_body_size: DEFAULT_MAX_BODY_SIZE,
                server_name: DEFAULT_SERVER_NAME.to_string(),
            },
            logging: LoggingConfig {
                access_log: true,
                access_log_format: DEFAULT_ACCESS_LOG_FORMAT.to_string(),
            },
            performance: PerformanceConfig {
                keep_alive_timeout: DEFAULT_KEEP_ALIVE_TIMEOUT,
                read_timeout: DEFAULT_READ_TIMEOUT,
                write_timeout: DEFAULT_WRITE_TIMEOUT,
                max_connections: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let cfg = Config::load_from("no-such-config-file").expect("defaults should load");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.http.delay_ms, 200);
        assert_eq!(cfg.logging.access_log_format, "dev");
        assert!(cfg.server.workers.is_none());
        assert!(cfg.performance.max_connections.is_none());
    }

    #[test]
    fn test_delay_accessor() {
        let mut cfg = Config::default();
        cfg.http.delay_ms = 350;
        assert_eq!(cfg.delay(), Duration::from_millis(350));
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::default();
        let addr = cfg.get_socket_addr().expect("default address should parse");
        assert_eq!(addr.port(), 8080);
    }
}
