// src/config.rs

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub rust_log: String,
    /// Directory served for `/style.css` and other static files.
    pub public_dir: PathBuf,
    /// Directory for the daily rolling log file.
    pub log_dir: PathBuf,
    /// Request body cap, which also bounds what the sanitizer has to parse.
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            rust_log: "info".to_string(),
            public_dir: PathBuf::from("public"),
            log_dir: PathBuf::from("logs"),
            max_body_bytes: 64 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Self::default();

        let mut bind_addr = parse_var("BIND_ADDR").unwrap_or(defaults.bind_addr);
        if let Some(port) = parse_var::<u16>("PORT") {
            bind_addr.set_port(port);
        }

        let rust_log = env::var("RUST_LOG").unwrap_or(defaults.rust_log);

        let public_dir = env::var("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.public_dir);

        let log_dir = env::var("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_dir);

        let max_body_bytes = parse_var("MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes);

        Self {
            bind_addr,
            rust_log,
            public_dir,
            log_dir,
            max_body_bytes,
        }
    }
}

/// Reads and parses an environment variable. Unparseable values are
/// reported on stderr (logging is not up yet) and treated as unset.
fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            eprintln!("Ignoring invalid {key}={raw:?}, using the default");
            None
        }
    }
}
