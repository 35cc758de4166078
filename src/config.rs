use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Labsight";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const MODEL_DIR_VAR: &str = "LABSIGHT_MODEL_DIR";
pub const BIND_ADDR_VAR: &str = "LABSIGHT_BIND_ADDR";
pub const MAX_UPLOAD_MB_VAR: &str = "LABSIGHT_MAX_UPLOAD_MB";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5001";
const DEFAULT_MAX_UPLOAD_MB: usize = 20;

/// Get the application data directory
/// ~/Labsight/ on all platforms
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default model artifact directory
pub fn models_dir() -> PathBuf {
    app_data_dir().join("models")
}

/// Tracing filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "labsight=info,tower_http=info"
}

/// Service settings, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub model_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub max_upload_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model_dir: models_dir(),
            bind_addr: default_bind_addr(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
        }
    }
}

impl ServiceConfig {
    /// Read `LABSIGHT_*` variables. Invalid values are logged and replaced
    /// by defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup(MODEL_DIR_VAR).filter(|d| !d.trim().is_empty()) {
            config.model_dir = PathBuf::from(dir.trim());
        }

        if let Some(raw) = lookup(BIND_ADDR_VAR) {
            match raw.trim().parse::<SocketAddr>() {
                Ok(addr) => config.bind_addr = addr,
                Err(e) => tracing::warn!(
                    value = %raw,
                    error = %e,
                    "Invalid {BIND_ADDR_VAR}, using {DEFAULT_BIND_ADDR}"
                ),
            }
        }

        if let Some(raw) = lookup(MAX_UPLOAD_MB_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(mb) if mb > 0 => config.max_upload_bytes = mb * 1024 * 1024,
                _ => tracing::warn!(
                    value = %raw,
                    "Invalid {MAX_UPLOAD_MB_VAR}, using {DEFAULT_MAX_UPLOAD_MB} MB"
                ),
            }
        }

        config
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5001))
}
