use std::{fs, path::PathBuf};

use once_cell::sync::Lazy;
use serde::Deserialize;
use tracing::{info, warn};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const LOCAL_CACHE_DIR: &str = ".moviehub_cache";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub cache_dir: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cache_dir: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(alias = "backend_url")]
    api_base_url: Option<String>,
    cache_dir: Option<String>,
    request_timeout_secs: Option<u64>,
}

static CONFIG: Lazy<AppConfig> = Lazy::new(read_config_file);

/// Process-wide config, read once from `config.json` in the working directory.
pub fn load_config() -> AppConfig {
    CONFIG.clone()
}

fn read_config_file() -> AppConfig {
    let cfg_path = PathBuf::from("config.json");
    let mut cfg = AppConfig::default();

    match fs::read_to_string(&cfg_path) {
        Ok(raw) => match serde_json::from_str::<RawConfig>(&raw) {
            Ok(parsed) => {
                if let Some(base) = parsed.api_base_url {
                    let trimmed = base.trim_end_matches('/').to_string();
                    if trimmed.is_empty() {
                        warn!("Empty api_base_url in config.json; keeping default.");
                    } else {
                        cfg.api_base_url = trimmed;
                    }
                }
                if parsed.cache_dir.is_some() {
                    cfg.cache_dir = parsed.cache_dir;
                }
                if let Some(secs) = parsed.request_timeout_secs {
                    cfg.request_timeout_secs = secs.clamp(1, 120);
                }
                info!("Loaded config from {}", cfg_path.display());
            }
            Err(err) => {
                warn!("Failed to parse config.json ({}). Using defaults.", err);
            }
        },
        Err(_) => {
            info!("No config.json found; using defaults");
        }
    }

    cfg
}
