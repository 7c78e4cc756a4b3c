// ============================================================================
// Structure : Config
// ============================================================================
// Configuration lue depuis les variables d'environnement
//
// - CRYPTOCONVERT_API_URL      : URL de base de l'API (défaut : CoinGecko v3)
// - CRYPTOCONVERT_TIMEOUT_SECS : timeout des requêtes en secondes, > 0
//                                (défaut : celui de reqwest)
// - CRYPTOCONVERT_LOG_DIR      : dossier des logs
//
// Le niveau de log reste contrôlé par RUST_LOG (voir main.rs).
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

pub const ENV_API_URL: &str = "CRYPTOCONVERT_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "CRYPTOCONVERT_TIMEOUT_SECS";
pub const ENV_LOG_DIR: &str = "CRYPTOCONVERT_LOG_DIR";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// URL de base, sans le chemin `simple/price`
    pub api_base_url: String,

    /// None : pas de timeout explicite
    pub timeout: Option<Duration>,

    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout: None,
            log_dir: default_log_dir(),
        }
    }
}

impl Config {
    /// Lit la configuration depuis l'environnement du processus
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Construit la configuration à partir d'une fonction de lecture
    ///
    /// Permet de tester sans toucher à l'environnement global.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config.api_base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            // 0 ferait expirer toutes les requêtes immédiatement
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&secs| secs > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    var: ENV_TIMEOUT_SECS,
                    value: raw.clone(),
                })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        if let Some(dir) = lookup(ENV_LOG_DIR).filter(|v| !v.trim().is_empty()) {
            config.log_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

/// ~/.local/share/cryptoconvert/logs sur Linux, ./logs si introuvable
fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("cryptoconvert").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}
