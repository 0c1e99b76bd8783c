use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing::info;

use crate::config::SongbotConfig;

static GLOBAL_CONFIG: OnceCell<SongbotConfig> = OnceCell::new();

pub mod config;

/// Environment variable naming the TOML configuration file.
pub const CONFIG_FILE_ENV: &str = "SONGBOT_CONFIG_FILE";
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("configuration was already loaded")]
    AlreadyLoaded,
}

/// Load the configuration once for the whole process.
///
/// `.env` is read first, then the TOML file at `path` (a missing file means
/// defaults), then environment overrides are applied on top.
pub fn load_config(path: &str) -> Result<&'static SongbotConfig, ConfigError> {
    if dotenvy::dotenv().is_ok() {
        info!("Loaded environment from .env");
    }

    let mut config = read_config_file(Path::new(path))?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    GLOBAL_CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyLoaded)?;
    Ok(get_config())
}

pub fn get_config() -> &'static SongbotConfig {
    GLOBAL_CONFIG
        .get()
        .expect("called `get_config()` before config was initialized")
}

/// Parse a TOML configuration file, falling back to defaults when it does not exist.
pub fn read_config_file(path: &Path) -> Result<SongbotConfig, ConfigError> {
    let cfg_str = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No configuration file at {}, using defaults", path.display());
            return Ok(SongbotConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    };

    let mut config: SongbotConfig = toml::from_str(&cfg_str).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    normalize(&mut config);
    Ok(config)
}

/// Role id 0 means no role gate, whichever source set it.
fn normalize(config: &mut SongbotConfig) {
    config.auth.required_role_id = config.auth.required_role_id.filter(|&id| id != 0);
}

/// Apply `DISCORD_TOKEN`, `SONGS_FILE`, `ADMIN_ROLE_ID`, `COMMAND_PREFIX` and
/// `SENTRY_DSN` from `lookup`. Empty values are ignored, except that an empty
/// `ADMIN_ROLE_ID` clears the role gate.
pub fn apply_env_overrides<F>(config: &mut SongbotConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(token) = get("DISCORD_TOKEN") {
        config.discord.token = token;
    }
    if let Some(path) = get("SONGS_FILE") {
        config.store.path = path;
    }
    if let Some(prefix) = get("COMMAND_PREFIX") {
        config.discord.command_prefix = prefix;
    }
    if let Some(dsn) = get("SENTRY_DSN") {
        config.sentry.dsn = dsn;
    }
    // Present but empty, like 0, disables the role gate
    if let Some(raw) = lookup("ADMIN_ROLE_ID") {
        let raw = raw.trim();
        config.auth.required_role_id = if raw.is_empty() {
            None
        } else {
            let id: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "ADMIN_ROLE_ID",
                value: raw.to_string(),
            })?;
            Some(id)
        };
    }
    normalize(config);

    Ok(())
}
