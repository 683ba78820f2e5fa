use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_DIR_NAME: &str = ".docdex";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const PROCESSES_DIR_NAME: &str = "processes";
const ENV_PREFIX: &str = "DOCDEX_";

/// Application configuration, persisted as a flat JSON object. Environment
/// variables (`DOCDEX_APP_NAME`, `DOCDEX_VERSION`) override file values at
/// load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app_name: String,
    pub version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "docdex".to_string(),
            version: "0.1.0".to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.app_name.is_empty() {
            bail!("app_name must not be empty");
        }
        if self.version.is_empty() {
            bail!("version must not be empty");
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var(format!("{ENV_PREFIX}APP_NAME")) {
            if !v.is_empty() {
                self.app_name = v;
            }
        }
        if let Ok(v) = std::env::var(format!("{ENV_PREFIX}VERSION")) {
            if !v.is_empty() {
                self.version = v;
            }
        }
    }
}

/// Default config directory in the user's home.
pub fn default_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    Ok(home.join(DEFAULT_CONFIG_DIR_NAME))
}

/// Directory holding per-job process directories.
pub fn processes_dir(config_dir: &Path) -> PathBuf {
    config_dir.join(PROCESSES_DIR_NAME)
}

/// Ensure the config directory and its subdirectories exist.
pub fn ensure_config_dir(dir: &Path) -> Result<()> {
    for d in [dir.to_path_buf(), processes_dir(dir)] {
        fs::create_dir_all(&d)
            .with_context(|| format!("failed to create config dir {}", d.display()))?;
    }
    Ok(())
}

/// Load `config.json` from `dir`, creating a default file when missing.
pub fn load_config(dir: &Path) -> Result<Config> {
    ensure_config_dir(dir)?;
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        let mut cfg = Config::default();
        cfg.apply_env_overrides();
        cfg.validate()?;
        save_config(dir, &cfg)?;
        debug!(path = %path.display(), "created default config");
        return Ok(cfg);
    }
    let file = File::open(&path)
        .with_context(|| format!("failed to open config {}", path.display()))?;
    let mut cfg: Config = serde_json::from_reader(file)
        .with_context(|| format!("failed to decode config {}", path.display()))?;
    cfg.apply_env_overrides();
    cfg.validate()?;
    Ok(cfg)
}

/// Save the config to `config.json` in `dir`.
pub fn save_config(dir: &Path, cfg: &Config) -> Result<()> {
    let path = dir.join(CONFIG_FILE_NAME);
    let file = File::create(&path)
        .with_context(|| format!("failed to create config {}", path.display()))?;
    serde_json::to_writer_pretty(file, cfg)?;
    Ok(())
}
