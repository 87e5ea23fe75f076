use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::{WriteOptions, DEFAULT_CHUNK_SIZE, DEFAULT_LIMIT_BYTES};
use crate::upload::{UploadStore, DEFAULT_NAME_RETRIES};

/// Global configuration loaded from `~/.config/vidup/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VidupConfig {
    /// Socket address the HTTP server binds to.
    pub listen_addr: String,
    /// Directory all uploads are stored in. Relative paths resolve against the working directory.
    pub upload_dir: PathBuf,
    /// Largest accepted upload in bytes; one byte more is rejected with 413.
    pub max_file_size_bytes: u64,
    /// Streaming chunk size in bytes.
    #[serde(default = "default_chunk_size")]
    pub chunk_size_bytes: usize,
    /// fsync each upload before answering.
    #[serde(default = "default_true")]
    pub sync_on_complete: bool,
    /// Re-resolutions allowed when a concurrent upload claims the same name.
    #[serde(default = "default_name_retries")]
    pub name_retries: u32,
    /// Allowed CORS origins; `"*"` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_true() -> bool {
    true
}

fn default_name_retries() -> u32 {
    DEFAULT_NAME_RETRIES
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for VidupConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            upload_dir: PathBuf::from("./upload"),
            max_file_size_bytes: DEFAULT_LIMIT_BYTES,
            chunk_size_bytes: DEFAULT_CHUNK_SIZE,
            sync_on_complete: true,
            name_retries: DEFAULT_NAME_RETRIES,
            cors_allowed_origins: default_cors_origins(),
        }
    }
}

impl VidupConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.max_file_size_bytes > 0, "max_file_size_bytes must be > 0");
        ensure!(self.chunk_size_bytes > 0, "chunk_size_bytes must be > 0");
        ensure!(
            !self.upload_dir.as_os_str().is_empty(),
            "upload_dir must not be empty"
        );
        Ok(())
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            limit_bytes: self.max_file_size_bytes,
            chunk_size: self.chunk_size_bytes,
            sync_on_complete: self.sync_on_complete,
        }
    }

    /// Absolute upload directory (relative paths are joined to the current directory).
    pub fn upload_root(&self) -> Result<PathBuf> {
        if self.upload_dir.is_absolute() {
            return Ok(self.upload_dir.clone());
        }
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        Ok(cwd.join(&self.upload_dir))
    }

    pub fn upload_store(&self) -> Result<UploadStore> {
        Ok(UploadStore::new(self.upload_root()?, self.write_options())
            .with_name_retries(self.name_retries))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vidup")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VidupConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = VidupConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<VidupConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let cfg: VidupConfig = toml::from_str(&data)
        .with_context(|| format!("invalid config: {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
