//! `vidup config` – show where configuration lives and what is in effect.

use anyhow::Result;
use std::path::Path;
use vidup_core::config::{self, VidupConfig};

pub fn run_show_config(explicit: Option<&Path>, cfg: &VidupConfig) -> Result<()> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => config::config_path()?,
    };
    println!("# config file: {}", path.display());
    println!("# upload root: {}", cfg.upload_root()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
