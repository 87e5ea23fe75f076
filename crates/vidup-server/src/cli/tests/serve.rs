//! Tests for serve/config parsing and flag overrides.

use super::parse;
use clap::Parser;
use crate::cli::{apply_overrides, CliCommand};
use std::path::{Path, PathBuf};
use vidup_core::config::VidupConfig;

#[test]
fn cli_parse_serve_defaults() {
    let cli = parse(&["vidup", "serve"]);
    assert!(cli.config.is_none());
    match cli.command {
        CliCommand::Serve {
            listen,
            upload_dir,
            max_file_size,
        } => {
            assert!(listen.is_none());
            assert!(upload_dir.is_none());
            assert!(max_file_size.is_none());
        }
        _ => panic!("expected Serve"),
    }
}

#[test]
fn cli_parse_serve_flags() {
    let cli = parse(&[
        "vidup",
        "serve",
        "--listen",
        "127.0.0.1:9000",
        "--upload-dir",
        "/srv/videos",
        "--max-file-size",
        "1048576",
    ]);
    match cli.command {
        CliCommand::Serve {
            listen,
            upload_dir,
            max_file_size,
        } => {
            assert_eq!(listen.as_deref(), Some("127.0.0.1:9000"));
            assert_eq!(upload_dir.as_deref(), Some(Path::new("/srv/videos")));
            assert_eq!(max_file_size, Some(1_048_576));
        }
        _ => panic!("expected Serve with flags"),
    }
}

#[test]
fn cli_parse_global_config_flag() {
    let cli = parse(&["vidup", "config", "--config", "/etc/vidup.toml"]);
    assert!(matches!(cli.command, CliCommand::Config));
    assert_eq!(cli.config, Some(PathBuf::from("/etc/vidup.toml")));
}

#[test]
fn cli_rejects_non_numeric_size() {
    assert!(crate::cli::Cli::try_parse_from(["vidup", "serve", "--max-file-size", "big"]).is_err());
}

#[test]
fn overrides_replace_file_values() {
    let cfg = apply_overrides(
        VidupConfig::default(),
        Some("127.0.0.1:1".into()),
        Some(PathBuf::from("/tmp/up")),
        Some(10),
    )
    .unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:1");
    assert_eq!(cfg.upload_dir, PathBuf::from("/tmp/up"));
    assert_eq!(cfg.max_file_size_bytes, 10);
}

#[test]
fn overrides_are_validated() {
    assert!(apply_overrides(VidupConfig::default(), None, None, Some(0)).is_err());
}
