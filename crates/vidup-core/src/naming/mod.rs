//! Name resolution for stored uploads.
//!
//! Turns a client-supplied filename into a path that is a direct child of the
//! upload root and does not collide with anything already stored there.

mod collision;
mod sanitize;

pub use collision::{split_extension, suffixed_name};
pub use sanitize::{sanitize_file_name, NAME_MAX};

use std::path::{Path, PathBuf};

/// Base name used when the client sends no usable filename.
pub const DEFAULT_FILENAME: &str = "uploaded_file";

/// Resolved destination for one upload: a direct child of the upload root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPath {
    path: PathBuf,
    file_name: String,
}

impl TargetPath {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name under which the file is stored (last path component).
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Resolves `raw_name` to a free path under `upload_root`.
///
/// Never fails: malformed names degrade to [`DEFAULT_FILENAME`]. When the
/// sanitized name is taken, probes `{stem}_{n}{ext}` for n = 1, 2, ... against
/// the live filesystem. The result is only free at the moment of the check;
/// the writer's exclusive create catches a concurrent claim.
pub fn resolve(raw_name: Option<&str>, upload_root: &Path) -> TargetPath {
    let name = sanitize_file_name(raw_name);
    let first = upload_root.join(&name);
    if !is_taken(&first) {
        return TargetPath {
            path: first,
            file_name: name,
        };
    }

    let (stem, ext) = split_extension(&name);
    let mut n: u64 = 1;
    loop {
        let candidate_name = suffixed_name(stem, ext, n);
        let candidate = upload_root.join(&candidate_name);
        if !is_taken(&candidate) {
            tracing::debug!(requested = %name, resolved = %candidate_name, "name collision resolved");
            return TargetPath {
                path: candidate,
                file_name: candidate_name,
            };
        }
        n += 1;
    }
}

// Dangling symlinks count as taken.
fn is_taken(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}
