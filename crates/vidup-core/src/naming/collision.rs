//! Collision suffixing: `clip.mp4` -> `clip_1.mp4`, `clip_2.mp4`, ...

use super::sanitize::{truncate_to_boundary, NAME_MAX};

/// Splits `name` into stem and extension; the extension starts at the last `.`.
///
/// A leading dot (`.env`) or a trailing dot (`name.`) yields an empty extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Builds `{stem}_{n}{ext}`, shortening the stem so the result stays within NAME_MAX.
pub fn suffixed_name(stem: &str, ext: &str, n: u64) -> String {
    let tail = format!("_{n}{ext}");
    let stem = truncate_to_boundary(stem, NAME_MAX.saturating_sub(tail.len()));
    let name = format!("{stem}{tail}");
    truncate_to_boundary(&name, NAME_MAX).to_string()
}
