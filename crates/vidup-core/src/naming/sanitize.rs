//! Client filename sanitization.

use super::collision::split_extension;
use super::DEFAULT_FILENAME;

/// Linux NAME_MAX, in bytes.
pub const NAME_MAX: usize = 255;

/// Reduces a client-supplied filename to a single safe path component.
///
/// - Keeps only the text after the last `/`
/// - Replaces `\`, NUL, and control characters with `_`
/// - Maps empty, `.` and `..` to [`DEFAULT_FILENAME`]
/// - Limits length to [`NAME_MAX`] bytes, shortening the stem so the extension survives
pub fn sanitize_file_name(raw: Option<&str>) -> String {
    let raw = raw.unwrap_or_default();
    let last = raw.rsplit('/').next().unwrap_or_default();

    let out: String = last
        .chars()
        .map(|c| if c == '\\' || c.is_control() { '_' } else { c })
        .collect();

    if out.is_empty() || out == "." || out == ".." {
        return DEFAULT_FILENAME.to_string();
    }
    clamp_len(&out)
}

fn clamp_len(name: &str) -> String {
    if name.len() <= NAME_MAX {
        return name.to_string();
    }
    let (stem, ext) = split_extension(name);
    if ext.len() >= NAME_MAX {
        return truncate_to_boundary(name, NAME_MAX).to_string();
    }
    let stem = truncate_to_boundary(stem, NAME_MAX - ext.len());
    format!("{stem}{ext}")
}

/// Longest prefix of `s` that fits in `max` bytes without splitting a character.
pub(super) fn truncate_to_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut take = max;
    while take > 0 && !s.is_char_boundary(take) {
        take -= 1;
    }
    &s[..take]
}
