//! Filename sanitization and extension inference for emoji images.

use std::path::{Component, Path, PathBuf};

use url::Url;

/// Extension used when neither the content type nor the URL yields one.
pub const PLACEHOLDER_EXTENSION: &str = ".img";

/// Maps an image Content-Type to a file extension.
///
/// Parameters after `;` are ignored and matching is case-insensitive. Only the
/// image types Slack serves custom emoji as are recognized.
pub(crate) fn extension_from_content_type(content_type: &str) -> Option<&'static str> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();

    match mime.as_str() {
        "image/png" => Some(".png"),
        "image/jpeg" | "image/jpg" => Some(".jpg"),
        "image/gif" => Some(".gif"),
        "image/webp" => Some(".webp"),
        _ => None,
    }
}

/// Extension of the URL's last path segment, lowercased and including the dot.
///
/// Dot-files (`/.hidden`) and trailing dots have no extension; anything longer
/// than 12 characters is treated as part of the name rather than an extension.
/// A suffix containing a character [`sanitize_filename`] would replace is
/// rejected outright.
pub(crate) fn extension_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let last_segment = parsed.path_segments()?.next_back()?;
    let dot_index = last_segment.rfind('.')?;
    if dot_index == 0 {
        return None;
    }
    let ext = &last_segment[dot_index..];
    if ext.len() <= 1 || ext.len() > 12 || ext.chars().any(is_invalid_filename_char) {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Picks the extension for a downloaded image.
///
/// Order: known image Content-Type, then the URL suffix, then [`PLACEHOLDER_EXTENSION`].
pub(crate) fn choose_extension(content_type: Option<&str>, url: &str) -> String {
    content_type
        .and_then(extension_from_content_type)
        .map(str::to_string)
        .or_else(|| extension_from_url(url))
        .unwrap_or_else(|| PLACEHOLDER_EXTENSION.to_string())
}

/// Sanitizes an emoji name for filesystem safety.
///
/// Replaces characters that are invalid on common filesystems:
/// / \ : * ? " < > |
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| if is_invalid_filename_char(c) { '_' } else { c })
        .collect();

    if sanitized.is_empty() {
        return "_".to_string();
    }

    if is_safe_filename_segment(&sanitized) {
        sanitized
    } else {
        sanitized
            .chars()
            .map(|c| if c == '.' { '_' } else { c })
            .collect()
    }
}

fn is_invalid_filename_char(c: char) -> bool {
    matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control()
}

fn is_safe_filename_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

/// Target path for an emoji: `<dir>/<sanitized-name><extension>`.
pub(crate) fn target_path(dir: &Path, name: &str, extension: &str) -> PathBuf {
    dir.join(format!("{}{extension}", sanitize_filename(name)))
}
