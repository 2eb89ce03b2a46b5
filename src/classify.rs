//! Directory entry classification.
//!
//! The walker only needs two decisions per entry: is a file an image, and is
//! a directory excluded. Both are plain string tests on the entry name; no
//! file content is inspected.

use std::path::Path;

/// Lowercase the extension and make sure it starts with `.`.
///
/// `"JPG"` → `".jpg"`, `".PNG"` → `".png"`.
pub fn normalize_extension(ext: &str) -> String {
    let lower = ext.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}

/// Lowercase extension of `name` including the dot, if it has one.
fn dotted_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
}

/// Whether `entry_name` carries one of the allowed image extensions.
///
/// `allowed_extensions` must already be normalized (see [`normalize_extension`]).
pub fn is_image(entry_name: &str, allowed_extensions: &[String]) -> bool {
    dotted_extension(entry_name).is_some_and(|ext| allowed_extensions.contains(&ext))
}

/// Exact, case-sensitive membership in the ignore list.
pub fn is_ignored(dir_name: &str, ignore_list: &[String]) -> bool {
    ignore_list.iter().any(|ignored| ignored == dir_name)
}
