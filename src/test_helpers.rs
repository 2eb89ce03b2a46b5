//! Shared test utilities for the generator test suite.
//!
//! Provides a ready-made image tree, a normalized config, and extractors that
//! pull headings and table rows out of a rendered body.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = image_tree();
//! let config = test_config();
//! let mut generator = MacroGenerator::new(&config, tmp.path());
//! let root = generator.image_root();
//! generator.walk(&root).unwrap();
//!
//! let body = body_text(generator.document());
//! assert!(headings(&body).contains(&"category1_subcategory".to_string()));
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::config::{MacroConfig, ensure_validity};
use crate::document::DocumentBuilder;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create an image tree in a temp directory and return it.
///
/// ```text
/// img/
/// ├── category1/
/// │   ├── subcategory/
/// │   │   ├── five.png
/// │   │   └── six.png
/// │   ├── ignore_folder/
/// │   ├── one.png
/// │   └── two.jpg
/// ├── category2/
/// │   ├── three.png
/// │   └── four.jpeg
/// └── ignore_folder/
/// ```
pub fn image_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    for file in [
        "img/category1/subcategory/five.png",
        "img/category1/subcategory/six.png",
        "img/category1/one.png",
        "img/category1/two.jpg",
        "img/category2/three.png",
        "img/category2/four.jpeg",
    ] {
        write_image(root, file);
    }
    std::fs::create_dir_all(root.join("img/category1/ignore_folder")).unwrap();
    std::fs::create_dir_all(root.join("img/ignore_folder")).unwrap();
    tmp
}

/// Write a placeholder file at `base/relative`, creating parent directories.
/// Content is irrelevant: classification only looks at the extension.
pub fn write_image(base: &Path, relative: &str) {
    let path = base.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, b"\x89PNG\r\n").unwrap();
}

/// Normalized config for `https://github.com/owner/repo` with defaults.
pub fn test_config() -> MacroConfig {
    ensure_validity(MacroConfig {
        repository: "https://github.com/owner/repo".into(),
        ..MacroConfig::default()
    })
    .unwrap()
}

// =========================================================================
// Body extractors
// =========================================================================

/// Body fragments joined the way `render` joins them.
pub fn body_text(doc: &DocumentBuilder) -> String {
    doc.body().join("\n")
}

/// Level-3 heading labels in order.
pub fn headings(body: &str) -> Vec<String> {
    body.lines()
        .filter_map(|line| line.strip_prefix("### "))
        .map(String::from)
        .collect()
}

/// Showcase table rows (one per image) in order.
pub fn rows(body: &str) -> Vec<&str> {
    body.lines().filter(|line| line.starts_with("|@")).collect()
}
