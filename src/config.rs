//! Generator configuration.
//!
//! Handles loading, normalizing, and validating the configuration file. The
//! only required key is `repository`; everything else has a default.
//!
//! ## File Formats
//!
//! `config.toml` is the default. Files ending in `.yaml` or `.yml` are read as
//! YAML with the same keys, so existing `config.yaml` setups keep working.
//!
//! ## Configuration Options
//!
//! ```toml
//! repository = "https://github.com/owner/repo"   # required
//!
//! image_folder = "img"          # Image root, relative to the working directory
//! makro_file = "makros.md"      # Output file, relative to the working directory
//! ignore_dirs = []              # Directory names skipped at any depth
//! image_extensions = [".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".webp"]
//! makros_setup = ""             # LiaScript header comment (macro definitions)
//! how_to_use = ""               # Intro markdown, `{location}` = macro file URL
//! sort_entries = false          # Sort siblings by name instead of listing order
//! image_macro = "diagnostik_image"
//! preview_size = 10             # Image height used in showcase rows
//! table_columns = ["Image", "Name", "Command"]
//! ```
//!
//! ## Normalization
//!
//! After parsing, [`ensure_validity`] makes the config safe for the generator:
//! leading `/` is stripped from paths, extensions are lowercased and
//! dot-prefixed, the setup template is wrapped in a `<!--` comment carrying a
//! `repository:` line, and the raw image URL is derived.
//!
//! Unknown keys are rejected to catch typos early.

use crate::classify::normalize_extension;
use crate::url::{self, UrlError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("The 'repository' key must be provided")]
    MissingRepository,
    #[error(transparent)]
    Url(#[from] UrlError),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration for one generation run.
///
/// Read once at startup and never mutated afterwards. Construct through
/// [`load_config`] or [`ensure_validity`] so that the derived fields are set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MacroConfig {
    /// GitHub repository hosting the images, e.g. `https://github.com/owner/repo`.
    pub repository: String,
    /// Image root directory.
    pub image_folder: String,
    /// Output macro file.
    #[serde(alias = "macro_file")]
    pub makro_file: String,
    /// Directory names that are never traversed, at any depth.
    pub ignore_dirs: Vec<String>,
    /// Recognized image extensions (normalized to `.ext` lowercase).
    pub image_extensions: Vec<String>,
    /// Header template, emitted verbatim as the first header fragment.
    pub makros_setup: String,
    /// Intro template, emitted as the first body fragment.
    pub how_to_use: String,
    /// Sort sibling entries by file name. Off by default: entries appear in
    /// the order the filesystem lists them.
    pub sort_entries: bool,
    /// LiaScript macro that renders an image, called as `@name(base,path,@0)`.
    pub image_macro: String,
    /// Preview height passed to image macros in showcase rows.
    pub preview_size: u32,
    /// Showcase table column titles.
    pub table_columns: [String; 3],
    /// Raw-content URL of `image_folder`. Derived, never read from the file.
    #[serde(skip)]
    pub raw_image_folder: String,
}

pub fn default_image_extensions() -> Vec<String> {
    [".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".webp"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for MacroConfig {
    fn default() -> Self {
        Self {
            repository: String::new(),
            image_folder: "img".to_string(),
            makro_file: "makros.md".to_string(),
            ignore_dirs: Vec::new(),
            image_extensions: default_image_extensions(),
            makros_setup: String::new(),
            how_to_use: String::new(),
            sort_entries: false,
            image_macro: "diagnostik_image".to_string(),
            preview_size: 10,
            table_columns: ["Image".to_string(), "Name".to_string(), "Command".to_string()],
            raw_image_folder: String::new(),
        }
    }
}

impl MacroConfig {
    /// Validate values the generator cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repository.trim().is_empty() {
            return Err(ConfigError::MissingRepository);
        }
        if self.image_folder.is_empty() {
            return Err(ConfigError::Validation(
                "image_folder must not be empty".into(),
            ));
        }
        if self.makro_file.is_empty() {
            return Err(ConfigError::Validation("makro_file must not be empty".into()));
        }
        if self.image_extensions.is_empty() {
            return Err(ConfigError::Validation(
                "image_extensions must not be empty".into(),
            ));
        }
        if self.preview_size == 0 {
            return Err(ConfigError::Validation(
                "preview_size must be greater than 0".into(),
            ));
        }
        if self.image_macro.is_empty()
            || !self
                .image_macro
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        {
            return Err(ConfigError::Validation(format!(
                "image_macro is not a valid macro name: {:?}",
                self.image_macro
            )));
        }
        Ok(())
    }
}

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Pick the format from the file extension. Anything that is not
    /// `.yaml`/`.yml` is read as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Toml,
        }
    }
}

/// Parse raw config content without normalizing it.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<MacroConfig, ConfigError> {
    let config: MacroConfig = match format {
        ConfigFormat::Toml => toml::from_str(content)?,
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(config)
}

/// Wrap the setup template in a LiaScript header comment with a
/// `repository:` line pointing at `repository`.
///
/// - Leading blank lines are dropped.
/// - `<!--` is prepended as its own line unless the template starts with it.
/// - An existing `repository:` line is replaced; otherwise one is inserted
///   right after the opening comment line.
pub fn process_makros_setup(setup: &str, repository: &str) -> String {
    let repository_line = format!("repository: \"{repository}\"");
    let mut lines: Vec<String> = setup
        .lines()
        .skip_while(|line| line.trim().is_empty())
        .map(String::from)
        .collect();

    if !lines
        .first()
        .is_some_and(|line| line.trim_start().starts_with("<!--"))
    {
        lines.insert(0, "<!--".to_string());
    }

    match lines
        .iter()
        .position(|line| line.trim_start().starts_with("repository:"))
    {
        Some(index) => lines[index] = repository_line,
        None => lines.insert(1, repository_line),
    }

    let mut processed = lines.join("\n");
    if setup.ends_with('\n') {
        processed.push('\n');
    }
    processed
}

/// Normalize a parsed config and derive the raw image URL.
pub fn ensure_validity(mut config: MacroConfig) -> Result<MacroConfig, ConfigError> {
    if config.repository.trim().is_empty() {
        return Err(ConfigError::MissingRepository);
    }
    config.image_folder = config.image_folder.trim_start_matches('/').to_string();
    config.makro_file = config.makro_file.trim_start_matches('/').to_string();
    config.image_extensions = config
        .image_extensions
        .iter()
        .map(|ext| normalize_extension(ext))
        .collect();
    config.makros_setup = process_makros_setup(&config.makros_setup, &config.repository);
    config.validate()?;
    config.raw_image_folder = url::raw_base_url(&config.repository, &config.image_folder)?;
    Ok(config)
}

/// Load, normalize, and validate the config file at `path`.
pub fn load_config(path: &Path) -> Result<MacroConfig, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content, ConfigFormat::from_path(path))?;
    ensure_validity(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# LiaScript image macro configuration
# ===================================
# Only `repository` is required. Values shown below are the defaults.
# Unknown keys will cause an error.

# GitHub repository that hosts the images. Image and macro file URLs point at
# raw.githubusercontent.com on the `main` branch of this repository.
repository = "https://github.com/owner/repo"

# Image root, relative to the working directory. Each subdirectory becomes a
# category; nested directories become `Parent_Child` categories.
image_folder = "img"

# Generated macro file, relative to the working directory.
makro_file = "makros.md"

# Directory names that are never traversed, at any depth.
ignore_dirs = []

# Files with these extensions (case-insensitive) become image macros.
image_extensions = [".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".webp"]

# LiaScript header written before the generated macros. It is wrapped in
# `<!--` and gets a `repository:` line automatically.
makros_setup = ""

# Markdown written before the showcase tables. `{location}` is replaced with
# the raw URL of the generated macro file.
how_to_use = ""

# Sort directories and files by name. By default entries appear in the order
# the filesystem lists them.
sort_entries = false

# Macro that renders an image: called as `@image_macro(base_url,path,@0)`.
image_macro = "diagnostik_image"

# Height passed to image macros in showcase rows.
preview_size = 10

# Showcase table column titles.
table_columns = ["Image", "Name", "Command"]
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn with_repository() -> MacroConfig {
        MacroConfig {
            repository: "https://github.com/user/reponame".into(),
            ..MacroConfig::default()
        }
    }

    #[test]
    fn defaults() {
        let config = MacroConfig::default();
        assert!(config.ignore_dirs.is_empty());
        assert_eq!(config.makro_file, "makros.md");
        assert_eq!(config.image_folder, "img");
        assert_eq!(config.how_to_use, "");
        assert_eq!(
            config.image_extensions,
            vec![".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".webp"]
        );
        assert!(!config.sort_entries);
        assert_eq!(config.preview_size, 10);
    }

    #[test]
    fn leading_slashes_removed() {
        let config = ensure_validity(MacroConfig {
            image_folder: "/img".into(),
            makro_file: "/makro.md".into(),
            ..with_repository()
        })
        .unwrap();
        assert_eq!(config.image_folder, "img");
        assert_eq!(config.makro_file, "makro.md");
        assert!(!Path::new(&config.image_folder).has_root());
    }

    #[test]
    fn missing_repository_is_error() {
        let result = ensure_validity(MacroConfig {
            makros_setup: "some setup".into(),
            ..MacroConfig::default()
        });
        assert!(matches!(result, Err(ConfigError::MissingRepository)));
    }

    #[test]
    fn invalid_repository_url_is_error() {
        let result = ensure_validity(MacroConfig {
            repository: "https://example.org/user/repo".into(),
            ..MacroConfig::default()
        });
        assert!(matches!(
            result,
            Err(ConfigError::Url(UrlError::InvalidRepositoryUrl(_)))
        ));
    }

    #[test]
    fn extensions_lowercased() {
        let config = ensure_validity(MacroConfig {
            image_extensions: vec![".JPG".into(), ".PNG".into()],
            ..with_repository()
        })
        .unwrap();
        assert_eq!(config.image_extensions, vec![".jpg", ".png"]);
    }

    #[test]
    fn extensions_start_with_dot() {
        let config = ensure_validity(MacroConfig {
            image_extensions: vec!["jpg".into(), ".png".into(), "jpeg".into()],
            ..with_repository()
        })
        .unwrap();
        assert_eq!(config.image_extensions, vec![".jpg", ".png", ".jpeg"]);
    }

    #[test]
    fn raw_image_folder_derived() {
        let config = ensure_validity(MacroConfig {
            repository: "https://github.com/user/repo".into(),
            ..MacroConfig::default()
        })
        .unwrap();
        assert_eq!(
            config.raw_image_folder,
            "https://raw.githubusercontent.com/user/repo/refs/heads/main/img"
        );
    }

    #[test]
    fn setup_gets_comment_and_repository_line() {
        let setup = process_makros_setup(
            "\n\n  author: Test Author\n  some: value",
            "https://github.com/user/reponame",
        );
        let lines: Vec<&str> = setup.lines().collect();
        assert!(lines[0].starts_with("<!--"));
        assert_eq!(lines[1], r#"repository: "https://github.com/user/reponame""#);
        assert_eq!(lines[2], "  author: Test Author");
    }

    #[test]
    fn setup_repository_line_replaced() {
        let original = "<!--\nauthor: Test Author\nrepository: \"https://github.com/old/repo\"\nedit: true\n";
        let setup = process_makros_setup(original, "https://github.com/user/newrepo");
        let repo_lines: Vec<&str> = setup
            .lines()
            .filter(|l| l.trim_start().starts_with("repository:"))
            .collect();
        assert_eq!(repo_lines, vec![r#"repository: "https://github.com/user/newrepo""#]);
        assert!(setup.starts_with("<!--\nauthor: Test Author\n"));
        assert!(setup.ends_with("edit: true\n"));
    }

    #[test]
    fn empty_setup_becomes_minimal_header() {
        let setup = process_makros_setup("", "https://github.com/user/repo");
        assert_eq!(setup, "<!--\nrepository: \"https://github.com/user/repo\"");
    }

    #[test]
    fn validate_rejects_zero_preview_size() {
        let config = MacroConfig {
            preview_size: 0,
            ..with_repository()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_bad_image_macro() {
        let config = MacroConfig {
            image_macro: "not a macro".into(),
            ..with_repository()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_empty_extensions() {
        let config = MacroConfig {
            image_extensions: vec![],
            ..with_repository()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("config.yaml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("config.YML")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("config.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("config")), ConfigFormat::Toml);
    }

    #[test]
    fn unknown_keys_rejected() {
        let result = parse_config("repository = \"x\"\nimage_folders = \"img\"\n", ConfigFormat::Toml);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_toml_with_only_repository() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "repository = \"https://github.com/user/repo\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.repository, "https://github.com/user/repo");
        assert_eq!(config.image_folder, "img");
        assert_eq!(config.makro_file, "makros.md");
        assert!(config.ignore_dirs.is_empty());
        assert_eq!(config.how_to_use, "");
        assert_eq!(config.image_extensions, default_image_extensions());
        assert!(
            config
                .makros_setup
                .lines()
                .any(|l| l.trim() == r#"repository: "https://github.com/user/repo""#)
        );
    }

    #[test]
    fn load_yaml_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        fs::write(
            &path,
            r#"repository: https://github.com/user/repo
image_folder: /pictures
ignore_dirs:
  - Collections
image_extensions: [PNG, .svg]
how_to_use: |
  See {location}
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.image_folder, "pictures");
        assert_eq!(config.ignore_dirs, vec!["Collections"]);
        assert_eq!(config.image_extensions, vec![".png", ".svg"]);
        assert_eq!(config.how_to_use, "See {location}\n");
        assert_eq!(
            config.raw_image_folder,
            "https://raw.githubusercontent.com/user/repo/refs/heads/main/pictures"
        );
    }

    #[test]
    fn load_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(&tmp.path().join("config.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn load_malformed_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "repository = [unclosed").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_malformed_yaml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yml");
        fs::write(&path, "repository: [unclosed").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn load_without_repository_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "image_folder = \"img\"\n").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::MissingRepository)));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config = parse_config(stock_config_toml(), ConfigFormat::Toml).unwrap();
        let defaults = MacroConfig::default();
        assert_eq!(config.image_folder, defaults.image_folder);
        assert_eq!(config.makro_file, defaults.makro_file);
        assert_eq!(config.image_extensions, defaults.image_extensions);
        assert_eq!(config.image_macro, defaults.image_macro);
        assert_eq!(config.preview_size, defaults.preview_size);
        assert_eq!(config.table_columns, defaults.table_columns);
        assert!(ensure_validity(config).is_ok());
    }
}
