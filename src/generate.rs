//! Macro file generation.
//!
//! Walks the image root and turns every image into two LiaScript macros plus
//! a showcase table row, then writes the assembled document in one piece.
//!
//! ## Directory Structure → Document
//!
//! ```text
//! img/                                 (image root, never a heading)
//! ├── Maler/                           ### Maler
//! │   ├── Koje-farbig.png              @Maler.Koje_farbig, @Maler.Koje_farbig.src
//! │   └── Taetigkeiten/                ### Maler_Taetigkeiten
//! │       └── Grundfläche.png          @Maler_Taetigkeiten.Grundflaeche
//! ├── Collections/                     (skipped when listed in ignore_dirs)
//! └── Elektro/                         ### Elektro
//!     └── notes.txt                    (not an image, skipped)
//! ```
//!
//! The category key of an image is its directory path below the image root
//! joined with `_`; the macro id is `<category key>.<sanitized stem>`.
//!
//! ## Ordering
//!
//! Entries are visited depth-first in the order the filesystem lists them,
//! which is not guaranteed to be alphabetical. Set `sort_entries` in the
//! config to sort siblings by name instead.
//!
//! ## Output
//!
//! The whole document is rendered in memory and written through a temporary
//! file that replaces the target only once complete. A failed run leaves any
//! previous macro file untouched.

use crate::classify::{is_ignored, is_image};
use crate::config::MacroConfig;
use crate::document::DocumentBuilder;
use crate::naming::{display_label, sanitize};
use crate::url::{self, UrlError};
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot read image directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Url(#[from] UrlError),
    #[error("Image path must be relative to the image folder, got: {0}")]
    InvalidFileLocation(PathBuf),
    #[error("Path is not valid UTF-8: {0}")]
    NonUtf8Path(PathBuf),
    #[error("Cannot write macro file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// One showcase section: a heading plus the macros of its rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryReport {
    /// Heading label, e.g. `Maler_Taetigkeiten`.
    pub label: String,
    /// Nesting depth below the image root (top-level categories are 0).
    pub depth: usize,
    /// Macro ids of the images in this category, in emission order.
    pub macros: Vec<String>,
}

/// What a generation run produced.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Macro file path. `None` when the run did not write anything.
    pub output_path: Option<PathBuf>,
    /// Categories in emission order.
    pub categories: Vec<CategoryReport>,
    /// Macros of images placed directly in the image root.
    pub root_macros: Vec<String>,
}

impl GenerationReport {
    pub fn image_count(&self) -> usize {
        self.root_macros.len() + self.categories.iter().map(|c| c.macros.len()).sum::<usize>()
    }
}

/// Drives one generation run over the tree below `base_dir`.
///
/// `base_dir` plays the role of the working directory: the configured
/// `image_folder` and `makro_file` are resolved against it.
pub struct MacroGenerator<'a> {
    config: &'a MacroConfig,
    base_dir: PathBuf,
    document: DocumentBuilder,
    report: GenerationReport,
    /// `open_categories[d]` = report index of the open category at depth `d`.
    open_categories: Vec<usize>,
}

impl<'a> MacroGenerator<'a> {
    pub fn new(config: &'a MacroConfig, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            base_dir: base_dir.into(),
            document: DocumentBuilder::new(),
            report: GenerationReport::default(),
            open_categories: Vec::new(),
        }
    }

    pub fn image_root(&self) -> PathBuf {
        self.base_dir.join(&self.config.image_folder)
    }

    pub fn output_path(&self) -> PathBuf {
        self.base_dir.join(&self.config.makro_file)
    }

    pub fn document(&self) -> &DocumentBuilder {
        &self.document
    }

    /// Build the full document and write it to the macro file.
    pub fn generate(mut self) -> Result<GenerationReport, GenerateError> {
        self.prefill()?;
        let root = self.image_root();
        self.walk(&root)?;
        let output = self.persist()?;
        self.report.output_path = Some(output);
        Ok(self.report)
    }

    /// Walk the tree and report what would be generated, without writing.
    pub fn check(mut self) -> Result<GenerationReport, GenerateError> {
        let root = self.image_root();
        self.walk(&root)?;
        Ok(self.report)
    }

    /// Setup template as the first header fragment, usage template with the
    /// macro file URL as the first body fragment.
    pub(crate) fn prefill(&mut self) -> Result<(), GenerateError> {
        self.document.append_header(self.config.makros_setup.as_str());
        let location = url::raw_base_url(&self.config.repository, &self.config.makro_file)?;
        self.document
            .append_body(self.config.how_to_use.replace("{location}", &location));
        Ok(())
    }

    /// Visit everything below `directory`, depth-first.
    ///
    /// Directories become categories, images become macros. Ignored
    /// directory names are pruned at any depth together with their contents.
    pub(crate) fn walk(&mut self, directory: &Path) -> Result<(), GenerateError> {
        let config = self.config;
        let mut walker = WalkDir::new(directory).min_depth(1).follow_links(true);
        if config.sort_entries {
            walker = walker.sort_by_file_name();
        }
        let entries = walker.into_iter().filter_entry(|e| {
            e.depth() == 0
                || !(e.file_type().is_dir()
                    && is_ignored(&e.file_name().to_string_lossy(), &config.ignore_dirs))
        });

        for entry in entries {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(directory)
                .map_err(|_| GenerateError::InvalidFileLocation(entry.path().to_path_buf()))?
                .to_path_buf();

            if entry.file_type().is_dir() {
                self.open_category(&relative)?;
            } else if entry.file_type().is_file()
                && is_image(&entry.file_name().to_string_lossy(), &config.image_extensions)
            {
                self.emit_image(&relative)?;
            }
        }
        Ok(())
    }

    /// Heading and table header for the directory at `relative`.
    fn open_category(&mut self, relative: &Path) -> Result<(), GenerateError> {
        let path = path_components(relative)?;
        let label = path.join("_");
        let [image, name, command] = &self.config.table_columns;

        self.document.append_body(format!("\n### {label}\n"));
        self.document
            .append_body(format!("|{image}|{name}|{command}|\n|---|---|---|"));

        let depth = path.len().saturating_sub(1);
        self.report.categories.push(CategoryReport {
            label,
            depth,
            macros: Vec::new(),
        });
        self.open_categories.truncate(depth);
        self.open_categories.push(self.report.categories.len() - 1);
        Ok(())
    }

    /// Emit the macros and the showcase row of one image.
    ///
    /// `path` is relative to the image root (`category/sub/file.png`); its
    /// directory components form the category key. A path that is absolute
    /// or still starts with the image folder would put the root into the
    /// macro name and is rejected.
    pub(crate) fn process_file(&mut self, path: &Path) -> Result<(), GenerateError> {
        if path.has_root() || path.starts_with(&self.config.image_folder) {
            return Err(GenerateError::InvalidFileLocation(path.to_path_buf()));
        }
        self.emit_image(path)
    }

    /// `process_file` without the location check. `walk` derives `path` by
    /// stripping the image root, so a category named like the image folder
    /// (`img/img/x.png`) is legitimate here.
    fn emit_image(&mut self, path: &Path) -> Result<(), GenerateError> {
        let filename = path
            .file_name()
            .ok_or_else(|| GenerateError::InvalidFileLocation(path.to_path_buf()))?
            .to_str()
            .ok_or_else(|| GenerateError::NonUtf8Path(path.to_path_buf()))?
            .to_string();

        let category_path = match path.parent() {
            Some(parent) => path_components(parent)?,
            None => Vec::new(),
        };
        let category_key = category_path.join("_");
        let macro_id = format!("{category_key}.{}", sanitize(&filename));
        let posix_path = category_path
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(filename.as_str()))
            .collect::<Vec<_>>()
            .join("/");

        let raw = &self.config.raw_image_folder;
        let image_macro = &self.config.image_macro;
        self.document.append_header("");
        self.document
            .append_header(format!("@{macro_id}.src: {raw}/{posix_path}"));
        self.document.append_header(format!(
            "@{macro_id}: @{image_macro}({raw},{posix_path},@0)"
        ));

        let size = self.config.preview_size;
        let label = display_label(&filename);
        self.document.append_body(format!(
            "|@{macro_id}({size})|_{label}_|`@{macro_id}({size})`|"
        ));

        self.record_macro(&category_path, macro_id);
        Ok(())
    }

    fn record_macro(&mut self, category_path: &[String], macro_id: String) {
        if category_path.is_empty() {
            self.report.root_macros.push(macro_id);
            return;
        }
        let depth = category_path.len() - 1;
        let category_key = category_path.join("_");
        let open = self
            .open_categories
            .get(depth)
            .copied()
            .filter(|&i| self.report.categories[i].label == category_key);
        match open {
            Some(i) => self.report.categories[i].macros.push(macro_id),
            // Called without a walk: no heading was opened for this category.
            None => {
                self.report.categories.push(CategoryReport {
                    depth,
                    label: category_key,
                    macros: vec![macro_id],
                });
                if self.open_categories.len() >= depth {
                    self.open_categories.truncate(depth);
                    self.open_categories.push(self.report.categories.len() - 1);
                }
            }
        }
    }

    /// Render and atomically replace the macro file.
    fn persist(&self) -> Result<PathBuf, GenerateError> {
        let output = self.output_path();
        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(self.document.render().as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&output)?;
        Ok(output)
    }
}

/// Normal components of `path` as strings, in order.
fn path_components(path: &Path) -> Result<Vec<String>, GenerateError> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(
                part.to_str()
                    .map(String::from)
                    .ok_or_else(|| GenerateError::NonUtf8Path(path.to_path_buf())),
            ),
            _ => None,
        })
        .collect()
}

/// Load-free entry point: generate and write the macro file for `config`.
pub fn run(config: &MacroConfig, base_dir: &Path) -> Result<GenerationReport, GenerateError> {
    MacroGenerator::new(config, base_dir).generate()
}
