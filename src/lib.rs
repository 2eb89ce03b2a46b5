//! # LiaScript Image Macros
//!
//! Generates a LiaScript macro file for a repository of images. Your
//! filesystem is the data source: directories become categories, images
//! become macros, and every category gets a showcase table.
//!
//! # Output Document
//!
//! ```text
//! <!--
//! repository: "https://github.com/owner/repo"
//!
//! @Maler.Pinsel.src: https://raw.githubusercontent.com/owner/repo/refs/heads/main/img/Maler/Pinsel.png
//! @Maler.Pinsel: @diagnostik_image(https://raw.githubusercontent.com/.../img,Maler/Pinsel.png,@0)
//! -->
//!
//! (how_to_use intro)
//!
//! ### Maler
//!
//! |Image|Name|Command|
//! |---|---|---|
//! |@Maler.Pinsel(10)|_Pinsel_|`@Maler.Pinsel(10)`|
//! ```
//!
//! A course imports the file with `import:` and then uses `@Maler.Pinsel(10)`
//! to show an image, or `@Maler.Pinsel.src` for its URL.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`generate`] | Walks the image root, emits macros and showcase rows, writes the file |
//! | [`config`] | `config.toml` / `config.yaml` loading, defaults, normalization, validation |
//! | [`naming`] | Filename → macro identifier and display label |
//! | [`classify`] | Image-by-extension and ignore-list tests |
//! | [`document`] | Header/body fragment buffer with the `-->` separator |
//! | [`url`] | GitHub repository URL → raw-content URL |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Full Regeneration
//!
//! Every run rescans the whole tree and rewrites the whole file. The tree is
//! small, the transform is cheap, and a single pass means the output is a
//! pure function of the tree and the config: running twice on an unchanged
//! tree yields a byte-identical file.
//!
//! ## Listing Order
//!
//! Entries appear in the order the filesystem lists them. Existing macro files
//! were produced that way, so sorting is opt-in (`sort_entries = true`)
//! rather than silently reordering established documents.
//!
//! ## Atomic Writes
//!
//! The document is assembled in memory and written through a temporary file
//! in the output directory, then renamed over the target. An error anywhere
//! in the run leaves the previous macro file as it was.

pub mod classify;
pub mod config;
pub mod document;
pub mod generate;
pub mod naming;
pub mod output;
pub mod url;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use config::{ConfigError, MacroConfig, load_config};
pub use document::DocumentBuilder;
pub use generate::{GenerateError, GenerationReport, MacroGenerator};
