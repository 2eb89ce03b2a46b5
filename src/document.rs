//! Two-part output document.
//!
//! A macro file is a LiaScript header comment followed by markdown:
//!
//! ```text
//! <!--                         ┐
//! repository: "..."            │ header: macro definitions
//! @Cat.img.src: https://...    │
//! @Cat.img: @diagnostik_image( ┘
//! -->
//!
//! # How to use                 ┐
//! ### Cat                      │ body: intro and showcase tables
//! |Image|Name|Command|         ┘
//! ```
//!
//! The generator interleaves writes to both parts while walking, so each part
//! is an ordered list of fragments joined only at [`DocumentBuilder::render`].

/// Closes the header comment. Always emitted, even for empty parts.
const SEPARATOR: &str = "\n-->\n\n";

/// Append-only header/body fragment buffer.
#[derive(Debug, Default, Clone)]
pub struct DocumentBuilder {
    header: Vec<String>,
    body: Vec<String>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_header(&mut self, text: impl Into<String>) {
        self.header.push(text.into());
    }

    pub fn append_body(&mut self, text: impl Into<String>) {
        self.body.push(text.into());
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// Join header fragments, the `-->` separator, and body fragments.
    pub fn render(&self) -> String {
        format!(
            "{}{}{}",
            self.header.join("\n"),
            SEPARATOR,
            self.body.join("\n")
        )
    }
}
