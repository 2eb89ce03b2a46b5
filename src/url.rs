//! Raw-content URLs for files in the GitHub repository that hosts the images.
//!
//! LiaScript loads images and the macro file itself over HTTP, so every path
//! in the generated document is turned into a `raw.githubusercontent.com`
//! URL on the `main` branch:
//!
//! ```text
//! https://github.com/owner/repo  +  img/cat/a.png
//!   → https://raw.githubusercontent.com/owner/repo/refs/heads/main/img/cat/a.png
//! ```

use thiserror::Error;

const HOST_MARKER: &str = "github.com/";
const RAW_HOST: &str = "https://raw.githubusercontent.com";
const BRANCH_REF: &str = "refs/heads/main";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("Repository URL is not a GitHub repository: {0:?}")]
    InvalidRepositoryUrl(String),
}

/// Build the raw-content URL of `relative_path` inside `repository_url`.
pub fn raw_base_url(repository_url: &str, relative_path: &str) -> Result<String, UrlError> {
    let trimmed = repository_url.trim_end_matches('/');
    let (_, owner_repo) = trimmed
        .split_once(HOST_MARKER)
        .ok_or_else(|| UrlError::InvalidRepositoryUrl(repository_url.to_string()))?;
    Ok(format!("{RAW_HOST}/{owner_repo}/{BRANCH_REF}/{relative_path}"))
}
