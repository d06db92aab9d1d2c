//! Writing a compiled artifact to disk under a unique, slugified name.

use crate::Artifact;
use deunicode::deunicode;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output path has no parent directory: {0}")]
    NoParent(PathBuf),
}

/// Lowercase ASCII slug of a page title: `"Café Menu!"` → `"cafe-menu"`
pub fn slugify(title: &str) -> String {
    let ascii = deunicode(title).to_lowercase();
    let mut slug = String::with_capacity(ascii.len());
    for ch in ascii.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// File name for an export: `<slug>-<suffix>.html`
pub fn export_file_name(title: &str, suffix: &str) -> String {
    let slug = slugify(title);
    let slug = if slug.is_empty() { "page" } else { slug.as_str() };
    format!("{}-{}.html", slug, suffix)
}

/// Millisecond timestamp used as the uniqueness suffix
pub fn timestamp_suffix() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

/// Write `artifact` into `dir` under a fresh name and return its path
pub fn deliver(artifact: &Artifact, title: &str, dir: &Path) -> Result<PathBuf, DeliveryError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(title, &timestamp_suffix()));
    write_artifact(artifact, &path)?;
    info!(path = %path.display(), bytes = artifact.html.len(), "Exported page");
    Ok(path)
}

/// Write the artifact's HTML to `path` through a temporary file in the same
/// directory. The temporary file is renamed into place on success and
/// removed on failure, so `path` never holds a partial page.
pub fn write_artifact(artifact: &Artifact, path: &Path) -> Result<(), DeliveryError> {
    let dir = path
        .parent()
        .ok_or_else(|| DeliveryError::NoParent(path.to_path_buf()))?;

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    debug!(temp = %temp.path().display(), "Writing artifact");
    temp.write_all(artifact.html.as_bytes())?;
    temp.flush()?;
    temp.persist(path).map_err(|e| DeliveryError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("My Landing Page"), "my-landing-page");
        assert_eq!(slugify("  Café -- Menü!  "), "cafe-menu");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name("My Site", "1700000000000"),
            "my-site-1700000000000.html"
        );
        assert_eq!(export_file_name("", "1"), "page-1.html");
    }

    #[test]
    fn test_timestamp_suffix_is_numeric() {
        let suffix = timestamp_suffix();
        assert!(!suffix.is_empty());
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }
}
