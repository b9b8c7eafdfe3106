//! Plain-text export of generated results
//!
//! Files are written UTF-8 into a caller-chosen directory, named
//! `listing_manual_<YYYYMMDD-HHMMSS>.txt` or `listing_batch_<...>.txt`.

use crate::error::ExportError;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Heading written before the audit text
pub const AUDIT_MARKER: &str = "=== AUDIT ===";

/// Heading written before the rewrite text
pub const REWRITE_MARKER: &str = "=== OPTIMIZED LISTING ===";

/// Write the audit and rewrite of a single-item run
///
/// Fails without touching the filesystem when both texts are blank.
pub fn export_manual(dir: &Path, audit: &str, rewrite: &str) -> Result<PathBuf, ExportError> {
    if audit.trim().is_empty() && rewrite.trim().is_empty() {
        return Err(ExportError::NothingToExport("an optimization"));
    }

    let content = format!(
        "{}\n\n{}\n\n{}\n\n{}\n",
        AUDIT_MARKER, audit, REWRITE_MARKER, rewrite
    );
    write_export(dir, "listing_manual", &content)
}

/// Write a rendered batch report verbatim
pub fn export_batch(dir: &Path, markdown: &str) -> Result<PathBuf, ExportError> {
    if markdown.trim().is_empty() {
        return Err(ExportError::NothingToExport("a batch optimization"));
    }

    write_export(dir, "listing_batch", markdown)
}

fn write_export(dir: &Path, prefix: &str, content: &str) -> Result<PathBuf, ExportError> {
    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    let path = dir.join(format!("{}_{}.txt", prefix, timestamp));

    fs::write(&path, content).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;

    info!("Exported {} bytes to {}", content.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_count(dir: &Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_manual_export_content() {
        let dir = TempDir::new().unwrap();
        let path = export_manual(dir.path(), "weak title", "STRONG TITLE").unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("listing_manual_"));
        assert!(name.ends_with(".txt"));
        // listing_manual_ + YYYYMMDD-HHMMSS + .txt
        assert_eq!(name.len(), "listing_manual_".len() + 15 + 4);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "=== AUDIT ===\n\nweak title\n\n=== OPTIMIZED LISTING ===\n\nSTRONG TITLE\n"
        );
    }

    #[test]
    fn test_manual_export_with_only_audit() {
        let dir = TempDir::new().unwrap();
        let path = export_manual(dir.path(), "audit only", "").unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains(AUDIT_MARKER));
        assert!(content.contains(REWRITE_MARKER));
    }

    #[test]
    fn test_manual_export_without_results_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let err = export_manual(dir.path(), "", "  \n").unwrap_err();

        assert!(matches!(err, ExportError::NothingToExport(_)));
        assert_eq!(
            err.to_string(),
            "No results to export. Run an optimization first."
        );
        assert_eq!(file_count(dir.path()), 0);
    }

    #[test]
    fn test_batch_export_verbatim() {
        let dir = TempDir::new().unwrap();
        let markdown = "## B0DJ33ZFJH\n\n❌ Error fetching from Keepa: `boom`\n\n---";
        let path = export_batch(dir.path(), markdown).unwrap();

        assert!(path
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("listing_batch_"));
        assert_eq!(fs::read_to_string(path).unwrap(), markdown);
    }

    #[test]
    fn test_batch_export_without_results() {
        let dir = TempDir::new().unwrap();
        let err = export_batch(dir.path(), "").unwrap_err();
        assert!(err.to_string().contains("batch"));
        assert_eq!(file_count(dir.path()), 0);
    }

    #[test]
    fn test_export_into_missing_dir_is_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = export_batch(&missing, "report").unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
