// Report file output helpers

use crate::error::{ReportError, Result};
use std::path::Path;

/// File utilities for writing reports
pub struct FileUtils;

impl FileUtils {
    /// Create missing parent directories, then write `contents`
    pub async fn write_report(path: &Path, contents: String) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ReportError::io(parent, e))?;
        }
        tokio::fs::write(path, contents)
            .await
            .map_err(|e| ReportError::io(path, e))
    }

    /// Blocking variant for callers outside a tokio runtime
    pub fn write_report_blocking(path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
        }
        std::fs::write(path, contents).map_err(|e| ReportError::io(path, e))
    }
}
