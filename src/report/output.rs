// Report file layout

use crate::report::format::sanitize_browser_name;
use std::path::{Path, PathBuf};

/// Default report file name when browser names are kept out of paths
pub const DEFAULT_REPORT_FILE: &str = "TESTS.xml";

/// Resolves where each browser's report lands
#[derive(Debug, Clone, PartialEq)]
pub struct OutputLayout {
    output_dir: PathBuf,
    output_file: Option<String>,
    use_browser_name: bool,
}

impl OutputLayout {
    /// `output_dir` is joined onto `base_path` unless it is already absolute
    pub fn new(
        base_path: &Path,
        output_dir: &Path,
        output_file: Option<String>,
        use_browser_name: bool,
    ) -> Self {
        Self {
            output_dir: base_path.join(output_dir),
            output_file,
            use_browser_name,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Whether every browser shares one absolute target (last writer wins)
    pub fn is_shared_target(&self) -> bool {
        self.output_file
            .as_deref()
            .is_some_and(|file| Path::new(file).is_absolute())
    }

    pub fn report_path(&self, browser_name: &str) -> PathBuf {
        let browser_dir = sanitize_browser_name(browser_name);
        match self.output_file.as_deref() {
            Some(file) if Path::new(file).is_absolute() => PathBuf::from(file),
            Some(file) if self.use_browser_name => self.output_dir.join(browser_dir).join(file),
            Some(file) => self.output_dir.join(file),
            None if self.use_browser_name => {
                self.output_dir.join(format!("TESTS-{}.xml", browser_dir))
            }
            None => self.output_dir.join(DEFAULT_REPORT_FILE),
        }
    }
}
