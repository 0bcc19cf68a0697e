// Test naming rules and pluggable formatter overrides

use crate::state::{BrowserContext, TestResult};
use std::fmt;
use std::sync::Arc;

/// Override for test names or classnames
pub type NameFormatter = Arc<dyn Fn(&BrowserContext, &TestResult) -> String + Send + Sync>;

/// Override for failure message text
pub type ErrorFormatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Separator between classname segments
pub const CLASSNAME_SEPARATOR: char = '.';

/// Optional formatter overrides; `None` selects the built-in rule
#[derive(Clone, Default)]
pub struct Formatters {
    pub name: Option<NameFormatter>,
    pub class_name: Option<NameFormatter>,
    pub error: Option<ErrorFormatter>,
}

impl fmt::Debug for Formatters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatters")
            .field("name", &self.name.is_some())
            .field("class_name", &self.class_name.is_some())
            .field("error", &self.error.is_some())
            .finish()
    }
}

impl Formatters {
    pub fn with_name<F>(mut self, f: F) -> Self
    where
        F: Fn(&BrowserContext, &TestResult) -> String + Send + Sync + 'static,
    {
        self.name = Some(Arc::new(f));
        self
    }

    pub fn with_class_name<F>(mut self, f: F) -> Self
    where
        F: Fn(&BrowserContext, &TestResult) -> String + Send + Sync + 'static,
    {
        self.class_name = Some(Arc::new(f));
        self
    }

    pub fn with_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.error = Some(Arc::new(f));
        self
    }
}

/// Replace spaces and dots so a browser name is safe in classnames and paths
pub fn sanitize_browser_name(name: &str) -> String {
    name.replace([' ', '.'], "_")
}

/// Default test name: suite segments and description, space separated
pub fn default_name(result: &TestResult) -> String {
    format!("{} {}", result.suite_path(), result.description)
}

/// Default classname: `[browser.][package.]suite path`
pub fn default_class_name(
    browser: &BrowserContext,
    result: &TestResult,
    package: Option<&str>,
    use_browser_name: bool,
) -> String {
    let mut class_name = String::new();
    if use_browser_name {
        class_name.push_str(&sanitize_browser_name(&browser.name));
        class_name.push(CLASSNAME_SEPARATOR);
    }
    if let Some(package) = package.filter(|p| !p.is_empty()) {
        class_name.push_str(package);
        class_name.push(CLASSNAME_SEPARATOR);
    }
    class_name.push_str(&result.suite_path());
    class_name
}

/// Default failure text: drops the project base path from file references
pub fn format_error(message: &str, base_path: Option<&str>) -> String {
    let message = match base_path.filter(|b| !b.is_empty()) {
        Some(base) => {
            let prefix = format!("{}/", base.trim_end_matches('/'));
            message.replace(&prefix, "")
        }
        None => message.to_string(),
    };
    message.trim_end().to_string()
}
