// JUnit reporter - one XML report per browser, written asynchronously

use super::Reporter;
use crate::config::JunitConfig;
use crate::error::Result;
use crate::report::format::{self, Formatters};
use crate::report::output::OutputLayout;
use crate::report::pending::{ExitCallback, PendingWrites};
use crate::report::schema::{CaseRecord, ReportSchema, SchemaVariant, SuiteMeta};
use crate::report::xml::XmlElement;
use crate::state::{BrowserContext, TestResult};
use crate::time;
use crate::utils::FileUtils;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

static HOSTNAME: Lazy<String> = Lazy::new(|| {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "localhost".to_string())
});

/// Console output captured across the whole run.
///
/// Not scoped per browser: every legacy suite's system-out repeats all
/// messages captured so far, and only `on_run_complete` clears it.
#[derive(Debug, Default, Clone)]
pub struct MessageBuffer {
    lines: Vec<String>,
}

impl MessageBuffer {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// JUnit reporter
pub struct JunitReporter {
    package: Option<String>,
    use_browser_name: bool,
    properties: IndexMap<String, String>,
    base_path: PathBuf,
    layout: OutputLayout,
    schema: Box<dyn ReportSchema>,
    formatters: Formatters,
    messages: MessageBuffer,
    pending: PendingWrites,
}

impl JunitReporter {
    /// Create new JUnit reporter; fails on invalid configuration
    pub fn new(config: &JunitConfig, base_path: &Path) -> Result<Self> {
        config.validate()?;
        let variant = config.schema_variant()?;
        debug!(?variant, "selected report schema");

        Ok(Self {
            package: config.suite.clone().filter(|s| !s.is_empty()),
            use_browser_name: config.use_browser_name,
            properties: config.properties.clone(),
            base_path: base_path.to_path_buf(),
            layout: OutputLayout::new(
                base_path,
                &config.output_dir,
                config.output_file.clone(),
                config.use_browser_name,
            ),
            schema: variant.into_schema(),
            formatters: Formatters::default(),
            messages: MessageBuffer::default(),
            pending: PendingWrites::new(),
        })
    }

    pub fn with_formatters(mut self, formatters: Formatters) -> Self {
        self.formatters = formatters;
        self
    }

    pub fn variant(&self) -> SchemaVariant {
        self.schema.variant()
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    pub fn messages(&self) -> &MessageBuffer {
        &self.messages
    }

    /// Handle on the in-flight write counter
    pub fn pending(&self) -> PendingWrites {
        self.pending.clone()
    }

    fn test_name(&self, browser: &BrowserContext, result: &TestResult) -> String {
        match &self.formatters.name {
            Some(formatter) => formatter(browser, result),
            None => format::default_name(result),
        }
    }

    fn class_name(&self, browser: &BrowserContext, result: &TestResult) -> String {
        match &self.formatters.class_name {
            Some(formatter) => formatter(browser, result),
            None => format::default_class_name(
                browser,
                result,
                self.package.as_deref(),
                self.use_browser_name,
            ),
        }
    }

    fn error_text(&self, message: &str) -> String {
        match &self.formatters.error {
            Some(formatter) => formatter(message),
            None => format::format_error(message, self.base_path.to_str()),
        }
    }

    fn write_report(&self, path: PathBuf, document: XmlElement) {
        let guard = self.pending.begin();
        let xml = match document.to_document_string() {
            Ok(xml) => xml,
            Err(e) => {
                warn!("Cannot write JUnit xml\n\t{}", e);
                return;
            }
        };

        debug!(path = %path.display(), "issuing report write");
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    let outcome = FileUtils::write_report(&path, xml).await;
                    log_write_outcome(&path, outcome);
                    drop(guard);
                });
            }
            Err(_) => {
                let outcome = FileUtils::write_report_blocking(&path, &xml);
                log_write_outcome(&path, outcome);
                drop(guard);
            }
        }
    }
}

fn log_write_outcome(path: &Path, outcome: Result<()>) {
    match outcome {
        Ok(()) => info!("JUnit results written to \"{}\".", path.display()),
        Err(e) => warn!("Cannot write JUnit xml\n\t{}", e),
    }
}

impl Reporter for JunitReporter {
    fn on_run_start(&mut self, browsers: &[BrowserContext]) {
        for browser in browsers {
            self.on_browser_start(browser);
        }
    }

    fn on_browser_start(&mut self, browser: &BrowserContext) {
        let timestamp = time::now_report_timestamp();
        let meta = SuiteMeta {
            package: self.package.as_deref(),
            hostname: HOSTNAME.as_str(),
            timestamp: &timestamp,
            properties: &self.properties,
        };
        self.schema.open_suite(browser, &meta);
    }

    fn on_browser_log(&mut self, _browser: &BrowserContext, level: &str, message: &str) {
        if level.is_empty() {
            self.messages.push(message);
        } else {
            self.messages.push(format!("{}: {}", level, message));
        }
    }

    fn on_spec_complete(&mut self, browser: &BrowserContext, result: &TestResult) {
        if !self.schema.has_suite(&browser.id) {
            return;
        }

        let class_name = self
            .schema
            .uses_class_name()
            .then(|| self.class_name(browser, result));
        let failures = if result.success || result.skipped {
            Vec::new()
        } else {
            result.log.iter().map(|m| self.error_text(m)).collect()
        };
        let case = CaseRecord {
            name: self.test_name(browser, result),
            class_name,
            result,
            failures,
        };
        self.schema.add_test_case(&browser.id, &case);
    }

    fn on_browser_complete(&mut self, browser: &BrowserContext) {
        let Some(summary) = browser.last_result.as_ref() else {
            return;
        };
        let system_out = self.messages.joined();
        let Some(document) = self.schema.close_suite(&browser.id, summary, &system_out) else {
            return;
        };

        if self.layout.is_shared_target() {
            debug!(browser = %browser.name, "absolute output_file is shared by all browsers");
        }
        let path = self.layout.report_path(&browser.name);
        self.write_report(path, document);
    }

    fn on_run_complete(&mut self) {
        self.messages.clear();
    }

    fn on_exit(&mut self, done: ExitCallback) {
        self.pending.on_idle(done);
    }
}
