// Report module - lifecycle hooks and JUnit XML output

pub mod context;
pub mod format;
pub mod junit;
pub mod output;
pub mod pending;
pub mod schema;
pub mod xml;

use crate::state::{BrowserContext, TestResult};
pub use format::Formatters;
pub use junit::{JunitReporter, MessageBuffer};
pub use output::OutputLayout;
pub use pending::{ExitCallback, PendingWrites};
pub use schema::{ReportSchema, SchemaVariant};

/// Reporter lifecycle hooks, invoked in order by the test driver
pub trait Reporter: Send {
    /// Called once with every browser taking part in the run
    fn on_run_start(&mut self, browsers: &[BrowserContext]);

    /// Called when a browser (re)starts
    fn on_browser_start(&mut self, browser: &BrowserContext);

    /// Called for each console message captured from a browser
    fn on_browser_log(&mut self, browser: &BrowserContext, level: &str, message: &str);

    /// Called when a single spec finishes
    fn on_spec_complete(&mut self, browser: &BrowserContext, result: &TestResult);

    /// Called when a browser finishes; its summary is in `last_result`
    fn on_browser_complete(&mut self, browser: &BrowserContext);

    /// Called when the entire run finishes
    fn on_run_complete(&mut self);

    /// Called before the process exits; `done` fires once output is flushed
    fn on_exit(&mut self, done: ExitCallback);
}
