// State module - inbound data model
// Browser contexts and the per-spec results the test driver reports

pub mod browser;
pub mod result;

pub use browser::{BrowserContext, BrowserSummary};
pub use result::TestResult;

use serde::Serialize;

/// Test status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TestStatus {
    Pass,
    Fail,
    Skip,
}
