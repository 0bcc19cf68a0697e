// Report schema strategies
//
// Legacy writes one <testsuite> document per browser. Compact writes a
// single <testExecutions> document whose <file> children accumulate across
// every browser for the lifetime of the schema.

use crate::error::{ReportError, Result};
use crate::report::context::ReportContext;
use crate::report::xml::XmlElement;
use crate::state::{BrowserContext, BrowserSummary, TestResult, TestStatus};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Property whose value is written as element text rather than an attribute
pub const TESTRUN_COMMENT_PROPERTY: &str = "testrun_comment";

/// Version attribute on the compact root element
pub const COMPACT_SCHEMA_VERSION: u8 = 1;

/// Placeholder path on the compact <file> element
pub const COMPACT_FILE_PATH: &str = "fixedString";

/// Legacy suites always carry this id; it is not unique across browsers
pub const LEGACY_SUITE_ID: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVariant {
    Legacy,
    Compact,
}

impl SchemaVariant {
    /// 0 or absent selects Legacy, 1 selects Compact
    pub fn from_xml_version(version: Option<u8>) -> Result<Self> {
        match version {
            None | Some(0) => Ok(Self::Legacy),
            Some(COMPACT_SCHEMA_VERSION) => Ok(Self::Compact),
            Some(other) => Err(ReportError::Config(format!(
                "unsupported xml_version {} (expected 0 or {})",
                other, COMPACT_SCHEMA_VERSION
            ))),
        }
    }

    pub fn into_schema(self) -> Box<dyn ReportSchema> {
        match self {
            Self::Legacy => Box::new(LegacySchema::default()),
            Self::Compact => Box::new(CompactSchema::default()),
        }
    }
}

/// Suite-level metadata stamped when a browser starts
#[derive(Debug, Clone)]
pub struct SuiteMeta<'a> {
    pub package: Option<&'a str>,
    pub hostname: &'a str,
    pub timestamp: &'a str,
    pub properties: &'a IndexMap<String, String>,
}

/// A formatted test case ready to be placed in a suite
#[derive(Debug, Clone)]
pub struct CaseRecord<'a> {
    pub name: String,
    /// Only computed for schemas that report classnames
    pub class_name: Option<String>,
    pub result: &'a TestResult,
    /// Formatted failure messages, in reported order
    pub failures: Vec<String>,
}

pub trait ReportSchema: Send {
    fn variant(&self) -> SchemaVariant;

    /// Whether test cases carry a classname attribute
    fn uses_class_name(&self) -> bool;

    /// Open the suite for a browser; no-op when it is already open
    fn open_suite(&mut self, browser: &BrowserContext, meta: &SuiteMeta<'_>);

    fn has_suite(&self, browser_id: &str) -> bool;

    /// Append a test case; returns false when the browser has no open suite
    fn add_test_case(&mut self, browser_id: &str, case: &CaseRecord<'_>) -> bool;

    /// Finalize a browser's suite and return the document to write.
    /// The browser's handle is released.
    fn close_suite(
        &mut self,
        browser_id: &str,
        summary: &BrowserSummary,
        system_out: &str,
    ) -> Option<XmlElement>;
}

/// Elapsed seconds for legacy `time` attributes
pub fn legacy_seconds(time_ms: Option<u64>) -> f64 {
    time_ms.unwrap_or(0) as f64 / 1000.0
}

/// Compact durations never report zero
pub fn compact_duration(time_ms: Option<u64>) -> u64 {
    match time_ms {
        None | Some(0) => 1,
        Some(ms) => ms,
    }
}

fn properties_element<'a>(properties: impl IntoIterator<Item = (&'a str, &'a str)>) -> XmlElement {
    let mut element = XmlElement::new("properties");
    for (name, value) in properties {
        let property = XmlElement::new("property").attr("name", name);
        element.push(if name == TESTRUN_COMMENT_PROPERTY {
            property.text(value)
        } else {
            property.attr("value", value)
        });
    }
    element
}

#[derive(Debug, Default)]
pub struct LegacySchema {
    suites: HashMap<String, ReportContext>,
}

impl LegacySchema {
    fn test_case(case: &CaseRecord<'_>) -> XmlElement {
        let result = case.result;
        let mut testcase = XmlElement::new("testcase")
            .attr("name", &case.name)
            .attr("time", legacy_seconds(result.time))
            .attr("classname", case.class_name.as_deref().unwrap_or_default());

        if let Some(properties) = &result.properties {
            testcase.push(properties_element(
                properties.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            ));
        }

        match result.status() {
            TestStatus::Skip => testcase.push(XmlElement::new("skipped")),
            TestStatus::Fail => {
                for failure in &case.failures {
                    testcase.push(XmlElement::new("failure").attr("type", "").text(failure));
                }
            }
            TestStatus::Pass => {}
        }
        testcase
    }
}

impl ReportSchema for LegacySchema {
    fn variant(&self) -> SchemaVariant {
        SchemaVariant::Legacy
    }

    fn uses_class_name(&self) -> bool {
        true
    }

    fn open_suite(&mut self, browser: &BrowserContext, meta: &SuiteMeta<'_>) {
        if self.suites.contains_key(&browser.id) {
            return;
        }

        let properties = std::iter::once(("browser.fullName", browser.display_full_name())).chain(
            meta.properties
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );
        let suite = XmlElement::new("testsuite")
            .attr("name", &browser.name)
            .attr("package", meta.package.unwrap_or_default())
            .attr("timestamp", meta.timestamp)
            .attr("id", LEGACY_SUITE_ID)
            .attr("hostname", meta.hostname)
            .child(properties_element(properties));

        debug!(browser = %browser.name, "opened legacy suite");
        self.suites.insert(
            browser.id.clone(),
            ReportContext::new(&browser.id, &browser.name, suite),
        );
    }

    fn has_suite(&self, browser_id: &str) -> bool {
        self.suites.contains_key(browser_id)
    }

    fn add_test_case(&mut self, browser_id: &str, case: &CaseRecord<'_>) -> bool {
        match self.suites.get_mut(browser_id) {
            Some(context) => {
                context.add_case(Self::test_case(case));
                true
            }
            None => false,
        }
    }

    fn close_suite(
        &mut self,
        browser_id: &str,
        summary: &BrowserSummary,
        system_out: &str,
    ) -> Option<XmlElement> {
        let mut context = self.suites.remove(browser_id)?;
        debug!(
            browser = %context.browser_name,
            cases = context.case_count(),
            "closing legacy suite"
        );

        let suite = context.suite_mut();
        suite.set_attr("tests", summary.total.unwrap_or(0));
        suite.set_attr("errors", u8::from(summary.has_errors()));
        suite.set_attr("failures", summary.failed.unwrap_or(0));
        suite.set_attr("time", legacy_seconds(summary.net_time));
        suite.push(XmlElement::new("system-out").cdata(format!("{}\n", system_out)));
        suite.push(XmlElement::new("system-err"));

        Some(context.into_suite())
    }
}

/// Compact schema state: one shared root, one <file> per browser start
#[derive(Debug, Default)]
pub struct CompactSchema {
    // Retained after close; every later write repeats them
    files: Vec<ReportContext>,
    open: HashSet<String>,
}

impl CompactSchema {
    fn test_case(case: &CaseRecord<'_>) -> XmlElement {
        let result = case.result;
        let mut testcase = XmlElement::new("testCase")
            .attr("name", &case.name)
            .attr("duration", compact_duration(result.time));

        match result.status() {
            TestStatus::Skip => {
                testcase.push(XmlElement::new("skipped").attr("message", "skipped"));
            }
            TestStatus::Fail => {
                for failure in &case.failures {
                    testcase.push(XmlElement::new("failure").attr("message", failure));
                }
            }
            TestStatus::Pass => {}
        }
        testcase
    }

    fn open_file_mut(&mut self, browser_id: &str) -> Option<&mut ReportContext> {
        if !self.open.contains(browser_id) {
            return None;
        }
        self.files
            .iter_mut()
            .rev()
            .find(|context| context.browser_id == browser_id)
    }

    fn document(&self) -> XmlElement {
        self.files.iter().fold(
            XmlElement::new("testExecutions").attr("version", COMPACT_SCHEMA_VERSION),
            |root, context| root.child(context.suite().clone()),
        )
    }
}

impl ReportSchema for CompactSchema {
    fn variant(&self) -> SchemaVariant {
        SchemaVariant::Compact
    }

    fn uses_class_name(&self) -> bool {
        false
    }

    fn open_suite(&mut self, browser: &BrowserContext, _meta: &SuiteMeta<'_>) {
        if !self.open.insert(browser.id.clone()) {
            return;
        }
        debug!(browser = %browser.name, "opened compact file group");
        self.files.push(ReportContext::new(
            &browser.id,
            &browser.name,
            XmlElement::new("file").attr("path", COMPACT_FILE_PATH),
        ));
    }

    fn has_suite(&self, browser_id: &str) -> bool {
        self.open.contains(browser_id)
    }

    fn add_test_case(&mut self, browser_id: &str, case: &CaseRecord<'_>) -> bool {
        match self.open_file_mut(browser_id) {
            Some(context) => {
                context.add_case(Self::test_case(case));
                true
            }
            None => false,
        }
    }

    fn close_suite(
        &mut self,
        browser_id: &str,
        _summary: &BrowserSummary,
        _system_out: &str,
    ) -> Option<XmlElement> {
        if !self.open.remove(browser_id) {
            return None;
        }
        debug!(browser_id, files = self.files.len(), "rendering compact document");
        Some(self.document())
    }
}
