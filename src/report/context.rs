// Per-browser report state

use crate::report::xml::XmlElement;

/// Suite element being filled for one browser
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub browser_id: String,
    pub browser_name: String,
    suite: XmlElement,
    cases: usize,
}

impl ReportContext {
    pub fn new(
        browser_id: impl Into<String>,
        browser_name: impl Into<String>,
        suite: XmlElement,
    ) -> Self {
        Self {
            browser_id: browser_id.into(),
            browser_name: browser_name.into(),
            suite,
            cases: 0,
        }
    }

    pub fn add_case(&mut self, case: XmlElement) {
        self.suite.push(case);
        self.cases += 1;
    }

    pub fn case_count(&self) -> usize {
        self.cases
    }

    pub fn suite(&self) -> &XmlElement {
        &self.suite
    }

    pub fn suite_mut(&mut self) -> &mut XmlElement {
        &mut self.suite
    }

    pub fn into_suite(self) -> XmlElement {
        self.suite
    }
}
