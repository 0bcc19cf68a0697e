// Browser (execution context) identity and its end-of-run summary

use serde::{Deserialize, Serialize};

/// One isolated execution environment, usually a browser instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserContext {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    /// Summary attached by the driver once the browser finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_result: Option<BrowserSummary>,
}

impl BrowserContext {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    pub fn with_summary(mut self, summary: BrowserSummary) -> Self {
        self.last_result = Some(summary);
        self
    }

    /// Full user agent string, falling back to the short name
    pub fn display_full_name(&self) -> &str {
        if self.full_name.is_empty() {
            &self.name
        } else {
            &self.full_name
        }
    }
}

/// Aggregated counts for a finished browser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserSummary {
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub failed: Option<u32>,
    #[serde(default)]
    pub skipped: Option<u32>,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub disconnected: bool,
    /// Net execution time in milliseconds
    #[serde(default)]
    pub net_time: Option<u64>,
}

impl BrowserSummary {
    /// Whether the browser errored or dropped its connection
    pub fn has_errors(&self) -> bool {
        self.error || self.disconnected
    }
}
