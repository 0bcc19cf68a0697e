// Per-spec test result structures

use crate::state::TestStatus;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Outcome of a single test case as reported by the driver
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    /// Enclosing suite names, outermost first
    #[serde(default)]
    pub suite: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub skipped: bool,
    /// Elapsed time in milliseconds
    #[serde(default)]
    pub time: Option<u64>,
    /// Failure messages, empty when the spec passed
    #[serde(default)]
    pub log: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, String>>,
}

impl TestResult {
    /// Create a pass result
    pub fn pass<S: Into<String>>(
        suite: impl IntoIterator<Item = S>,
        description: impl Into<String>,
        time_ms: u64,
    ) -> Self {
        Self {
            suite: suite.into_iter().map(Into::into).collect(),
            description: description.into(),
            success: true,
            time: Some(time_ms),
            ..Self::default()
        }
    }

    /// Create a fail result carrying one entry per failure message
    pub fn fail<S: Into<String>>(
        suite: impl IntoIterator<Item = S>,
        description: impl Into<String>,
        messages: Vec<String>,
        time_ms: u64,
    ) -> Self {
        Self {
            suite: suite.into_iter().map(Into::into).collect(),
            description: description.into(),
            success: false,
            time: Some(time_ms),
            log: messages,
            ..Self::default()
        }
    }

    /// Create a skip result
    pub fn skip<S: Into<String>>(
        suite: impl IntoIterator<Item = S>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            suite: suite.into_iter().map(Into::into).collect(),
            description: description.into(),
            skipped: true,
            ..Self::default()
        }
    }

    /// Attach arbitrary key/value properties
    pub fn with_properties<K, V>(mut self, properties: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.properties = Some(
            properties
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Suite segments joined with single spaces
    pub fn suite_path(&self) -> String {
        self.suite.join(" ")
    }

    pub fn status(&self) -> TestStatus {
        if self.skipped {
            TestStatus::Skip
        } else if self.success {
            TestStatus::Pass
        } else {
            TestStatus::Fail
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_result_pass() {
        let result = TestResult::pass(["Widgets"], "renders", 100);
        assert_eq!(result.suite, vec!["Widgets".to_string()]);
        assert_eq!(result.status(), TestStatus::Pass);
        assert_eq!(result.time, Some(100));
        assert!(result.log.is_empty());
    }

    #[test]
    fn test_test_result_fail() {
        let result = TestResult::fail(["A", "B"], "breaks", vec!["boom".to_string()], 5);
        assert_eq!(result.status(), TestStatus::Fail);
        assert_eq!(result.log, vec!["boom".to_string()]);
        assert_eq!(result.suite_path(), "A B");
    }

    #[test]
    fn test_skip_wins_over_failure() {
        let mut result = TestResult::skip(["A"], "pending");
        result.log.push("ignored".to_string());
        assert_eq!(result.status(), TestStatus::Skip);
        assert!(result.time.is_none());
    }

    #[test]
    fn test_deserialize_driver_payload() {
        let json = r#"{
            "suite": ["Login", "form"],
            "description": "rejects empty password",
            "success": false,
            "skipped": false,
            "time": 12,
            "log": ["Expected true to be false"],
            "properties": {"owner": "auth", "testrun_comment": "flaky"}
        }"#;

        let result: TestResult = serde_json::from_str(json).expect("valid payload");
        assert_eq!(result.suite_path(), "Login form");
        assert_eq!(result.time, Some(12));
        let keys: Vec<_> = result
            .properties
            .as_ref()
            .map(|p| p.keys().cloned().collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["owner".to_string(), "testrun_comment".to_string()]);
    }

    #[test]
    fn test_deserialize_minimal_payload() {
        let result: TestResult =
            serde_json::from_str(r#"{"description": "x"}"#).expect("minimal payload");
        assert!(result.suite.is_empty());
        assert!(!result.success);
        assert!(result.time.is_none());
        assert!(result.properties.is_none());
    }
}
