// Tests for replaying recorded lifecycle event streams

use browser_junit::commands::{LifecycleEvent, replay_events};
use browser_junit::config::JunitConfig;
use browser_junit::report::JunitReporter;
use browser_junit::state::{BrowserContext, BrowserSummary, TestResult};
use std::path::PathBuf;

const EVENTS: &str = r#"
# two browsers, one failing spec
{"event":"run_start","browsers":[{"id":"1","name":"Chrome 120.0"},{"id":"2","name":"Firefox 121.0"}]}
{"event":"browser_log","browser":{"id":"1","name":"Chrome 120.0"},"level":"LOG","message":"'booting'"}
{"event":"spec_complete","browser":{"id":"1","name":"Chrome 120.0"},"result":{"suite":["Cart"],"description":"adds item","success":true,"time":12}}
{"event":"spec_complete","browser":{"id":"2","name":"Firefox 121.0"},"result":{"suite":["Cart"],"description":"adds item","success":false,"time":30,"log":["Expected 0 to be 1"]}}
{"event":"spec_complete","browser":{"id":"9","name":"Unknown"},"result":{"suite":["Cart"],"description":"ghost","success":true}}
{"event":"browser_complete","browser":{"id":"1","name":"Chrome 120.0","lastResult":{"total":1,"failed":0,"netTime":12}}}
{"event":"browser_complete","browser":{"id":"2","name":"Firefox 121.0","lastResult":{"total":1,"failed":1,"netTime":30}}}
{"event":"run_complete"}
{"event":"exit"}
{"event":"spec_complete","browser":{"id":"1","name":"Chrome 120.0"},"result":{"suite":["Cart"],"description":"after exit"}}
"#;

fn reporter(base: &std::path::Path) -> JunitReporter {
    let config = JunitConfig {
        suite: Some("shop".to_string()),
        output_dir: PathBuf::from("out"),
        ..JunitConfig::default()
    };
    JunitReporter::new(&config, base).expect("valid config")
}

#[tokio::test]
async fn test_replay_writes_one_report_per_browser() {
    // Arrange
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let mut reporter = reporter(temp_dir.path());

    // Act
    let summary = replay_events(EVENTS.as_bytes(), &mut reporter)
        .await
        .expect("replay succeeds");

    // Assert
    assert_eq!(summary.events, 9);
    assert_eq!(summary.specs, 3);
    assert_eq!(summary.browsers_completed, 2);
    assert_eq!(reporter.pending().pending(), 0);

    let out = temp_dir.path().join("out");
    let chrome = std::fs::read_to_string(out.join("TESTS-Chrome_120_0.xml")).expect("chrome report");
    let firefox =
        std::fs::read_to_string(out.join("TESTS-Firefox_121_0.xml")).expect("firefox report");

    assert!(chrome.contains("classname=\"Chrome_120_0.shop.Cart\""));
    assert!(chrome.contains("LOG: 'booting'"));
    assert!(!chrome.contains("ghost"));
    assert!(!chrome.contains("after exit"));
    assert!(firefox.contains("<failure type=\"\">Expected 0 to be 1</failure>"));
    assert!(firefox.contains("failures=\"1\""));
}

#[tokio::test]
async fn test_replay_without_exit_event_still_flushes() {
    // Arrange
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let mut reporter = reporter(temp_dir.path());
    let browser = BrowserContext::new("1", "Chrome");
    let done = BrowserContext::new("1", "Chrome").with_summary(BrowserSummary {
        total: Some(1),
        ..BrowserSummary::default()
    });
    let events = [
        LifecycleEvent::BrowserStart {
            browser: browser.clone(),
        },
        LifecycleEvent::SpecComplete {
            browser,
            result: TestResult::pass(["A"], "b", 1),
        },
        LifecycleEvent::BrowserComplete { browser: done },
    ];
    let stream: String = events
        .iter()
        .map(|e| serde_json::to_string(e).expect("serializable") + "\n")
        .collect();

    // Act
    let summary = replay_events(stream.as_bytes(), &mut reporter)
        .await
        .expect("replay succeeds");

    // Assert
    assert_eq!(summary.events, 3);
    assert!(temp_dir.path().join("out").join("TESTS-Chrome.xml").exists());
}

#[tokio::test]
async fn test_replay_rejects_malformed_line() {
    // Arrange
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let mut reporter = reporter(temp_dir.path());
    let stream = "{\"event\":\"run_complete\"}\n{not json}\n";

    // Act
    let result = replay_events(stream.as_bytes(), &mut reporter).await;

    // Assert
    let err = result.expect_err("malformed line");
    assert!(err.to_string().contains("line 2"));
}
