// Replay command - drive the reporter from a recorded event stream

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::cli::ReplayArgs;
use crate::config::Config;
use crate::error::ReportError;
use crate::report::{JunitReporter, Reporter};
use crate::state::{BrowserContext, TestResult};

/// One line of the newline-delimited event stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LifecycleEvent {
    RunStart {
        #[serde(default)]
        browsers: Vec<BrowserContext>,
    },
    BrowserStart {
        browser: BrowserContext,
    },
    BrowserLog {
        browser: BrowserContext,
        #[serde(default)]
        level: String,
        message: String,
    },
    SpecComplete {
        browser: BrowserContext,
        result: TestResult,
    },
    BrowserComplete {
        browser: BrowserContext,
    },
    RunComplete,
    Exit,
}

impl LifecycleEvent {
    /// Parse one line; blank lines and `#` comments yield `None`
    pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Self>, ReportError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }
        serde_json::from_str(trimmed)
            .map(Some)
            .map_err(|e| ReportError::Event {
                line: line_no,
                message: e.to_string(),
            })
    }

    /// Forward to the matching reporter hook; `Exit` is handled by the caller
    pub fn dispatch(self, reporter: &mut dyn Reporter) {
        match self {
            Self::RunStart { browsers } => reporter.on_run_start(&browsers),
            Self::BrowserStart { browser } => reporter.on_browser_start(&browser),
            Self::BrowserLog {
                browser,
                level,
                message,
            } => reporter.on_browser_log(&browser, &level, &message),
            Self::SpecComplete { browser, result } => reporter.on_spec_complete(&browser, &result),
            Self::BrowserComplete { browser } => reporter.on_browser_complete(&browser),
            Self::RunComplete => reporter.on_run_complete(),
            Self::Exit => {}
        }
    }
}

/// Counts gathered while replaying
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    pub specs: usize,
    pub browsers_completed: usize,
}

/// Feed every event to `reporter`, then wait until its writes are flushed
pub async fn replay_events<R>(reader: R, reporter: &mut dyn Reporter) -> Result<ReplaySummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = ReplaySummary::default();
    let mut lines = reader.lines();
    let mut line_no = 0;

    while let Some(line) = lines.next_line().await.context("Failed to read event stream")? {
        line_no += 1;
        let Some(event) = LifecycleEvent::parse_line(&line, line_no)? else {
            continue;
        };
        summary.events += 1;
        match &event {
            LifecycleEvent::SpecComplete { .. } => summary.specs += 1,
            LifecycleEvent::BrowserComplete { .. } => summary.browsers_completed += 1,
            LifecycleEvent::Exit => {
                debug!(line = line_no, "exit event received");
                break;
            }
            _ => {}
        }
        event.dispatch(reporter);
    }

    let (tx, rx) = oneshot::channel();
    reporter.on_exit(Box::new(move || {
        let _ = tx.send(());
    }));
    let _ = rx.await;

    Ok(summary)
}

pub async fn handle_replay(args: &ReplayArgs, mut config: Config) -> Result<()> {
    args.apply(&mut config);
    let base_path = config.resolved_base_path();
    let mut reporter = JunitReporter::new(&config.junit, &base_path)
        .context("Invalid JUnit reporter configuration")?;

    let summary = if args.reads_stdin() {
        replay_events(BufReader::new(tokio::io::stdin()), &mut reporter).await?
    } else {
        let file = tokio::fs::File::open(&args.events)
            .await
            .with_context(|| format!("Failed to open event stream: {}", args.events.display()))?;
        replay_events(BufReader::new(file), &mut reporter).await?
    };

    info!(
        "Replayed {} event(s): {} spec(s), {} browser report(s) in {}",
        summary.events,
        summary.specs,
        summary.browsers_completed,
        reporter.layout().output_dir().display()
    );
    Ok(())
}
