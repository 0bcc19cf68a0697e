use crate::time;
use tracing::{Event, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Single-line log format: `LEVEL [HH:MM:SS] junit: message fields`
pub struct ReportFormatter;

impl<S, N> FormatEvent<S, N> for ReportFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let level = match *event.metadata().level() {
            tracing::Level::TRACE => "TRACE",
            tracing::Level::DEBUG => "DEBUG",
            tracing::Level::INFO => "INFO",
            tracing::Level::WARN => "WARN",
            tracing::Level::ERROR => "ERROR",
        };

        write!(writer, "{:<5} [{}] junit: ", level, time::now_log_clock())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Default filter directive; `RUST_LOG` takes precedence
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "browser_junit=debug,warn"
    } else {
        "browser_junit=warn,error"
    }
}

/// Install the global subscriber, writing to stderr
pub fn init(verbose: bool) {
    let filter = default_filter(verbose);
    let _ = tracing_subscriber::fmt()
        .event_format(ReportFormatter)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .try_init();
}
