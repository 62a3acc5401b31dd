//! Run-log and console logging setup.
//!
//! Console output goes through a standard fmt layer gated by
//! `RUST_LOG`. The run log is a single file in the temp directory,
//! recreated at the start of every run; each line is
//! `<ISO-8601 UTC timestamp> > <message>`, with error lines prefixed
//! `ERROR:`.

use std::fmt::{self, Write as _};
use std::fs::File;
use std::sync::Mutex;

use anyhow::Context as _;
use chrono::{SecondsFormat, Utc};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

use stagehand_core::paths;

struct RunLogFormat;

impl<S, N> FormatEvent<S, N> for RunLogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        write!(writer, "{stamp} > ")?;
        if *event.metadata().level() == Level::ERROR {
            write!(writer, "ERROR: ")?;
        }
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

pub fn init() -> anyhow::Result<()> {
    let log_path = paths::log_file_path();
    let log_file = File::create(&log_path)
        .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stagehand=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(RunLogFormat)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Arc;

    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for SharedBuf {
        type Writer = SharedBuf;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn run_log_lines_carry_timestamp_and_error_prefix() {
        let buf = SharedBuf::default();
        let subscriber = tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .event_format(RunLogFormat)
                .with_ansi(false)
                .with_writer(buf.clone()),
        );

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!("boom");
            tracing::info!("fine");
        });

        let out = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let mut lines = out.lines();

        let first = lines.next().unwrap();
        assert!(first.contains(" > ERROR: "));
        assert!(first.ends_with("boom"));
        let stamp = first.split(" > ").next().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());

        let second = lines.next().unwrap();
        assert!(second.contains(" > "));
        assert!(!second.contains("ERROR:"));
    }
}
