//! A plain-text logger for the `log` crate.
//!
//! The library itself only emits records through the `log` macros (cache
//! hits and misses at `trace`, stale font evictions and line-limit
//! truncation at `debug`, lock poisoning at `warn`). [`LayoutLogger`] is a
//! small `Log` implementation a host can install to see them.
//!
//! Optional tracing integration is available via `LayoutTracingLayer` when
//! the `tracing` feature is enabled.

use std::io::{self, Write};
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use time::{OffsetDateTime, format_description::OwnedFormatItem};

use crate::sync::lock_recover;

/// Logger writing one line per record.
///
/// # Thread Safety
///
/// The writer and the last printed timestamp sit behind mutexes with
/// poison recovery, so records from several threads never interleave
/// within a line.
pub struct LayoutLogger {
    writer: Mutex<Box<dyn Write + Send>>,
    level: LevelFilter,
    show_time: bool,
    omit_repeated_times: bool,
    show_level: bool,
    show_target: bool,
    show_path: bool,
    time_format: OwnedFormatItem,
    last_time: Mutex<Option<String>>,
}

impl std::fmt::Debug for LayoutLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutLogger")
            .field("level", &self.level)
            .field("show_time", &self.show_time)
            .field("show_level", &self.show_level)
            .field("show_target", &self.show_target)
            .field("show_path", &self.show_path)
            .finish_non_exhaustive()
    }
}

impl Default for LayoutLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutLogger {
    /// Logger writing to stderr at `Info`.
    #[must_use]
    pub fn new() -> Self {
        let time_format = time::format_description::parse_owned::<2>("[hour]:[minute]:[second]")
            .unwrap_or_else(|_| OwnedFormatItem::Literal(Vec::<u8>::new().into_boxed_slice()));
        Self {
            writer: Mutex::new(Box::new(io::stderr())),
            level: LevelFilter::Info,
            show_time: true,
            omit_repeated_times: true,
            show_level: true,
            show_target: true,
            show_path: false,
            time_format,
            last_time: Mutex::new(None),
        }
    }

    /// Write to `writer` instead of stderr.
    #[must_use]
    pub fn writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writer = Mutex::new(Box::new(writer));
        self
    }

    /// Set the minimum log level.
    #[must_use]
    pub fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Enable or disable timestamps.
    #[must_use]
    pub fn show_time(mut self, show: bool) -> Self {
        self.show_time = show;
        self
    }

    /// Blank out a timestamp equal to the previous one.
    #[must_use]
    pub fn omit_repeated_times(mut self, omit: bool) -> Self {
        self.omit_repeated_times = omit;
        self
    }

    #[must_use]
    pub fn show_level(mut self, show: bool) -> Self {
        self.show_level = show;
        self
    }

    /// Prefix messages with the record target (the emitting module).
    #[must_use]
    pub fn show_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    /// Append `file:line` to each message.
    #[must_use]
    pub fn show_path(mut self, show: bool) -> Self {
        self.show_path = show;
        self
    }

    /// Override the time format, in `time` format description syntax.
    /// Invalid formats are ignored.
    #[must_use]
    pub fn time_format(mut self, format: &str) -> Self {
        if let Ok(parsed) = time::format_description::parse_owned::<2>(format) {
            self.time_format = parsed;
        }
        self
    }

    /// Install as the global logger.
    ///
    /// # Errors
    ///
    /// Fails if a global logger is already installed.
    pub fn init(self) -> Result<(), SetLoggerError> {
        log::set_max_level(self.level);
        log::set_boxed_logger(Box::new(self))
    }

    fn format_time(&self) -> String {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        now.format(&self.time_format)
            .unwrap_or_else(|_| now.to_string())
    }

    fn format_record(&self, record: &Record<'_>) -> String {
        let mut line = String::new();

        if self.show_time {
            let time_str = self.format_time();
            let display = if self.omit_repeated_times {
                let mut last = lock_recover(&self.last_time);
                if last.as_ref() == Some(&time_str) {
                    " ".repeat(time_str.len())
                } else {
                    *last = Some(time_str.clone());
                    time_str
                }
            } else {
                time_str
            };
            line.push_str(&display);
            line.push(' ');
        }

        if self.show_level {
            line.push_str(&format!("{:<5} ", record.level()));
        }

        if self.show_target && !record.target().is_empty() {
            line.push_str(record.target());
            line.push_str(": ");
        }

        line.push_str(&record.args().to_string());

        if self.show_path
            && let Some(path) = record.file()
        {
            line.push_str(" (");
            line.push_str(path);
            if let Some(line_no) = record.line() {
                line.push_str(&format!(":{line_no}"));
            }
            line.push(')');
        }

        line
    }

    fn write_line(&self, line: &str) {
        let mut writer = lock_recover(&self.writer);
        // A logger has nowhere to report its own write failures.
        let _ = writeln!(writer, "{line}");
    }
}

impl Log for LayoutLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.format_record(record);
        self.write_line(&line);
    }

    fn flush(&self) {
        let _ = lock_recover(&self.writer).flush();
    }
}

#[cfg(feature = "tracing")]
mod tracing_integration {
    use super::LayoutLogger;
    use log::{Level, Log};
    use std::fmt::Debug;

    use tracing::field::{Field, Visit};
    use tracing::{Event, Level as TracingLevel, Subscriber};
    use tracing_subscriber::{Layer, layer::Context};

    /// Tracing layer that writes events through a [`LayoutLogger`].
    #[derive(Debug, Default)]
    pub struct LayoutTracingLayer {
        logger: LayoutLogger,
    }

    impl LayoutTracingLayer {
        /// Layer backed by a default `LayoutLogger`.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Use an existing logger configuration.
        #[must_use]
        pub fn with_logger(logger: LayoutLogger) -> Self {
            Self { logger }
        }

        /// Install as the global tracing subscriber.
        ///
        /// # Errors
        ///
        /// Fails if a global subscriber is already installed.
        pub fn init(self) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
            use tracing_subscriber::prelude::*;

            let subscriber = tracing_subscriber::registry().with(self);
            tracing::subscriber::set_global_default(subscriber)
        }
    }

    #[derive(Default)]
    struct EventVisitor {
        message: Option<String>,
        fields: Vec<(String, String)>,
    }

    impl Visit for EventVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
            let rendered = format!("{value:?}");
            let rendered = strip_quotes(&rendered).to_string();
            if field.name() == "message" {
                self.message = Some(rendered);
            } else {
                self.fields.push((field.name().to_string(), rendered));
            }
        }
    }

    impl<S> Layer<S> for LayoutTracingLayer
    where
        S: Subscriber,
    {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let metadata = event.metadata();
            let mut visitor = EventVisitor::default();
            event.record(&mut visitor);

            let mut message = visitor.message.unwrap_or_default();
            if !visitor.fields.is_empty() {
                let extra = visitor
                    .fields
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                if message.is_empty() {
                    message = extra;
                } else {
                    message.push(' ');
                    message.push_str(&extra);
                }
            }

            let message_ref = message.as_str();
            let record = log::Record::builder()
                .args(format_args!("{message_ref}"))
                .level(map_tracing_level(*metadata.level()))
                .target(metadata.target())
                .file(metadata.file())
                .line(metadata.line())
                .module_path(metadata.module_path())
                .build();

            self.logger.log(&record);
        }
    }

    fn map_tracing_level(level: TracingLevel) -> Level {
        match level {
            TracingLevel::TRACE => Level::Trace,
            TracingLevel::DEBUG => Level::Debug,
            TracingLevel::INFO => Level::Info,
            TracingLevel::WARN => Level::Warn,
            TracingLevel::ERROR => Level::Error,
        }
    }

    fn strip_quotes(value: &str) -> &str {
        if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
            &value[1..value.len() - 1]
        } else {
            value
        }
    }

}

#[cfg(feature = "tracing")]
pub use tracing_integration::LayoutTracingLayer;
