//! Integration tests for the `log` output of the layout pipeline.
//!
//! The global logger can be installed once per process, so every test that
//! touches it runs serially and only one of them installs it.
//!
//! Run with: cargo test --test logging_test -- --nocapture

use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Record};
use serial_test::serial;

use rich_layout::logging::LayoutLogger;
use rich_layout::prelude::*;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Install a debug-level logger writing into a buffer, once.
fn global_buffer() -> &'static SharedBuffer {
    static BUFFER: OnceLock<SharedBuffer> = OnceLock::new();
    BUFFER.get_or_init(|| {
        let buffer = SharedBuffer::default();
        LayoutLogger::new()
            .writer(buffer.clone())
            .level(LevelFilter::Trace)
            .show_time(false)
            .init()
            .expect("no other logger installed");
        buffer
    })
}

#[test]
fn test_logger_formats_level_and_target() {
    let buffer = SharedBuffer::default();
    let logger = LayoutLogger::new()
        .writer(buffer.clone())
        .level(LevelFilter::Info)
        .show_time(false);

    logger.log(
        &Record::builder()
            .level(Level::Info)
            .target("rich_layout::measurer")
            .args(format_args!("measured"))
            .build(),
    );
    logger.log(
        &Record::builder()
            .level(Level::Debug)
            .target("rich_layout::measurer")
            .args(format_args!("filtered out"))
            .build(),
    );

    assert_eq!(buffer.contents(), "INFO  rich_layout::measurer: measured\n");
}

#[test]
fn test_logger_path_suffix() {
    let buffer = SharedBuffer::default();
    let logger = LayoutLogger::new()
        .writer(buffer.clone())
        .show_time(false)
        .show_level(false)
        .show_target(false)
        .show_path(true);

    logger.log(
        &Record::builder()
            .level(Level::Warn)
            .file(Some("src/cache.rs"))
            .line(Some(12))
            .args(format_args!("recovered"))
            .build(),
    );

    assert_eq!(buffer.contents(), "recovered (src/cache.rs:12)\n");
}

#[test]
#[serial]
fn test_measure_logs_width_resolution() {
    let buffer = global_buffer();
    buffer.clear();

    TextMeasurer::builder()
        .cache_size(0)
        .build()
        .measure(MeasureRequest::new("hello").constraints(Constraints::with_max_width(100)))
        .expect("layout succeeds");

    let output = buffer.contents();
    assert!(
        output.contains("DEBUG rich_layout::measurer: measuring 5 chars at width 35"),
        "unexpected log output: {output}"
    );
}

#[test]
#[serial]
fn test_cache_logs_hits_and_stale_evictions() {
    let buffer = global_buffer();
    buffer.clear();

    let resolver = Arc::new(DefaultFontResolver::new());
    let measurer = TextMeasurer::builder()
        .font_resolver(resolver.clone())
        .build();
    let request = MeasureRequest::new("cached");

    measurer.measure(request.clone()).expect("miss");
    measurer.measure(request.clone()).expect("hit");
    resolver.invalidate();
    measurer.measure(request).expect("stale");

    let output = buffer.contents();
    assert!(output.contains("layout cache miss for 6 chars"), "{output}");
    assert!(output.contains("layout cache hit for 6 chars"), "{output}");
    assert!(output.contains("evicting layout with stale fonts"), "{output}");
    assert!(output.contains("font resolver invalidated, generation 1"), "{output}");
}

#[test]
#[serial]
fn test_max_lines_truncation_logged() {
    let buffer = global_buffer();
    buffer.clear();

    let text = StyledText::new(
        "one\ntwo\nthree",
        vec![],
        vec![Range::new(ParagraphStyle::new(), 0, 3)],
    )
    .expect("valid paragraph range");
    TextMeasurer::builder()
        .cache_size(0)
        .build()
        .measure(MeasureRequest::new(text).max_lines(1))
        .expect("layout succeeds");

    let output = buffer.contents();
    assert!(
        output.contains(
            "DEBUG rich_layout::multi_paragraph: line limit 1 reached in paragraph 0, 1 paragraph(s) not laid out"
        ),
        "{output}"
    );
}
