//! Thread safety tests for rich_layout.
//!
//! This module verifies:
//! 1. Public types are Send + Sync (compile-time verification)
//! 2. A shared measurer and its layout cache work under concurrent access
//! 3. Layout results can be queried and painted from many threads

use rich_layout::cache::{CacheKey, TextLayoutCache};
use rich_layout::prelude::*;
use rich_layout::sync::lock_recover;
use std::sync::{Arc, Barrier, Mutex};
use std::thread;

// ============================================================================
// COMPILE-TIME SEND + SYNC VERIFICATION
// ============================================================================

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_text_types_are_send_sync() {
    assert_send_sync::<StyledText>();
    assert_send_sync::<Builder>();
    assert_send_sync::<Range<SpanStyle>>();
    assert_send_sync::<Annotation>();
    assert_send_sync::<ParagraphSegment>();
}

#[test]
fn test_style_types_are_send_sync() {
    assert_send_sync::<Color>();
    assert_send_sync::<Brush>();
    assert_send_sync::<SpanStyle>();
    assert_send_sync::<ParagraphStyle>();
    assert_send_sync::<TextStyle>();
    assert_send_sync::<TextDecoration>();
}

#[test]
fn test_layout_types_are_send_sync() {
    assert_send_sync::<MultiParagraphIntrinsics>();
    assert_send_sync::<MultiParagraph>();
    assert_send_sync::<ParagraphInfo>();
    assert_send_sync::<TextLayoutInput>();
    assert_send_sync::<TextLayoutResult>();
    assert_send_sync::<LayoutError>();
}

#[test]
fn test_measurer_types_are_send_sync() {
    assert_send_sync::<TextMeasurer>();
    assert_send_sync::<TextLayoutCache>();
    assert_send_sync::<CacheKey>();
    assert_send_sync::<DefaultFontResolver>();
    assert_send_sync::<MonospaceBackend>();
    assert_send_sync::<Arc<dyn ParagraphBackend>>();
    assert_send_sync::<Arc<dyn FontFamilyResolver>>();
}

// ============================================================================
// CONCURRENT MEASURER ACCESS TESTS
// ============================================================================

#[test]
fn test_concurrent_measure_shared_cache() {
    let measurer = Arc::new(TextMeasurer::builder().cache_size(4).build());
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let measurer = Arc::clone(&measurer);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for j in 0..200 {
                    let text = format!("thread {} line {}", i % 3, j % 5);
                    let result = measurer
                        .measure(
                            MeasureRequest::new(text.as_str())
                                .constraints(Constraints::with_max_width(70)),
                        )
                        .expect("layout succeeds");
                    assert!(result.line_count() >= 1);
                    assert!(result.size().width <= 70);
                }
            })
        })
        .collect();

    for handle in handles {
        handle
            .join()
            .expect("Thread panicked during concurrent measuring");
    }

    let cache = measurer.cache().expect("cache enabled");
    assert!(cache.len() <= cache.capacity());
}

#[test]
fn test_concurrent_color_changes_share_layout() {
    let measurer = Arc::new(TextMeasurer::new());
    let base = measurer
        .measure(MeasureRequest::new("shared layout text"))
        .expect("layout succeeds");

    let colors = [Color::RED, Color::GREEN, Color::BLUE, Color::WHITE];
    let handles: Vec<_> = colors
        .into_iter()
        .map(|color| {
            let measurer = Arc::clone(&measurer);
            let expected = Arc::clone(base.multi_paragraph());
            thread::spawn(move || {
                for _ in 0..100 {
                    let result = measurer
                        .measure(
                            MeasureRequest::new("shared layout text")
                                .style(TextStyle::new().with_color(color)),
                        )
                        .expect("layout succeeds");
                    assert!(Arc::ptr_eq(result.multi_paragraph(), &expected));
                    assert_eq!(result.input().style.color(), color);
                }
            })
        })
        .collect();

    for handle in handles {
        handle
            .join()
            .expect("Thread panicked during cached measuring");
    }
}

#[test]
fn test_invalidation_during_concurrent_measure() {
    let resolver = Arc::new(DefaultFontResolver::new());
    let measurer = Arc::new(
        TextMeasurer::builder()
            .font_resolver(resolver.clone())
            .build(),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let measurer = Arc::clone(&measurer);
            thread::spawn(move || {
                for _ in 0..200 {
                    measurer
                        .measure(MeasureRequest::new("fonts may change"))
                        .expect("layout succeeds");
                }
            })
        })
        .collect();

    for _ in 0..50 {
        resolver.invalidate();
        thread::yield_now();
    }
    for handle in handles {
        handle
            .join()
            .expect("Thread panicked while fonts were invalidated");
    }

    let fresh = measurer
        .measure(MeasureRequest::new("fonts may change"))
        .expect("layout succeeds");
    assert!(!fresh.has_stale_resolved_fonts());
}

// ============================================================================
// CONCURRENT QUERY TESTS
// ============================================================================

#[test]
fn test_concurrent_queries_on_one_result() {
    let result = Arc::new(
        TextMeasurer::new()
            .measure(
                MeasureRequest::new("the quick brown fox\njumps over the lazy dog")
                    .constraints(Constraints::with_max_width(70)),
            )
            .expect("layout succeeds"),
    );
    let expected_lines = result.line_count();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let result = Arc::clone(&result);
            thread::spawn(move || {
                for offset in 0..result.input().text.len() {
                    let line = result.line_for_offset(offset);
                    assert!(line < expected_lines);
                    result.cursor_rect(offset).expect("offset in text");
                }
                let mut canvas = RecordingCanvas::new();
                result.paint(&mut canvas, Color::UNSPECIFIED, None, None);
                assert!(!canvas.texts().is_empty());
            })
        })
        .collect();

    for handle in handles {
        handle
            .join()
            .expect("Thread panicked during concurrent queries");
    }
}

// ============================================================================
// POISONED LOCK RECOVERY
// ============================================================================

#[test]
fn test_lock_recover_after_poison() {
    let shared = Arc::new(Mutex::new(vec![1, 2, 3]));

    let poisoner = Arc::clone(&shared);
    let _ = thread::spawn(move || {
        let _guard = poisoner.lock().expect("not yet poisoned");
        panic!("poison the lock");
    })
    .join();

    assert!(shared.is_poisoned());
    let guard = lock_recover(&shared);
    assert_eq!(*guard, vec![1, 2, 3]);
}
