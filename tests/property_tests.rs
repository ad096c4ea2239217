//! Property-based tests for rich_layout.
//!
//! Uses proptest to check invariants of styled text, style merging,
//! paragraph segmentation and multi-paragraph index mapping.

use std::sync::Arc;

use proptest::prelude::*;

use rich_layout::prelude::*;

// ============================================================================
// Custom Strategies
// ============================================================================

/// Short text mixing ASCII, accented letters, CJK and line breaks.
fn mixed_text() -> impl Strategy<Value = String> {
    "[a-z é漢\n]{0,40}"
}

fn color() -> impl Strategy<Value = Color> {
    prop_oneof![
        Just(Color::UNSPECIFIED),
        (any::<u8>(), any::<u8>(), any::<u8>())
            .prop_map(|(r, g, b)| Color::from((r, g, b))),
    ]
}

fn text_unit() -> impl Strategy<Value = TextUnit> {
    prop_oneof![
        Just(TextUnit::Unspecified),
        (1.0f32..64.0).prop_map(TextUnit::Sp),
        (0.1f32..4.0).prop_map(TextUnit::Em),
    ]
}

fn span_style() -> impl Strategy<Value = SpanStyle> {
    (
        color(),
        text_unit(),
        prop::option::of((1u16..=9).prop_map(|w| FontWeight(w * 100))),
        prop::option::of(prop_oneof![Just(FontStyle::Normal), Just(FontStyle::Italic)]),
        text_unit(),
        color(),
        prop::option::of((0u8..4).prop_map(TextDecoration::from_bits_truncate)),
    )
        .prop_map(
            |(color, font_size, weight, style, spacing, background, decoration)| SpanStyle {
                color,
                font_size,
                font_weight: weight,
                font_style: style,
                letter_spacing: spacing,
                background,
                text_decoration: decoration,
                ..SpanStyle::default()
            },
        )
}

fn paragraph_style() -> impl Strategy<Value = ParagraphStyle> {
    (
        prop::option::of(prop_oneof![
            Just(TextAlign::Left),
            Just(TextAlign::Center),
            Just(TextAlign::End),
        ]),
        prop::option::of(prop_oneof![
            Just(TextDirection::Ltr),
            Just(TextDirection::Rtl),
            Just(TextDirection::Content),
        ]),
    )
        .prop_map(|(align, direction)| {
            let mut style = ParagraphStyle::new();
            style.text_align = align;
            style.text_direction = direction;
            style
        })
}

/// Styled text with arbitrary (possibly overlapping) character style
/// ranges and non-overlapping paragraph ranges cut from sorted points.
fn styled_text() -> impl Strategy<Value = StyledText> {
    mixed_text().prop_flat_map(|text| {
        let len = text.chars().count();
        let span = (span_style(), 0..=len, 0..=len)
            .prop_map(|(style, a, b)| Range::new(style, a.min(b), a.max(b)));
        (
            Just(text),
            prop::collection::vec(span, 0..6),
            prop::collection::vec(0..=len, 0..8),
            prop::collection::vec(paragraph_style(), 4),
        )
            .prop_map(|(text, spans, mut cuts, styles)| {
                cuts.sort_unstable();
                cuts.dedup();
                let paragraphs = cuts
                    .chunks_exact(2)
                    .zip(styles.iter().cycle())
                    .map(|(pair, style)| Range::new(*style, pair[0], pair[1]))
                    .collect();
                StyledText::new(text, spans, paragraphs).expect("generated ranges are valid")
            })
    })
}

/// A styled text with a sub range `[a, b)` inside it.
fn text_and_range() -> impl Strategy<Value = (StyledText, usize, usize)> {
    styled_text().prop_flat_map(|text| {
        let len = text.len();
        (Just(text), 0..=len, 0..=len).prop_map(|(text, a, b)| (text, a.min(b), a.max(b)))
    })
}

// ============================================================================
// StyledText Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// sub_sequence keeps the sliced characters and rebases every range
    /// into the slice.
    #[test]
    fn prop_sub_sequence_slices_text_and_ranges((text, a, b) in text_and_range()) {
        let sub = text.sub_sequence(a, b).expect("range inside text");
        let expected: String = text.text().chars().skip(a).take(b - a).collect();
        prop_assert_eq!(sub.text(), expected.as_str());
        prop_assert_eq!(sub.len(), b - a);

        for range in sub.span_styles() {
            prop_assert!(range.start <= range.end && range.end <= sub.len());
        }
        for range in sub.paragraph_styles() {
            prop_assert!(range.start <= range.end && range.end <= sub.len());
        }
    }

    /// Slicing past the end fails instead of clamping.
    #[test]
    fn prop_sub_sequence_rejects_out_of_bounds(text in styled_text(), extra in 1usize..5) {
        let len = text.len();
        prop_assert_eq!(
            text.sub_sequence(0, len + extra),
            Err(TextError::OutOfBounds { start: 0, end: len + extra, len })
        );
    }

    /// Appending then slicing back out yields both halves' text.
    #[test]
    fn prop_append_then_slice(left in styled_text(), right in styled_text()) {
        let joined = left.append(&right);
        prop_assert_eq!(joined.len(), left.len() + right.len());
        let head = joined.sub_sequence(0, left.len()).expect("head");
        let tail = joined.sub_sequence(left.len(), joined.len()).expect("tail");
        prop_assert_eq!(head.text(), left.text());
        prop_assert_eq!(tail.text(), right.text());
    }
}

// ============================================================================
// Style Merge Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Merging nothing is the identity.
    #[test]
    fn prop_merge_none_is_identity(style in span_style()) {
        prop_assert_eq!(style.merge(None), style);
    }

    /// Every attribute comes from the overlay when it sets one, otherwise
    /// from the base.
    #[test]
    fn prop_merge_overlay_wins_where_specified(base in span_style(), overlay in span_style()) {
        let merged = base.merge(Some(&overlay));

        let expected_color = if overlay.color.is_specified() { overlay.color } else { base.color };
        prop_assert_eq!(merged.color, expected_color);
        let expected_size = if overlay.font_size.is_specified() { overlay.font_size } else { base.font_size };
        prop_assert_eq!(merged.font_size, expected_size);
        prop_assert_eq!(merged.font_weight, overlay.font_weight.or(base.font_weight));
        prop_assert_eq!(merged.font_style, overlay.font_style.or(base.font_style));
        let expected_spacing = if overlay.letter_spacing.is_specified() {
            overlay.letter_spacing
        } else {
            base.letter_spacing
        };
        prop_assert_eq!(merged.letter_spacing, expected_spacing);
        let expected_background = if overlay.background.is_specified() {
            overlay.background
        } else {
            base.background
        };
        prop_assert_eq!(merged.background, expected_background);
        prop_assert_eq!(merged.text_decoration, overlay.text_decoration.or(base.text_decoration));
    }

    /// Paragraph styles follow the same rule.
    #[test]
    fn prop_paragraph_merge(base in paragraph_style(), overlay in paragraph_style()) {
        prop_assert_eq!(base.merge(None), base);
        let merged = base.merge(Some(&overlay));
        prop_assert_eq!(merged.text_align, overlay.text_align.or(base.text_align));
        prop_assert_eq!(merged.text_direction, overlay.text_direction.or(base.text_direction));
    }

    /// Merging a style that only changes paint attributes keeps layout
    /// attributes equal.
    #[test]
    fn prop_color_never_affects_layout(style in span_style(), paint in color()) {
        let recolored = style.merge(Some(&SpanStyle::new().color(paint)));
        prop_assert!(style.has_same_layout_affecting_attributes(&recolored));
    }
}

// ============================================================================
// Segmentation Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Segments tile the text: no gaps, no overlaps, at least one segment.
    #[test]
    fn prop_segments_tile_text(text in styled_text(), default in paragraph_style()) {
        let segments = segment(&text, &default);
        prop_assert!(!segments.is_empty());

        let mut expected_start = 0;
        for seg in &segments {
            prop_assert_eq!(seg.start, expected_start);
            prop_assert!(seg.start <= seg.end);
            prop_assert_eq!(seg.text.len(), seg.len());
            prop_assert!(seg.text.paragraph_styles().is_empty());
            expected_start = seg.end;
        }
        prop_assert_eq!(expected_start, text.len());

        let rebuilt: String = segments.iter().map(|s| s.text.text()).collect();
        prop_assert_eq!(rebuilt.as_str(), text.text());
    }
}

// ============================================================================
// Multi-Paragraph Index Mapping Property Tests
// ============================================================================

fn lay_out(text: &StyledText, width: u32) -> MultiParagraph {
    let resolver: Arc<dyn FontFamilyResolver> = Arc::new(DefaultFontResolver::new());
    let intrinsics = MultiParagraphIntrinsics::new(
        text,
        &TextStyle::new(),
        &[],
        Density::default(),
        &resolver,
        &MonospaceBackend::new(),
    )
    .expect("no placeholders");
    MultiParagraph::new(
        Arc::new(intrinsics),
        Constraints::with_max_width(width),
        usize::MAX,
        false,
    )
    .expect("valid constraints")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Local and global character indices are inverse inside a paragraph.
    #[test]
    fn prop_local_global_index_inverse(text in styled_text(), width in 7u32..200) {
        let multi = lay_out(&text, width);
        let infos = multi.paragraph_infos();

        for offset in 0..text.len() {
            let info = infos
                .iter()
                .find(|info| info.start_index <= offset && offset < info.end_index)
                .expect("every offset lies in a paragraph");
            let local = info.to_local_index(offset);
            prop_assert!(local < info.len());
            prop_assert_eq!(info.to_global_index(local), offset);
        }
    }

    /// Paragraph line ranges are contiguous and add up to the line count.
    #[test]
    fn prop_line_ranges_contiguous(text in styled_text(), width in 7u32..200) {
        let multi = lay_out(&text, width);
        let mut next_line = 0;
        let mut next_top = 0.0f32;
        for info in multi.paragraph_infos() {
            prop_assert_eq!(info.start_line_index, next_line);
            prop_assert!(info.end_line_index > info.start_line_index);
            prop_assert!((info.top - next_top).abs() < 1e-3);
            next_line = info.end_line_index;
            next_top = info.bottom;
        }
        prop_assert_eq!(next_line, multi.line_count());
        prop_assert!((next_top - multi.height()).abs() < 1e-3);
    }

    /// Every offset maps to a line whose character range holds it.
    #[test]
    fn prop_line_for_offset_in_range(text in styled_text(), width in 7u32..200) {
        let multi = lay_out(&text, width);
        for offset in 0..text.len() {
            let line = multi.line_for_offset(offset);
            prop_assert!(line < multi.line_count());
            let start = multi.line_start(line).expect("line exists");
            let end = multi.line_end(line, false).expect("line exists");
            prop_assert!(start <= offset && offset <= end, "offset {} not in line {} [{}, {}]", offset, line, start, end);
        }
    }
}
