//! Styled text with layered style and annotation ranges.
//!
//! This module provides [`StyledText`], an immutable string carrying three
//! ordered range lists: character styles, paragraph styles and generic
//! annotations. It is the input to paragraph segmentation and layout.
//!
//! Offsets count Unicode scalar values (`char`s), never bytes.
//!
//! # Examples
//!
//! ```
//! use rich_layout::style::SpanStyle;
//! use rich_layout::text::Builder;
//!
//! let mut builder = Builder::new();
//! builder.append("Hello, ");
//! let handle = builder.push_style(SpanStyle::new().bold());
//! builder.append("world");
//! builder.pop_to(handle).unwrap();
//! builder.append("!");
//!
//! let text = builder.build().unwrap();
//! assert_eq!(text.text(), "Hello, world!");
//! assert_eq!(text.span_styles()[0].start, 7);
//! assert_eq!(text.span_styles()[0].end, 12);
//! ```

use std::fmt;
use std::ops::Add;

use crate::paragraph_style::ParagraphStyle;
use crate::style::SpanStyle;

/// An item attached to `[start, end)` of a text, with an optional tag.
///
/// Character style ranges may overlap; later ranges override earlier ones
/// attribute by attribute. Paragraph style ranges never overlap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Range<T> {
    pub item: T,
    /// Start character index (inclusive).
    pub start: usize,
    /// End character index (exclusive).
    pub end: usize,
    pub tag: String,
}

impl<T> Range<T> {
    /// Create an untagged range.
    #[must_use]
    pub fn new(item: T, start: usize, end: usize) -> Self {
        Self::tagged(item, start, end, "")
    }

    #[must_use]
    pub fn tagged(item: T, start: usize, end: usize, tag: impl Into<String>) -> Self {
        Self {
            item,
            start,
            end,
            tag: tag.into(),
        }
    }

    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    fn shifted(&self, offset: usize) -> Self
    where
        T: Clone,
    {
        Self {
            item: self.item.clone(),
            start: self.start + offset,
            end: self.end + offset,
            tag: self.tag.clone(),
        }
    }

    /// Clip to `[start, end)` and rebase so `start` becomes 0.
    fn clipped(&self, start: usize, end: usize) -> Self
    where
        T: Clone,
    {
        Self {
            item: self.item.clone(),
            start: self.start.max(start) - start,
            end: self.end.min(end) - start,
            tag: self.tag.clone(),
        }
    }
}

/// Text-to-speech hint carried with the text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TtsAnnotation {
    /// Read the covered text out character by character.
    Verbatim(String),
}

/// Link target carried with the text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlAnnotation {
    pub url: String,
}

impl UrlAnnotation {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Payload of a generic annotation range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Annotation {
    String(String),
    Tts(TtsAnnotation),
    Url(UrlAnnotation),
}

/// Whether `[l_start, l_end)` and `[r_start, r_end)` intersect. Collapsed
/// ranges intersect anything that contains them.
#[must_use]
pub fn intersect(l_start: usize, l_end: usize, r_start: usize, r_end: usize) -> bool {
    l_start.max(r_start) < l_end.min(r_end)
        || contains(l_start, l_end, r_start, r_end)
        || contains(r_start, r_end, l_start, l_end)
}

/// Whether `[base_start, base_end)` contains `[target_start, target_end)`.
/// A collapsed target at the very end is only contained by a collapsed base.
#[must_use]
pub fn contains(base_start: usize, base_end: usize, target_start: usize, target_end: usize) -> bool {
    base_start <= target_start
        && target_end <= base_end
        && (base_end != target_end
            || (target_start == target_end) == (base_start == base_end))
}

/// Byte offset of the `index`th character, or the byte length past the end.
pub(crate) fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices().nth(index).map_or(text.len(), |(b, _)| b)
}

/// Slice `text` by character indices.
pub(crate) fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let byte_start = byte_offset(text, start);
    let byte_end = byte_start + byte_offset(&text[byte_start..], end - start);
    &text[byte_start..byte_end]
}

/// Immutable text with character style, paragraph style and annotation
/// ranges.
///
/// Every offset and length counts `char`s, not bytes or UTF-16 code units.
/// A character outside the Basic Multilingual Plane is one position:
///
/// ```
/// use rich_layout::text::StyledText;
///
/// let text = StyledText::from("a\u{1F600}b");
/// assert_eq!(text.len(), 3);
/// assert_eq!(text.sub_sequence(1, 2).unwrap().text(), "\u{1F600}");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledText {
    text: String,
    length: usize,
    span_styles: Vec<Range<SpanStyle>>,
    paragraph_styles: Vec<Range<ParagraphStyle>>,
    annotations: Vec<Range<Annotation>>,
}

impl StyledText {
    /// Create styled text from validated ranges.
    ///
    /// Paragraph style ranges are sorted by start and must not overlap.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::InvalidRange`] or [`TextError::OutOfBounds`]
    /// for a malformed range and [`TextError::ParagraphOverlap`] when two
    /// paragraph ranges overlap.
    pub fn new(
        text: impl Into<String>,
        span_styles: Vec<Range<SpanStyle>>,
        paragraph_styles: Vec<Range<ParagraphStyle>>,
    ) -> Result<Self, TextError> {
        Self::with_annotations(text, span_styles, paragraph_styles, Vec::new())
    }

    /// Like [`new`](Self::new), with annotation ranges.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn with_annotations(
        text: impl Into<String>,
        span_styles: Vec<Range<SpanStyle>>,
        mut paragraph_styles: Vec<Range<ParagraphStyle>>,
        annotations: Vec<Range<Annotation>>,
    ) -> Result<Self, TextError> {
        let text = text.into();
        let length = text.chars().count();

        let bounds = span_styles
            .iter()
            .map(|r| (r.start, r.end))
            .chain(paragraph_styles.iter().map(|r| (r.start, r.end)))
            .chain(annotations.iter().map(|r| (r.start, r.end)));
        for (start, end) in bounds {
            check_range(start, end, length)?;
        }

        paragraph_styles.sort_by_key(|r| r.start);
        let mut last_end = 0;
        for range in &paragraph_styles {
            if range.start < last_end {
                return Err(TextError::ParagraphOverlap {
                    previous_end: last_end,
                    start: range.start,
                });
            }
            last_end = range.end;
        }

        Ok(Self {
            text,
            length,
            span_styles,
            paragraph_styles,
            annotations,
        })
    }

    /// Plain text without any ranges.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        let length = text.chars().count();
        Self {
            text,
            length,
            ..Self::default()
        }
    }

    /// Text with one character style covering all of it.
    #[must_use]
    pub fn styled(text: impl Into<String>, style: SpanStyle) -> Self {
        let mut styled = Self::plain(text);
        styled.span_styles.push(Range::new(style, 0, styled.length));
        styled
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[must_use]
    pub fn span_styles(&self) -> &[Range<SpanStyle>] {
        &self.span_styles
    }

    /// Paragraph style ranges, sorted by start.
    #[must_use]
    pub fn paragraph_styles(&self) -> &[Range<ParagraphStyle>] {
        &self.paragraph_styles
    }

    #[must_use]
    pub fn annotations(&self) -> &[Range<Annotation>] {
        &self.annotations
    }

    /// The characters in `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns a [`TextError`] when the range is malformed or out of bounds.
    pub fn slice_text(&self, start: usize, end: usize) -> Result<&str, TextError> {
        check_range(start, end, self.length)?;
        Ok(char_slice(&self.text, start, end))
    }

    /// The text in `[start, end)` with every range that intersects it,
    /// clipped and rebased to start at 0.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::InvalidRange`] when `start > end` and
    /// [`TextError::OutOfBounds`] when `end` is past the text.
    pub fn sub_sequence(&self, start: usize, end: usize) -> Result<Self, TextError> {
        if start == 0 && end == self.length {
            return Ok(self.clone());
        }
        let text = self.slice_text(start, end)?.to_string();
        Ok(Self {
            text,
            length: end - start,
            span_styles: local_ranges(&self.span_styles, start, end),
            paragraph_styles: local_ranges(&self.paragraph_styles, start, end),
            annotations: local_ranges(&self.annotations, start, end),
        })
    }

    /// Like [`sub_sequence`](Self::sub_sequence), keeping character styles
    /// only. The range is clamped into the text.
    pub(crate) fn sub_sequence_span_styles(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.length);
        let start = start.min(end);
        Self {
            text: char_slice(&self.text, start, end).to_string(),
            length: end - start,
            span_styles: local_ranges(&self.span_styles, start, end),
            paragraph_styles: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Concatenate `other` after this text. Its ranges are shifted by this
    /// text's length.
    #[must_use]
    pub fn append(&self, other: &Self) -> Self {
        let mut builder = Builder::from_styled_text(self);
        builder.append_styled_text(other);
        Self {
            text: builder.text,
            length: builder.length,
            span_styles: close_all(builder.span_styles, 0),
            paragraph_styles: close_all(builder.paragraph_styles, 0),
            annotations: close_all(builder.annotations, 0),
        }
    }

    /// Character styles intersecting `[start, end)`, in insertion order.
    pub fn span_styles_in(&self, start: usize, end: usize) -> impl Iterator<Item = &Range<SpanStyle>> {
        self.span_styles
            .iter()
            .filter(move |r| intersect(start, end, r.start, r.end))
    }

    /// Paragraph styles intersecting `[start, end)`.
    pub fn paragraph_styles_in(
        &self,
        start: usize,
        end: usize,
    ) -> impl Iterator<Item = &Range<ParagraphStyle>> {
        self.paragraph_styles
            .iter()
            .filter(move |r| intersect(start, end, r.start, r.end))
    }

    /// Annotations of any kind intersecting `[start, end)`, optionally
    /// limited to one tag.
    pub fn annotations_in<'a>(
        &'a self,
        tag: Option<&'a str>,
        start: usize,
        end: usize,
    ) -> impl Iterator<Item = &'a Range<Annotation>> {
        self.annotations.iter().filter(move |r| {
            tag.is_none_or(|t| r.tag == t) && intersect(start, end, r.start, r.end)
        })
    }

    /// String annotations intersecting `[start, end)`.
    #[must_use]
    pub fn string_annotations(&self, tag: Option<&str>, start: usize, end: usize) -> Vec<Range<String>> {
        self.annotations_in(tag, start, end)
            .filter_map(|r| match &r.item {
                Annotation::String(value) => {
                    Some(Range::tagged(value.clone(), r.start, r.end, r.tag.clone()))
                }
                _ => None,
            })
            .collect()
    }

    /// Whether any string annotation with `tag` intersects `[start, end)`.
    #[must_use]
    pub fn has_string_annotations(&self, tag: &str, start: usize, end: usize) -> bool {
        self.annotations_in(Some(tag), start, end)
            .any(|r| matches!(r.item, Annotation::String(_)))
    }

    #[must_use]
    pub fn tts_annotations(&self, start: usize, end: usize) -> Vec<Range<TtsAnnotation>> {
        self.annotations_in(None, start, end)
            .filter_map(|r| match &r.item {
                Annotation::Tts(tts) => Some(Range::tagged(tts.clone(), r.start, r.end, r.tag.clone())),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn url_annotations(&self, start: usize, end: usize) -> Vec<Range<UrlAnnotation>> {
        self.annotations_in(None, start, end)
            .filter_map(|r| match &r.item {
                Annotation::Url(url) => Some(Range::tagged(url.clone(), r.start, r.end, r.tag.clone())),
                _ => None,
            })
            .collect()
    }

    /// Uppercase the text, remapping ranges to the new character positions.
    #[must_use]
    pub fn to_upper_case(&self) -> Self {
        self.map_case(|_, c| CaseMapping::Many(c.to_uppercase().collect()))
    }

    /// Lowercase the text, remapping ranges to the new character positions.
    #[must_use]
    pub fn to_lower_case(&self) -> Self {
        self.map_case(|_, c| CaseMapping::Many(c.to_lowercase().collect()))
    }

    /// Uppercase the first character only.
    #[must_use]
    pub fn capitalize(&self) -> Self {
        self.map_case(|index, c| {
            if index == 0 {
                CaseMapping::Many(c.to_uppercase().collect())
            } else {
                CaseMapping::Same(c)
            }
        })
    }

    /// Lowercase the first character only.
    #[must_use]
    pub fn decapitalize(&self) -> Self {
        self.map_case(|index, c| {
            if index == 0 {
                CaseMapping::Many(c.to_lowercase().collect())
            } else {
                CaseMapping::Same(c)
            }
        })
    }

    /// Map text case while remapping ranges to updated character positions.
    fn map_case<F>(&self, mut mapper: F) -> Self
    where
        F: FnMut(usize, char) -> CaseMapping,
    {
        let mut positions = Vec::with_capacity(self.length + 1);
        let mut text = String::with_capacity(self.text.len());
        let mut length = 0usize;

        positions.push(0);
        for (index, c) in self.text.chars().enumerate() {
            match mapper(index, c) {
                CaseMapping::Same(c) => {
                    text.push(c);
                    length += 1;
                }
                CaseMapping::Many(mapped) => {
                    length += mapped.chars().count();
                    text.push_str(&mapped);
                }
            }
            positions.push(length);
        }

        Self {
            text,
            length,
            span_styles: remap(&self.span_styles, &positions),
            paragraph_styles: remap(&self.paragraph_styles, &positions),
            annotations: remap(&self.annotations, &positions),
        }
    }
}

fn remap<T: Clone>(ranges: &[Range<T>], positions: &[usize]) -> Vec<Range<T>> {
    ranges
        .iter()
        .map(|r| Range::tagged(r.item.clone(), positions[r.start], positions[r.end], r.tag.clone()))
        .collect()
}

enum CaseMapping {
    Same(char),
    Many(String),
}

pub(crate) fn check_range(start: usize, end: usize, len: usize) -> Result<(), TextError> {
    if start > end {
        return Err(TextError::InvalidRange { start, end });
    }
    if end > len {
        return Err(TextError::OutOfBounds { start, end, len });
    }
    Ok(())
}

fn local_ranges<T: Clone>(ranges: &[Range<T>], start: usize, end: usize) -> Vec<Range<T>> {
    ranges
        .iter()
        .filter(|r| intersect(start, end, r.start, r.end))
        .map(|r| r.clipped(start, end))
        .collect()
}

impl Add for StyledText {
    type Output = StyledText;

    fn add(self, rhs: Self) -> Self::Output {
        self.append(&rhs)
    }
}

impl Add<&StyledText> for &StyledText {
    type Output = StyledText;

    fn add(self, rhs: &StyledText) -> Self::Output {
        self.append(rhs)
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for StyledText {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

/// A range whose end is unknown until it is popped or the builder is
/// finished.
#[derive(Debug, Clone)]
struct OpenRange<T> {
    item: T,
    start: usize,
    end: Option<usize>,
    tag: String,
}

impl<T> OpenRange<T> {
    fn closed(item: T, start: usize, end: usize, tag: String) -> Self {
        Self {
            item,
            start,
            end: Some(end),
            tag,
        }
    }

    fn open(item: T, start: usize, tag: String) -> Self {
        Self {
            item,
            start,
            end: None,
            tag,
        }
    }
}

fn close_all<T>(ranges: Vec<OpenRange<T>>, length: usize) -> Vec<Range<T>> {
    ranges
        .into_iter()
        .map(|r| Range {
            item: r.item,
            start: r.start,
            end: r.end.unwrap_or(length),
            tag: r.tag,
        })
        .collect()
}

/// Which list an entry on the open-range stack points into.
#[derive(Debug, Clone, Copy)]
enum StackEntry {
    Span(usize),
    Paragraph(usize),
    Annotation(usize),
}

/// Append-only builder for [`StyledText`].
///
/// `push_*` opens a range at the current end of the text and returns a
/// handle; [`pop`](Self::pop) closes the most recent open range and
/// [`pop_to`](Self::pop_to) closes everything opened at or after a handle.
/// Ranges still open at [`build`](Self::build) end at the text length.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    text: String,
    length: usize,
    span_styles: Vec<OpenRange<SpanStyle>>,
    paragraph_styles: Vec<OpenRange<ParagraphStyle>>,
    annotations: Vec<OpenRange<Annotation>>,
    stack: Vec<StackEntry>,
}

impl Builder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing styled text.
    #[must_use]
    pub fn from_styled_text(text: &StyledText) -> Self {
        let mut builder = Self::new();
        builder.append_styled_text(text);
        builder
    }

    /// Current length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Append plain text.
    pub fn append(&mut self, text: &str) {
        self.text.push_str(text);
        self.length += text.chars().count();
    }

    pub fn append_char(&mut self, c: char) {
        self.text.push(c);
        self.length += 1;
    }

    /// Append styled text, shifting its ranges to the current end.
    pub fn append_styled_text(&mut self, text: &StyledText) {
        let offset = self.length;
        self.text.push_str(&text.text);
        self.length += text.length;

        for r in &text.span_styles {
            let r = r.shifted(offset);
            self.span_styles
                .push(OpenRange::closed(r.item, r.start, r.end, r.tag));
        }
        for r in &text.paragraph_styles {
            let r = r.shifted(offset);
            self.paragraph_styles
                .push(OpenRange::closed(r.item, r.start, r.end, r.tag));
        }
        for r in &text.annotations {
            let r = r.shifted(offset);
            self.annotations
                .push(OpenRange::closed(r.item, r.start, r.end, r.tag));
        }
    }

    /// Append `text[start..end]` with the ranges intersecting it.
    ///
    /// # Errors
    ///
    /// Returns a [`TextError`] when the range is malformed or out of bounds.
    pub fn append_styled_range(&mut self, text: &StyledText, start: usize, end: usize) -> Result<(), TextError> {
        let sub = text.sub_sequence(start, end)?;
        self.append_styled_text(&sub);
        Ok(())
    }

    /// Apply a character style to `[start, end)`.
    pub fn add_style(&mut self, style: SpanStyle, start: usize, end: usize) {
        self.span_styles
            .push(OpenRange::closed(style, start, end, String::new()));
    }

    /// Apply a paragraph style to `[start, end)`.
    pub fn add_paragraph_style(&mut self, style: ParagraphStyle, start: usize, end: usize) {
        self.paragraph_styles
            .push(OpenRange::closed(style, start, end, String::new()));
    }

    pub fn add_string_annotation(&mut self, tag: impl Into<String>, value: impl Into<String>, start: usize, end: usize) {
        self.annotations.push(OpenRange::closed(
            Annotation::String(value.into()),
            start,
            end,
            tag.into(),
        ));
    }

    pub fn add_tts_annotation(&mut self, tts: TtsAnnotation, start: usize, end: usize) {
        self.annotations
            .push(OpenRange::closed(Annotation::Tts(tts), start, end, String::new()));
    }

    pub fn add_url_annotation(&mut self, url: UrlAnnotation, start: usize, end: usize) {
        self.annotations
            .push(OpenRange::closed(Annotation::Url(url), start, end, String::new()));
    }

    /// Open a character style range. Returns its handle.
    pub fn push_style(&mut self, style: SpanStyle) -> usize {
        self.span_styles
            .push(OpenRange::open(style, self.length, String::new()));
        self.push_entry(StackEntry::Span(self.span_styles.len() - 1))
    }

    /// Open a paragraph style range. Returns its handle.
    pub fn push_paragraph_style(&mut self, style: ParagraphStyle) -> usize {
        self.paragraph_styles
            .push(OpenRange::open(style, self.length, String::new()));
        self.push_entry(StackEntry::Paragraph(self.paragraph_styles.len() - 1))
    }

    /// Open a string annotation range. Returns its handle.
    pub fn push_string_annotation(&mut self, tag: impl Into<String>, value: impl Into<String>) -> usize {
        self.push_annotation(Annotation::String(value.into()), tag.into())
    }

    pub fn push_tts_annotation(&mut self, tts: TtsAnnotation) -> usize {
        self.push_annotation(Annotation::Tts(tts), String::new())
    }

    pub fn push_url_annotation(&mut self, url: UrlAnnotation) -> usize {
        self.push_annotation(Annotation::Url(url), String::new())
    }

    fn push_annotation(&mut self, annotation: Annotation, tag: String) -> usize {
        self.annotations
            .push(OpenRange::open(annotation, self.length, tag));
        self.push_entry(StackEntry::Annotation(self.annotations.len() - 1))
    }

    fn push_entry(&mut self, entry: StackEntry) -> usize {
        self.stack.push(entry);
        self.stack.len() - 1
    }

    /// Close the most recently opened range at the current length.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::NothingToPop`] if no range is open.
    pub fn pop(&mut self) -> Result<(), TextError> {
        let entry = self.stack.pop().ok_or(TextError::NothingToPop)?;
        let end = Some(self.length);
        match entry {
            StackEntry::Span(i) => self.span_styles[i].end = end,
            StackEntry::Paragraph(i) => self.paragraph_styles[i].end = end,
            StackEntry::Annotation(i) => self.annotations[i].end = end,
        }
        Ok(())
    }

    /// Close every range opened at or after `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::PopIndexOutOfRange`] if `handle` is not an open
    /// range.
    pub fn pop_to(&mut self, handle: usize) -> Result<(), TextError> {
        if handle >= self.stack.len() {
            return Err(TextError::PopIndexOutOfRange {
                index: handle,
                depth: self.stack.len(),
            });
        }
        while self.stack.len() > handle {
            self.pop()?;
        }
        Ok(())
    }

    /// Run `block` with `style` applied to everything it appends.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::PopIndexOutOfRange`] if `block` popped past the
    /// range opened here.
    pub fn with_style<R>(&mut self, style: SpanStyle, block: impl FnOnce(&mut Self) -> R) -> Result<R, TextError> {
        let handle = self.push_style(style);
        let result = block(self);
        self.pop_to(handle)?;
        Ok(result)
    }

    /// Like [`with_style`](Self::with_style) for a paragraph style.
    ///
    /// # Errors
    ///
    /// See [`with_style`](Self::with_style).
    pub fn with_paragraph_style<R>(
        &mut self,
        style: ParagraphStyle,
        block: impl FnOnce(&mut Self) -> R,
    ) -> Result<R, TextError> {
        let handle = self.push_paragraph_style(style);
        let result = block(self);
        self.pop_to(handle)?;
        Ok(result)
    }

    /// Finish building. Ranges still open end at the text length.
    ///
    /// # Errors
    ///
    /// Returns a [`TextError`] when a range added with `add_*` is malformed
    /// or paragraph ranges overlap.
    pub fn build(self) -> Result<StyledText, TextError> {
        let length = self.length;
        StyledText::with_annotations(
            self.text,
            close_all(self.span_styles, length),
            close_all(self.paragraph_styles, length),
            close_all(self.annotations, length),
        )
    }
}

/// Errors from building or slicing styled text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextError {
    /// `start` is after `end`.
    InvalidRange { start: usize, end: usize },
    /// The range reaches past the text.
    OutOfBounds { start: usize, end: usize, len: usize },
    /// A paragraph range starts before the previous one ends.
    ParagraphOverlap { previous_end: usize, start: usize },
    /// `pop` with no open range.
    NothingToPop,
    /// `pop_to` with a handle that is not open.
    PopIndexOutOfRange { index: usize, depth: usize },
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange { start, end } => {
                write!(f, "invalid range: start ({start}) is after end ({end})")
            }
            Self::OutOfBounds { start, end, len } => {
                write!(f, "range [{start}, {end}) is out of bounds for length {len}")
            }
            Self::ParagraphOverlap {
                previous_end,
                start,
            } => write!(
                f,
                "paragraph styles overlap: range starting at {start} begins before {previous_end}"
            ),
            Self::NothingToPop => write!(f, "nothing to pop"),
            Self::PopIndexOutOfRange { index, depth } => {
                write!(f, "pop index {index} is not open (depth {depth})")
            }
        }
    }
}

impl std::error::Error for TextError {}
