//! Font resolution capability.
//!
//! Layout never loads fonts itself. It receives a [`FontFamilyResolver`]
//! and asks it to map style attributes onto a [`Typeface`]. Resolvers
//! expose a generation counter: when fonts change underneath (a download
//! finishes, a family gets registered) the generation moves on and any
//! layout built against an older generation is stale.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::style::{FontFamily, FontStyle, FontSynthesis, FontWeight};

/// The face a resolver picked for a style run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Typeface {
    pub family: FontFamily,
    pub weight: FontWeight,
    pub style: FontStyle,
    /// Bold is faked by the backend.
    pub synthetic_bold: bool,
    /// Italic is faked by the backend.
    pub synthetic_italic: bool,
}

/// Maps style attributes onto typefaces.
///
/// Implementations are shared between threads and compared by identity
/// when looking up cached layouts.
pub trait FontFamilyResolver: fmt::Debug + Send + Sync {
    /// Resolve a face for one style run.
    fn resolve(
        &self,
        family: &FontFamily,
        weight: FontWeight,
        style: FontStyle,
        synthesis: FontSynthesis,
    ) -> Typeface;

    /// Current font generation. Layouts remember the generation they were
    /// built against.
    fn generation(&self) -> u64;
}

/// Resolver that treats every family as having a regular upright face and
/// synthesizes bold and italic where allowed.
#[derive(Debug, Default)]
pub struct DefaultFontResolver {
    generation: AtomicU64,
}

impl DefaultFontResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal that fonts changed. Layouts built before this call report
    /// stale fonts.
    pub fn invalidate(&self) {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        log::debug!("font resolver invalidated, generation {generation}");
    }
}

impl FontFamilyResolver for DefaultFontResolver {
    fn resolve(
        &self,
        family: &FontFamily,
        weight: FontWeight,
        style: FontStyle,
        synthesis: FontSynthesis,
    ) -> Typeface {
        let wants_bold = weight >= FontWeight(600);
        let wants_italic = style == FontStyle::Italic;
        Typeface {
            family: family.clone(),
            weight,
            style,
            synthetic_bold: wants_bold && synthesis.contains(FontSynthesis::WEIGHT),
            synthetic_italic: wants_italic && synthesis.contains(FontSynthesis::STYLE),
        }
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}
