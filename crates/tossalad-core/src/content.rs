//! Content classification for stored ToS analyses.
//!
//! A genuine analysis quotes the ToS and explains each quote in plain
//! English. This module sniffs raw text for that structure.
//!
//! # Heuristic
//!
//! Three independent signals are read from the text:
//!
//! - **quotes**: the literal `Original Text:` marker, or any `"` in a
//!   document longer than 1000 characters (long analyses sometimes quote
//!   inline without the marker; a short snippet with a quote proves nothing)
//! - **explanations**: `Plain English Explanation:` (any case), or the bare
//!   substrings `explanation` / `means` (case-sensitive)
//! - **generic**: any phrase from [`GENERIC_PHRASES`] (any case)
//!
//! These are string checks, not parsing. `"This means nothing"` counts as an
//! explanation. The rules are kept flat so false positives stay easy to see.

use serde::{Deserialize, Serialize};

/// Marker preceding a verbatim ToS quote.
pub const QUOTE_MARKER: &str = "Original Text:";

/// Marker preceding the explanation of a quote. Matched case-insensitively.
pub const EXPLANATION_MARKER: &str = "Plain English Explanation:";

/// Placeholder phrases that mark filler content. Matched case-insensitively.
pub const GENERIC_PHRASES: &[&str] = &[
    "ToS document analysis would be performed here",
    "Analysis would be performed",
    "placeholder",
    "Lorem ipsum",
    "This is a test",
    "Generic analysis",
];

/// Documents longer than this count inline `"` as quoting.
const INLINE_QUOTE_MIN_CHARS: usize = 1000;

/// Genuine analyses must be longer than this.
const GENUINE_MIN_CHARS: usize = 500;

/// Aggregate content category, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentQuality {
    /// Quotes and explains, substantial, not filler.
    Genuine,
    /// Has quotes or explanations but not the full structure.
    Partial,
    /// Placeholder or filler text.
    Generic,
    /// None of the expected structure.
    Poor,
}

impl ContentQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Genuine => "Genuine",
            Self::Partial => "Partial",
            Self::Generic => "Generic",
            Self::Poor => "Poor",
        }
    }

    /// Issue text reported for this category, if any.
    pub fn issue(&self) -> Option<&'static str> {
        match self {
            Self::Genuine => None,
            Self::Partial => Some("Analysis content appears incomplete"),
            Self::Generic => Some("Analysis contains generic/placeholder content"),
            Self::Poor => Some("Analysis lacks proper quote-and-explain format"),
        }
    }
}

impl std::fmt::Display for ContentQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw signals read from a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentSignals {
    pub has_quotes: bool,
    pub has_explanations: bool,
    pub is_generic: bool,
    pub char_len: usize,
}

impl ContentSignals {
    /// Fold the signals into one category.
    ///
    /// 1. quotes + explanations + not generic + longer than 500 chars → `Genuine`
    /// 2. quotes or explanations → `Partial`
    /// 3. generic → `Generic`
    /// 4. otherwise → `Poor`
    pub fn quality(&self) -> ContentQuality {
        if self.has_quotes
            && self.has_explanations
            && !self.is_generic
            && self.char_len > GENUINE_MIN_CHARS
        {
            ContentQuality::Genuine
        } else if self.has_quotes || self.has_explanations {
            ContentQuality::Partial
        } else if self.is_generic {
            ContentQuality::Generic
        } else {
            ContentQuality::Poor
        }
    }
}

/// Read the classification signals from raw text. `None` reads as empty.
pub fn inspect(raw: Option<&str>) -> ContentSignals {
    let text = raw.unwrap_or("");
    let lower = text.to_lowercase();
    let char_len = text.chars().count();

    let has_quotes =
        text.contains(QUOTE_MARKER) || (text.contains('"') && char_len > INLINE_QUOTE_MIN_CHARS);

    let has_explanations = lower.contains(&EXPLANATION_MARKER.to_lowercase())
        || text.contains("explanation")
        || text.contains("means");

    let is_generic = GENERIC_PHRASES
        .iter()
        .any(|phrase| lower.contains(&phrase.to_lowercase()));

    ContentSignals {
        has_quotes,
        has_explanations,
        is_generic,
        char_len,
    }
}

/// Classify raw document text.
pub fn classify(raw: Option<&str>) -> ContentQuality {
    inspect(raw).quality()
}
