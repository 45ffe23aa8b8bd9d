//! Writing direction for the two site locales.
//!
//! The host supplies the direction per render. It decides which offset
//! calibration table a label strip uses and which edge a popover pins to
//! when it cannot fit horizontally.

use unicode_bidi::{BidiClass, bidi_class};

/// Horizontal writing direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }

    /// Direction for a BCP 47 locale tag (`"ar"`, `"ar-EG"`, `"en"`...).
    ///
    /// Unknown or malformed tags fall back to left-to-right.
    #[must_use]
    pub fn from_locale(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "ar" | "fa" | "he" | "ur" | "ps" | "sd" | "ug" | "yi" | "dv" | "ckb" => Self::Rtl,
            _ => Self::Ltr,
        }
    }

    /// Direction of the first strong character in `text` (UAX #9, rule P2).
    ///
    /// Returns `None` when the text has no strongly directional character,
    /// e.g. digits or punctuation only.
    #[must_use]
    pub fn of_text(text: &str) -> Option<Self> {
        text.chars().find_map(|ch| match bidi_class(ch) {
            BidiClass::L => Some(Self::Ltr),
            BidiClass::R | BidiClass::AL => Some(Self::Rtl),
            _ => None,
        })
    }
}
