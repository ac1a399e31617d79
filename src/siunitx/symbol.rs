//! Display symbols for prefixes and units
//!
//! A symbol is a short run of [`SymbolAtom`]s. Most atoms are ASCII text;
//! the few symbols that are not plain text are [`Glyph`] references so
//! the renderer keeps them as separate pieces.

use strum::{AsRefStr, EnumIter};

/// A character that is not plain ASCII text.
///
/// The characters are configuration data. [`Glyph::as_char`] is the only
/// place they are chosen, so swapping in a different code point for a
/// target font touches nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Glyph {
    /// The micro sign of the `micro` prefix.
    Micro,
    /// The capital omega of the `ohm` unit.
    Ohm,
    /// Used by `\degreeCelsius` and `\degree`.
    Degree,
    ArcMinute,
    ArcSecond,
    Angstrom,
}

impl Glyph {
    /// The code point the glyph is rendered with.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Micro => '\u{00b5}',
            Self::Ohm => '\u{03a9}',
            Self::Degree => '\u{00b0}',
            Self::ArcMinute => '\u{2032}',
            Self::ArcSecond => '\u{2033}',
            Self::Angstrom => '\u{00c5}',
        }
    }
}

/// One element of a prefix or unit symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolAtom {
    Text(&'static str),
    Glyph(Glyph),
}

impl SymbolAtom {
    pub(crate) fn push_to(self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Glyph(glyph) => out.push(glyph.as_char()),
        }
    }
}

/// Renders a symbol run as a plain string.
#[must_use]
pub fn symbol_text(symbol: &[SymbolAtom]) -> String {
    let mut out = String::new();
    for atom in symbol {
        atom.push_to(&mut out);
    }
    out
}
