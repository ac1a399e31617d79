//! Turning a parsed (prefix, unit) pair into a renderable run

use strum::{AsRefStr, IntoStaticStr};

use crate::siunitx::prefixes::Prefix;
use crate::siunitx::symbol::{Glyph, SymbolAtom};
use crate::siunitx::unit_table::Unit;

/// One unit with the prefix that scales it, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedUnit {
    /// The prefix consumed by this unit.
    pub prefix: Option<&'static Prefix>,
    /// The unit itself.
    pub unit: &'static Unit,
}

impl ParsedUnit {
    /// The power of ten contributed by the prefix, `0` when unprefixed.
    #[must_use]
    pub fn exponent(&self) -> i8 {
        self.prefix.map_or(0, |p| p.exponent)
    }
}

/// One piece of a run. Adjacent text is merged; glyphs stay separate so
/// the builder can pick their code points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunPiece {
    /// Plain symbol text such as `kHz`.
    Text(String),
    /// A symbol that is not plain text, such as the ohm sign.
    Glyph(Glyph),
}

/// Font style of a run. Units are always set upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, IntoStaticStr)]
pub enum RunStyle {
    /// `mathvariant="normal"`
    #[default]
    #[strum(serialize = "normal")]
    Upright,
}

/// The rendered form of one [`ParsedUnit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRun {
    /// The (prefix, unit) pair this run was built from.
    pub parsed: ParsedUnit,
    /// Prefix symbol followed by unit symbol.
    pub pieces: Vec<RunPiece>,
    pub style: RunStyle,
}

impl RenderRun {
    /// The run as plain text, glyphs included.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                RunPiece::Text(text) => out.push_str(text),
                RunPiece::Glyph(glyph) => out.push(glyph.as_char()),
            }
        }
        out
    }
}

/// Builds the run for `prefix` followed by `unit`.
///
/// Consecutive text atoms are merged into one piece; every glyph atom is a
/// piece of its own.
#[must_use]
pub fn build_run(prefix: Option<&'static Prefix>, unit: &'static Unit) -> RenderRun {
    let atoms = prefix
        .map_or(&[][..], |p| p.symbol)
        .iter()
        .chain(unit.symbol);
    let mut pieces: Vec<RunPiece> = Vec::new();
    for atom in atoms {
        match (*atom, pieces.last_mut()) {
            (SymbolAtom::Text(text), Some(RunPiece::Text(prev))) => prev.push_str(text),
            (SymbolAtom::Text(text), _) => pieces.push(RunPiece::Text(text.to_owned())),
            (SymbolAtom::Glyph(glyph), _) => pieces.push(RunPiece::Glyph(glyph)),
        }
    }
    RenderRun {
        parsed: ParsedUnit { prefix, unit },
        pieces,
        style: RunStyle::Upright,
    }
}
