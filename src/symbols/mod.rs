//! Symbol tables for math and text mode
//!
//! Named symbols (`\alpha`, `\times`, ...) live in static `phf` maps. Letters
//! and digits are registered at startup by [`create_symbols`], and callers
//! may add more with [`Symbols::define_symbol`].

mod types;
use phf::phf_map;

use crate::namespace::KeyMap;
pub use types::{Atom, CharInfo, Font, Group, Mode, NonAtom};

const fn sym(font: Font, group: Group, replace: char) -> CharInfo {
    CharInfo {
        font,
        group,
        replace: Some(replace),
    }
}

static MATH_SYMBOLS: phf::Map<&'static str, CharInfo> = phf_map! {
    "\\alpha" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03b1}'),
    "\\beta" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03b2}'),
    "\\gamma" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03b3}'),
    "\\delta" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03b4}'),
    "\\epsilon" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03f5}'),
    "\\zeta" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03b6}'),
    "\\eta" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03b7}'),
    "\\theta" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03b8}'),
    "\\iota" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03b9}'),
    "\\kappa" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03ba}'),
    "\\lambda" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03bb}'),
    "\\mu" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03bc}'),
    "\\nu" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03bd}'),
    "\\xi" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03be}'),
    "\\pi" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03c0}'),
    "\\rho" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03c1}'),
    "\\sigma" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03c3}'),
    "\\tau" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03c4}'),
    "\\upsilon" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03c5}'),
    "\\phi" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03d5}'),
    "\\chi" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03c7}'),
    "\\psi" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03c8}'),
    "\\omega" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03c9}'),
    "\\varepsilon" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03b5}'),
    "\\varphi" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03c6}'),
    "\\Gamma" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{0393}'),
    "\\Delta" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{0394}'),
    "\\Theta" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{0398}'),
    "\\Lambda" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{039b}'),
    "\\Xi" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{039e}'),
    "\\Pi" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03a0}'),
    "\\Sigma" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03a3}'),
    "\\Upsilon" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03a5}'),
    "\\Phi" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03a6}'),
    "\\Psi" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03a8}'),
    "\\Omega" => sym(Font::Main, Group::NonAtom(NonAtom::MathOrd), '\u{03a9}'),
    "+" => sym(Font::Main, Group::Atom(Atom::Bin), '+'),
    "-" => sym(Font::Main, Group::Atom(Atom::Bin), '\u{2212}'),
    "*" => sym(Font::Main, Group::Atom(Atom::Bin), '\u{2217}'),
    "\\cdot" => sym(Font::Main, Group::Atom(Atom::Bin), '\u{22c5}'),
    "\\times" => sym(Font::Main, Group::Atom(Atom::Bin), '\u{00d7}'),
    "\\pm" => sym(Font::Main, Group::Atom(Atom::Bin), '\u{00b1}'),
    "\\mp" => sym(Font::Main, Group::Atom(Atom::Bin), '\u{2213}'),
    "\\div" => sym(Font::Main, Group::Atom(Atom::Bin), '\u{00f7}'),
    "\\circ" => sym(Font::Main, Group::Atom(Atom::Bin), '\u{2218}'),
    "=" => sym(Font::Main, Group::Atom(Atom::Rel), '='),
    "<" => sym(Font::Main, Group::Atom(Atom::Rel), '<'),
    ">" => sym(Font::Main, Group::Atom(Atom::Rel), '>'),
    ":" => sym(Font::Main, Group::Atom(Atom::Rel), ':'),
    "\\approx" => sym(Font::Main, Group::Atom(Atom::Rel), '\u{2248}'),
    "\\sim" => sym(Font::Main, Group::Atom(Atom::Rel), '\u{223c}'),
    "\\neq" => sym(Font::Main, Group::Atom(Atom::Rel), '\u{2260}'),
    "\\leq" => sym(Font::Main, Group::Atom(Atom::Rel), '\u{2264}'),
    "\\geq" => sym(Font::Main, Group::Atom(Atom::Rel), '\u{2265}'),
    "\\to" => sym(Font::Main, Group::Atom(Atom::Rel), '\u{2192}'),
    "(" => sym(Font::Main, Group::Atom(Atom::Open), '('),
    "[" => sym(Font::Main, Group::Atom(Atom::Open), '['),
    "\\{" => sym(Font::Main, Group::Atom(Atom::Open), '{'),
    ")" => sym(Font::Main, Group::Atom(Atom::Close), ')'),
    "]" => sym(Font::Main, Group::Atom(Atom::Close), ']'),
    "\\}" => sym(Font::Main, Group::Atom(Atom::Close), '}'),
    "," => sym(Font::Main, Group::Atom(Atom::Punct), ','),
    ";" => sym(Font::Main, Group::Atom(Atom::Punct), ';'),
    "/" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '/'),
    "." => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '.'),
    "|" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '|'),
    "!" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '!'),
    "?" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '?'),
    "@" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '@'),
    "\\%" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '%'),
    "\\#" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '#'),
    "\\&" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '&'),
    "\\_" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '_'),
    "\\$" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '$'),
    "\\infty" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '\u{221e}'),
    "\\prime" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '\u{2032}'),
    "\\partial" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '\u{2202}'),
    "\\hbar" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '\u{210f}'),
    "\\ell" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '\u{2113}'),
    "\\cdots" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '\u{22ef}'),
    "\\ldots" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '\u{2026}'),
    "\\checkmark" => sym(Font::Ams, Group::NonAtom(NonAtom::TextOrd), '\u{2713}'),
    "\\ " => sym(Font::Main, Group::NonAtom(NonAtom::Spacing), '\u{00a0}'),
    "\\nobreakspace" => sym(Font::Main, Group::NonAtom(NonAtom::Spacing), '\u{00a0}'),
    "\\space" => sym(Font::Main, Group::NonAtom(NonAtom::Spacing), '\u{00a0}'),
};

static TEXT_SYMBOLS: phf::Map<&'static str, CharInfo> = phf_map! {
    "!" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '!'),
    "*" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '*'),
    "(" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '('),
    ")" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), ')'),
    "-" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '-'),
    "=" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '='),
    "+" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '+'),
    ";" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), ';'),
    ":" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), ':'),
    "?" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '?'),
    "/" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '/'),
    "." => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '.'),
    "," => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), ','),
    "[" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '['),
    "]" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), ']'),
    "|" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '|'),
    "@" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '@'),
    "`" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '\u{2018}'),
    "'" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '\u{2019}'),
    "\\%" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '%'),
    "\\#" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '#'),
    "\\&" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '&'),
    "\\_" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '_'),
    "\\$" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '$'),
    "\\textdegree" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '\u{00b0}'),
    "\\textmu" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '\u{00b5}'),
    "\\textendash" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '\u{2013}'),
    "\\textemdash" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '\u{2014}'),
    "\\textasciitilde" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '~'),
    "\\textbackslash" => sym(Font::Main, Group::NonAtom(NonAtom::TextOrd), '\\'),
    " " => sym(Font::Main, Group::NonAtom(NonAtom::Spacing), '\u{00a0}'),
    "\\ " => sym(Font::Main, Group::NonAtom(NonAtom::Spacing), '\u{00a0}'),
    "\\nobreakspace" => sym(Font::Main, Group::NonAtom(NonAtom::Spacing), '\u{00a0}'),
    "\\space" => sym(Font::Main, Group::NonAtom(NonAtom::Spacing), '\u{00a0}'),
};

/// Symbol table with separate math and text mappings.
///
/// Runtime definitions take precedence over the static tables.
#[derive(Debug, Default)]
pub struct Symbols {
    math: KeyMap<String, CharInfo>,
    text: KeyMap<String, CharInfo>,
}

impl Symbols {
    /// Creates a table holding only the static named symbols.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines `name` in `mode`. With `accept_unicode_char`, the replacement
    /// character itself is registered too.
    pub fn define_symbol(
        &mut self,
        mode: Mode,
        font: Font,
        group: Group,
        replace: Option<char>,
        name: &str,
        accept_unicode_char: bool,
    ) {
        let char_info = CharInfo {
            font,
            group,
            replace,
        };

        let table = match mode {
            Mode::Math => &mut self.math,
            Mode::Text => &mut self.text,
        };

        table.insert(name.to_owned(), char_info);

        if accept_unicode_char && let Some(s) = replace {
            table.insert(s.to_string(), char_info);
        }
    }

    #[must_use]
    pub fn get(&self, mode: Mode, name: &str) -> Option<&CharInfo> {
        match mode {
            Mode::Math => self.math.get(name).or_else(|| MATH_SYMBOLS.get(name)),
            Mode::Text => self.text.get(name).or_else(|| TEXT_SYMBOLS.get(name)),
        }
    }

    #[must_use]
    pub fn contains(&self, mode: Mode, name: &str) -> bool {
        self.get(mode, name).is_some()
    }
}

/// Creates the symbol table with letters and digits registered for both
/// modes.
#[must_use]
pub fn create_symbols() -> Symbols {
    let mut symbols = Symbols::new();

    for ch in '0'..='9' {
        for mode in [Mode::Math, Mode::Text] {
            symbols.define_symbol(
                mode,
                Font::Main,
                Group::NonAtom(NonAtom::TextOrd),
                Some(ch),
                &ch.to_string(),
                false,
            );
        }
    }

    for ch in ('A'..='Z').chain('a'..='z') {
        symbols.define_symbol(
            Mode::Math,
            Font::Main,
            Group::NonAtom(NonAtom::MathOrd),
            Some(ch),
            &ch.to_string(),
            false,
        );
        symbols.define_symbol(
            Mode::Text,
            Font::Main,
            Group::NonAtom(NonAtom::TextOrd),
            Some(ch),
            &ch.to_string(),
            false,
        );
    }

    symbols
}
