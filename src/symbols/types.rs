use strum::AsRefStr;

/// Parsing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Math,
    Text,
}

/// Font a symbol is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Main,
    Ams,
}

/// Atom classes that affect spacing between symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Atom {
    Bin,
    Close,
    Inner,
    Open,
    Punct,
    Rel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonAtom {
    MathOrd,
    Spacing,
    TextOrd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Atom(Atom),
    NonAtom(NonAtom),
}

/// What the symbol table knows about one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharInfo {
    pub font: Font,
    pub group: Group,
    /// The character to output in place of the command name.
    pub replace: Option<char>,
}
