//! Core type definitions shared by the lexer, parser and builders

mod source_location;
pub use source_location::{SourceLocation, SourceRangeRef};

mod parse_error;
pub use parse_error::{ErrorLocationProvider, ParseError, ParseErrorKind};

mod tokens;
pub use tokens::Token;

mod settings;
pub use settings::{Settings, StrictMode, StrictSetting};

pub use crate::symbols::Mode;
use strum::{AsRefStr, EnumString};

/// How a function argument is read before it reaches the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// A color name or hex value, e.g. `\textcolor{red}{…}`.
    Color,
    /// A dimension such as `3mu` or `0.5em`.
    Size,
    /// A group parsed in the current mode.
    Original,
    /// A single token or group, as TeX primitives read them.
    Primitive,
    /// A group parsed in the given mode.
    Mode(Mode),
    /// A unit specification, parsed with the unit vocabulary in scope.
    Units,
}

/// Token text that stops [`crate::parser::Parser::parse_expression`].
#[derive(Debug, Clone, PartialEq, Eq, EnumString, AsRefStr)]
pub enum BreakToken {
    #[strum(serialize = "}")]
    RightBrace,
    #[strum(serialize = "\\endgroup")]
    EndGroup,
    #[strum(serialize = "EOF")]
    Eof,
}
