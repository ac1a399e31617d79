//! Macro definitions consumed by the [`MacroExpander`](crate::macro_expander::MacroExpander)
//!
//! A macro is either replacement text that is lexed on use, or an
//! already-lexed [`MacroExpansion`] such as the ones `\def` produces.

use crate::types::Token;

pub mod builtins;

/// One argument consumed from the token stream.
#[derive(Debug, Clone)]
pub struct MacroArg {
    /// The argument tokens in reverse order, outer braces stripped.
    pub tokens: Vec<Token>,
    /// The first token of the argument (its opening brace, if any).
    pub start: Token,
    /// The last token of the argument.
    pub end: Token,
}

/// A lexed macro body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroExpansion {
    /// Body tokens in reverse order, ready to be pushed onto the stack.
    pub tokens: Vec<Token>,
    pub num_args: usize,
    /// Delimiter tokens before each argument, as `\def\foo#1.{…}` declares.
    pub delimiters: Option<Vec<Vec<String>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacroDefinition {
    String(String),
    StaticStr(&'static str),
    Expansion(MacroExpansion),
}

impl MacroDefinition {
    /// The replacement text, for definitions that still have one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::StaticStr(s) => Some(s),
            Self::Expansion(_) => None,
        }
    }
}

impl From<&str> for MacroDefinition {
    fn from(body: &str) -> Self {
        Self::String(body.to_owned())
    }
}
