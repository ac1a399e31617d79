//! Parse error handling
//!
//! [`ParseError`] carries the kind of failure plus, when a token is at hand,
//! the position of the offending text so the message can show it in context.

use crate::parser::ParseNodeError;
use crate::parser::parse_node::{AnyParseNode, NodeType};
use crate::symbols::Mode;
use crate::types::SourceLocation;
use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
#[cfg(feature = "backtrace")]
use std::backtrace::Backtrace;
use thiserror::Error;

/// Error raised while lexing, expanding, parsing or building an expression.
#[derive(Debug, Error)]
#[error("KaTeX parse error: {kind}{context}")]
pub struct ParseError {
    /// What went wrong.
    #[source]
    pub kind: Box<ParseErrorKind>,
    /// Byte offset of the offending text, when known.
    pub position: Option<usize>,
    /// Byte length of the offending text, when known.
    pub length: Option<usize>,
    context: ParseErrorContext,
    /// Where the error was raised, captured with the `backtrace` feature.
    #[cfg(feature = "backtrace")]
    pub backtrace: Box<Backtrace>,
}

impl ParseError {
    /// Creates an error without location information.
    pub fn new<T: Into<ParseErrorKind>>(kind: T) -> Self {
        Self::from_kind(kind.into(), ParseErrorContext::None, None, None)
    }

    /// Creates an error pointing at the location of `token`.
    pub fn with_token<T: Into<ParseErrorKind>>(kind: T, token: &dyn ErrorLocationProvider) -> Self {
        let mut position = None;
        let mut length = None;
        let context = token.loc().filter(|loc| loc.start() <= loc.end()).map_or(
            ParseErrorContext::None,
            |loc| {
                let start = loc.start();
                let end = loc.end();
                position = Some(start);
                length = Some(end.saturating_sub(start));
                ParseErrorContext::Location(loc.clone())
            },
        );

        Self::from_kind(kind.into(), context, position, length)
    }

    fn from_kind(
        kind: ParseErrorKind,
        context: ParseErrorContext,
        position: Option<usize>,
        length: Option<usize>,
    ) -> Self {
        Self {
            kind: Box::new(kind),
            position,
            length,
            context,
            #[cfg(feature = "backtrace")]
            backtrace: Box::new(Backtrace::force_capture()),
        }
    }
}

impl From<fmt::Error> for ParseError {
    fn from(_: fmt::Error) -> Self {
        Self::new(ParseErrorKind::Message("failed to write markup"))
    }
}

impl From<strum::ParseError> for ParseError {
    fn from(err: strum::ParseError) -> Self {
        Self::new(ParseErrorKind::EnumParse(err))
    }
}

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("{0}")]
    Message(&'static str),
    #[error("Got group of unknown type: {group_type}")]
    UnknownGroupType { group_type: NodeType },
    #[error("Invalid size: '{size}'")]
    InvalidSize { size: String },
    #[error("Invalid unit: '{unit}'")]
    InvalidUnit { unit: String },
    #[error("Expected '{expected}', got '{found}'")]
    ExpectedToken { expected: String, found: String },
    #[error("Unexpected character: {character}")]
    UnexpectedCharacter { character: String },
    #[error("Invalid argument number: {value}")]
    InvalidMacroArgumentNumber { value: String },
    #[error("Expected #{expected} but found #{found}")]
    ExpectedMacroParameter { expected: usize, found: usize },
    #[error("Got function '{func}' with no arguments as {context}")]
    FunctionMissingArguments { func: String, context: String },
    #[error("Can't use function {func} in {mode:?} mode")]
    FunctionDisallowedInMode { func: String, mode: Mode },
    #[error("Undefined control sequence: {name}")]
    UndefinedControlSequence { name: String },
    #[error("Unexpected end of input in a macro argument, expected '{expected}'")]
    UnexpectedEndOfMacroArgument { expected: String },
    #[error("Invalid {context}: '{value}'")]
    InvalidValue { context: String, value: String },
    #[error("Expected group as {context}")]
    ExpectedGroupAs { context: String },
    #[error("Expected group after '{symbol}'")]
    ExpectedGroupAfterSymbol { symbol: String },
    #[error("LaTeX-incompatible input and strict mode is set to 'error': {message} [{code}]")]
    StrictModeError { message: String, code: String },
    #[error("No function handler for {name}")]
    NoFunctionHandler { name: String },
    #[error("Too many expansions: infinite loop or need to increase maxExpand setting")]
    TooManyExpansions,
    #[error("Unbalanced namespace destruction: attempt to pop global namespace")]
    UnbalancedNamespaceDestruction,
    #[error("Double SI prefix: {first} is followed by {second} without a unit in between")]
    DoubleSiPrefix { first: String, second: String },
    #[error("SI prefix {prefix} is not followed by a unit")]
    DanglingSiPrefix { prefix: String },
    #[error(r"\per is followed by another \per without a unit in between")]
    DoubleSiPer,
    #[error(r"\per is not followed by a unit")]
    DanglingSiPer,
    #[error(r"{name} can only be used in the units argument of \si or \SI")]
    UnitCommandOutsideUnitField { name: String },
    #[error("Expected parsing to fail for '{expression}'")]
    ExpectedParseFailure { expression: String },
    #[error("Markup mismatch between '{left_expr}' and '{right_expr}':\n{left_markup}\n\n{right_markup}")]
    MarkupMismatch {
        left_expr: String,
        right_expr: String,
        left_markup: String,
        right_markup: String,
    },
    #[error("Enum parse error: {0}")]
    EnumParse(strum::ParseError),
    #[error(transparent)]
    ParseNode(#[from] ParseNodeError),
}

impl From<&'static str> for ParseErrorKind {
    fn from(message: &'static str) -> Self {
        Self::Message(message)
    }
}

#[derive(Debug)]
enum ParseErrorContext {
    None,
    Location(SourceLocation),
}

impl fmt::Display for ParseErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Location(SourceLocation { input, start, end }) => {
                let input_len = input.len();
                if *start == input_len {
                    write!(f, " at end of input: ")?;
                } else {
                    write!(f, " at position {}: ", start + 1)?;
                }

                let prefix_start = adjust_char_boundary(input, start.saturating_sub(15), false);
                if prefix_start > 0 {
                    write!(f, "\u{2026}")?;
                }
                write!(f, "{}", &input[prefix_start..*start])?;
                if end > start {
                    for c in input[*start..*end].chars() {
                        write!(f, "{c}\u{0332}")?;
                    }
                }
                let suffix_end = adjust_char_boundary(input, (*end + 15).min(input_len), true);
                if suffix_end < input_len {
                    write!(f, "{}\u{2026}", &input[*end..suffix_end])
                } else {
                    write!(f, "{}", &input[*end..])
                }
            }
        }
    }
}

const fn adjust_char_boundary(input: &str, mut index: usize, forward: bool) -> usize {
    if forward {
        while index < input.len() && !input.is_char_boundary(index) {
            index += 1;
        }
    } else {
        while index > 0 && !input.is_char_boundary(index) {
            index -= 1;
        }
    }
    index
}

/// Anything that may know where in the input it came from.
pub trait ErrorLocationProvider {
    fn loc(&self) -> Option<&SourceLocation>;
}

impl ErrorLocationProvider for AnyParseNode {
    fn loc(&self) -> Option<&SourceLocation> {
        match self {
            Self::Atom(node) => node.loc.as_ref(),
            Self::Color(node) => node.loc.as_ref(),
            Self::ColorToken(node) => node.loc.as_ref(),
            Self::Font(node) => node.loc.as_ref(),
            Self::Internal(node) => node.loc.as_ref(),
            Self::Kern(node) => node.loc.as_ref(),
            Self::MathOrd(node) => node.loc.as_ref(),
            Self::OrdGroup(node) => node.loc.as_ref(),
            Self::SiQuantity(node) => node.loc.as_ref(),
            Self::SiUnits(node) => node.loc.as_ref(),
            Self::Size(node) => node.loc.as_ref(),
            Self::Spacing(node) => node.loc.as_ref(),
            Self::SupSub(node) => node.loc.as_ref(),
            Self::Text(node) => node.loc.as_ref(),
            Self::TextOrd(node) => node.loc.as_ref(),
            Self::UnitRun(node) => node.loc.as_ref(),
        }
    }
}

impl ErrorLocationProvider for Option<AnyParseNode> {
    fn loc(&self) -> Option<&SourceLocation> {
        let n = self.as_ref()?;
        n.loc()
    }
}

impl From<ParseNodeError> for ParseError {
    fn from(err: ParseNodeError) -> Self {
        Self::new(ParseErrorKind::from(err))
    }
}
