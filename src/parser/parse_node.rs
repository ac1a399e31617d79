//! Parse node definitions
//!
//! The parser produces a tree of [`AnyParseNode`]s which the MathML
//! builders consume. Every node records its [`Mode`] and, when known, the
//! source range it came from.

use strum::{AsRefStr, Display, EnumDiscriminants};
use thiserror::Error;

use crate::siunitx::{RenderRun, UnitExpression};
use crate::symbols::Atom;
use crate::types::{Mode, SourceLocation};
use crate::units::MeasurementOwned;

/// Any node of the parse tree.
///
/// [`NodeType`] is the matching discriminant, used to key the builder
/// registry.
#[derive(Debug, Clone, PartialEq, EnumDiscriminants)]
#[strum_discriminants(vis(pub))]
#[strum_discriminants(doc = "Discriminant type for runtime type checking of parse nodes")]
#[strum_discriminants(derive(Display, Hash, AsRefStr), strum(serialize_all = "lowercase"))]
#[strum_discriminants(name(NodeType))]
pub enum AnyParseNode {
    /// A symbol with an atom class such as `+` or `=`
    Atom(ParseNodeAtom),
    /// `\color` and `\textcolor`
    Color(ParseNodeColor),
    /// A color argument before it is applied
    #[strum_discriminants(strum(serialize = "color-token"))]
    ColorToken(ParseNodeColorToken),
    /// `\mathrm` and friends
    Font(ParseNodeFont),
    /// Produced by commands with no visible output, like `\def`
    Internal(ParseNodeInternal),
    Kern(ParseNodeKern),
    MathOrd(ParseNodeMathOrd),
    /// A braced group
    OrdGroup(ParseNodeOrdGroup),
    /// `\SI{number}{units}`
    #[strum_discriminants(strum(serialize = "si-quantity"))]
    SiQuantity(Box<ParseNodeSiQuantity>),
    /// `\si{units}`, and the units half of `\SI`
    #[strum_discriminants(strum(serialize = "si-units"))]
    SiUnits(ParseNodeSiUnits),
    /// A size argument before it is applied
    Size(ParseNodeSize),
    Spacing(ParseNodeSpacing),
    SupSub(ParseNodeSupSub),
    Text(ParseNodeText),
    TextOrd(ParseNodeTextOrd),
    /// One prefixed unit inside a unit field
    #[strum_discriminants(strum(serialize = "unit-run"))]
    UnitRun(ParseNodeUnitRun),
}

/// Alias used throughout the crate.
pub type ParseNode = AnyParseNode;

impl AnyParseNode {
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Self::Atom(n) => n.mode,
            Self::Color(n) => n.mode,
            Self::ColorToken(n) => n.mode,
            Self::Font(n) => n.mode,
            Self::Internal(n) => n.mode,
            Self::Kern(n) => n.mode,
            Self::MathOrd(n) => n.mode,
            Self::OrdGroup(n) => n.mode,
            Self::SiQuantity(n) => n.mode,
            Self::SiUnits(n) => n.mode,
            Self::Size(n) => n.mode,
            Self::Spacing(n) => n.mode,
            Self::SupSub(n) => n.mode,
            Self::Text(n) => n.mode,
            Self::TextOrd(n) => n.mode,
            Self::UnitRun(n) => n.mode,
        }
    }

    #[must_use]
    pub fn loc(&self) -> Option<&SourceLocation> {
        match self {
            Self::Atom(n) => n.loc.as_ref(),
            Self::Color(n) => n.loc.as_ref(),
            Self::ColorToken(n) => n.loc.as_ref(),
            Self::Font(n) => n.loc.as_ref(),
            Self::Internal(n) => n.loc.as_ref(),
            Self::Kern(n) => n.loc.as_ref(),
            Self::MathOrd(n) => n.loc.as_ref(),
            Self::OrdGroup(n) => n.loc.as_ref(),
            Self::SiQuantity(n) => n.loc.as_ref(),
            Self::SiUnits(n) => n.loc.as_ref(),
            Self::Size(n) => n.loc.as_ref(),
            Self::Spacing(n) => n.loc.as_ref(),
            Self::SupSub(n) => n.loc.as_ref(),
            Self::Text(n) => n.loc.as_ref(),
            Self::TextOrd(n) => n.loc.as_ref(),
            Self::UnitRun(n) => n.loc.as_ref(),
        }
    }

    /// The symbol text of leaf nodes.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Atom(n) => Some(&n.text),
            Self::MathOrd(n) => Some(&n.text),
            Self::Spacing(n) => Some(&n.text),
            Self::TextOrd(n) => Some(&n.text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeAtom {
    pub family: Atom,
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeColor {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub color: String,
    pub body: Vec<AnyParseNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeColorToken {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeFont {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    /// Font command without the backslash, e.g. `mathrm`.
    pub font: String,
    pub body: Box<AnyParseNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeInternal {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeKern {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub dimension: MeasurementOwned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeMathOrd {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeOrdGroup {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub body: Vec<AnyParseNode>,
    /// Set for groups that should not become their own row, like the
    /// implicit group of `\begingroup`.
    pub semisimple: Option<bool>,
}

/// A number and its units, joined by the quantity space.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeSiQuantity {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub number: Vec<AnyParseNode>,
    pub space: MeasurementOwned,
    pub units: ParseNodeSiUnits,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeSiUnits {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub expression: UnitExpression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeSize {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub value: MeasurementOwned,
    pub is_blank: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeSpacing {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeSupSub {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub base: Option<Box<AnyParseNode>>,
    pub sup: Option<Box<AnyParseNode>>,
    pub sub: Option<Box<AnyParseNode>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeText {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub body: Vec<AnyParseNode>,
    pub font: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeTextOrd {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeUnitRun {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub run: RenderRun,
}

/// Errors raised when a node is not of the expected type.
#[derive(Debug, Error)]
pub enum ParseNodeError {
    #[error("Expected node of type {expected}, but got {actual}")]
    TypeMismatch { expected: NodeType, actual: String },
}

/// Checks that `node` exists and has type `expected_type`.
pub fn assert_node_type(
    node: Option<&AnyParseNode>,
    expected_type: NodeType,
) -> Result<NodeType, ParseNodeError> {
    let node = node.ok_or_else(|| ParseNodeError::TypeMismatch {
        expected: expected_type,
        actual: "null".to_owned(),
    })?;

    let actual_type = NodeType::from(node);

    if actual_type == expected_type {
        Ok(actual_type)
    } else {
        Err(ParseNodeError::TypeMismatch {
            expected: expected_type,
            actual: actual_type.to_string(),
        })
    }
}
