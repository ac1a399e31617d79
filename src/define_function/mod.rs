//! Function definition utilities
//!
//! A function is a control sequence that the parser handles itself, reading
//! typed arguments and producing a parse node. Each node type may also
//! register a MathML builder.

use crate::KatexContext;
use crate::options::Options;
use crate::parser::Parser;
use crate::parser::parse_node::{NodeType, ParseNode};
use crate::tree::MathDomNode;
use crate::types::{ArgType, BreakToken, ErrorLocationProvider as _, SourceLocation};
use crate::types::{ParseError, Token};

/// Context passed to function handlers.
pub struct FunctionContext<'a, 'b> {
    pub func_name: String,
    pub parser: &'a mut Parser<'b>,
    /// The token that invoked the function, when there is one.
    pub token: Option<&'a Token>,
    pub break_on_token_text: Option<&'a BreakToken>,
}

impl FunctionContext<'_, '_> {
    /// Get the SourceLocation of the current token, if available.
    #[must_use]
    pub fn loc(&self) -> Option<SourceLocation> {
        let t = self.token?;
        t.loc().cloned()
    }
}

pub type FunctionHandler = fn(
    context: FunctionContext,
    args: Vec<ParseNode>,
    opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError>;

pub type MathMLBuilder =
    fn(node: &ParseNode, options: &Options, ctx: &KatexContext) -> Result<MathDomNode, ParseError>;

/// Properties that control how a function's arguments are parsed.
#[derive(Debug, Clone)]
pub struct FunctionPropSpec {
    pub num_args: usize,

    /// The type of each argument. Missing entries parse as
    /// [`ArgType::Original`].
    pub arg_types: Option<Vec<ArgType>>,

    /// Whether the function may itself be used as an argument without
    /// braces, like `\kern` in `x^\kern1em`.
    pub allowed_in_argument: bool,

    pub allowed_in_text: bool,

    pub allowed_in_math: bool,

    pub num_optional_args: usize,

    /// Whether the function is a TeX primitive
    pub primitive: bool,
}

impl Default for FunctionPropSpec {
    fn default() -> Self {
        Self {
            num_args: 0,
            arg_types: None,
            allowed_in_argument: false,
            allowed_in_text: false,
            allowed_in_math: true,
            num_optional_args: 0,
            primitive: false,
        }
    }
}

/// Everything needed to register one family of functions.
pub struct FunctionDefSpec<'b> {
    /// Unique string to differentiate parse nodes
    pub node_type: Option<NodeType>,

    pub names: &'b [&'b str],

    pub props: FunctionPropSpec,

    pub handler: Option<FunctionHandler>,

    pub mathml_builder: Option<MathMLBuilder>,
}

/// Runtime function specification used during parsing.
#[derive(Debug, Clone)]
pub struct FunctionSpec {
    pub node_type: Option<NodeType>,
    pub num_args: usize,
    pub arg_types: Option<Vec<ArgType>>,
    pub allowed_in_argument: bool,
    pub allowed_in_text: bool,
    pub allowed_in_math: bool,
    pub num_optional_args: usize,
    pub primitive: bool,
    pub handler: Option<FunctionHandler>,
}

/// Unwraps a single-element ordgroup.
#[must_use]
pub fn normalize_argument(arg: &ParseNode) -> &ParseNode {
    if let ParseNode::OrdGroup(ord) = arg
        && ord.body.len() == 1
    {
        return &ord.body[0];
    }
    arg
}

/// Normalizes a function argument into a list of elements.
#[must_use]
pub fn ord_argument(arg: &ParseNode) -> Vec<ParseNode> {
    if let ParseNode::OrdGroup(ord) = arg {
        return ord.body.clone();
    }
    vec![arg.clone()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_node::{ParseNodeMathOrd, ParseNodeOrdGroup};
    use crate::types::Mode;

    fn mathord(text: &str) -> ParseNode {
        ParseNode::MathOrd(ParseNodeMathOrd {
            mode: Mode::Math,
            loc: None,
            text: text.to_owned(),
        })
    }

    fn group(body: Vec<ParseNode>) -> ParseNode {
        ParseNode::OrdGroup(ParseNodeOrdGroup {
            mode: Mode::Math,
            loc: None,
            body,
            semisimple: None,
        })
    }

    #[test]
    fn test_normalize_argument() {
        let single = group(vec![mathord("x")]);
        assert_eq!(normalize_argument(&single), &mathord("x"));
        let pair = group(vec![mathord("x"), mathord("y")]);
        assert_eq!(normalize_argument(&pair), &pair);
    }

    #[test]
    fn test_ord_argument() {
        assert_eq!(ord_argument(&group(vec![mathord("x"), mathord("y")])).len(), 2);
        assert_eq!(ord_argument(&mathord("x")), [mathord("x")]);
    }
}
