//! Explicit space symbols such as `\ ` and `~`

use crate::ParseError;
use crate::build_mathml::make_text;
use crate::context::KatexContext;
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::options::Options;
use crate::parser::parse_node::{NodeType, ParseNode};
use crate::types::ParseErrorKind;

pub fn define_spacing(ctx: &mut KatexContext) {
    ctx.define_function_builders(NodeType::Spacing, Some(mathml_builder));
}

/// Spaces render as their replacement character, a no-break space for the
/// regular ones.
fn mathml_builder(
    node: &ParseNode,
    _options: &Options,
    ctx: &KatexContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::Spacing(spacing_node) = node else {
        return Err(ParseError::new("Expected spacing node"));
    };
    if !ctx.symbols.contains(spacing_node.mode, &spacing_node.text) {
        return Err(ParseError::new(ParseErrorKind::UndefinedControlSequence {
            name: spacing_node.text.clone(),
        }));
    }

    let text = make_text(&spacing_node.text, spacing_node.mode, &ctx.symbols);
    Ok(MathNode::with_children(MathNodeType::Mtext, vec![text.into()]).into())
}
