//! Braced groups

use crate::build_mathml;
use crate::context::KatexContext;
use crate::mathml_tree::MathDomNode;
use crate::options::Options;
use crate::parser::parse_node::{AnyParseNode, NodeType};
use crate::types::ParseError;

pub fn define_ordgroup(ctx: &mut KatexContext) {
    ctx.define_function_builders(NodeType::OrdGroup, Some(mathml_builder));
}

fn mathml_builder(
    node: &AnyParseNode,
    options: &Options,
    ctx: &KatexContext,
) -> Result<MathDomNode, ParseError> {
    let AnyParseNode::OrdGroup(group) = node else {
        return Err(ParseError::new("Expected OrdGroup node"));
    };

    build_mathml::build_expression_row(ctx, &group.body, options)
}
