//! `\relax`, a no-op that ends argument scanning

use crate::KatexContext;
use crate::define_function::{FunctionDefSpec, FunctionPropSpec};
use crate::parser::parse_node::{NodeType, ParseNode, ParseNodeInternal};

pub fn define_relax(ctx: &mut KatexContext) {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Internal),
        names: &["\\relax"],
        props: FunctionPropSpec {
            allowed_in_text: true,
            allowed_in_argument: true,
            ..Default::default()
        },
        handler: Some(|context, _args, _opt_args| {
            Ok(ParseNode::Internal(ParseNodeInternal {
                mode: context.parser.mode,
                loc: context.loc(),
            }))
        }),
        mathml_builder: None,
    });
}
