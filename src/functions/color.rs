//! `\textcolor` and `\color`
//!
//! `\textcolor{red}{x}` colors its second argument. `\color{red}` colors
//! everything after it up to the end of the enclosing group.

use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec, ord_argument};
use crate::macros::MacroDefinition;
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::options::Options;
use crate::parser::parse_node::{NodeType, ParseNode, ParseNodeColor};
use crate::types::{ArgType, ParseError};
use crate::{KatexContext, build_mathml};

fn color_argument(node: Option<&ParseNode>) -> Result<String, ParseError> {
    match node {
        Some(ParseNode::ColorToken(token)) => Ok(token.color.clone()),
        _ => Err(ParseError::new("Expected color-token for color argument")),
    }
}

pub fn define_color(ctx: &mut KatexContext) {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Color),
        names: &["\\textcolor"],
        props: FunctionPropSpec {
            num_args: 2,
            allowed_in_text: true,
            arg_types: Some(vec![ArgType::Color, ArgType::Original]),
            ..Default::default()
        },
        handler: Some(|context: FunctionContext, args, _opt_args| {
            let color = color_argument(args.first())?;
            let body = args.get(1).map(ord_argument).unwrap_or_default();

            Ok(ParseNode::Color(ParseNodeColor {
                mode: context.parser.mode,
                loc: context.loc(),
                color,
                body,
            }))
        }),
        mathml_builder: Some(mathml_builder),
    });

    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Color),
        names: &["\\color"],
        props: FunctionPropSpec {
            num_args: 1,
            allowed_in_text: true,
            arg_types: Some(vec![ArgType::Color]),
            ..Default::default()
        },
        handler: Some(|context: FunctionContext, args, _opt_args| {
            let color = color_argument(args.first())?;

            // color.sty keeps the active color in \current@color
            context.parser.gullet.macros_mut().set(
                "\\current@color",
                Some(MacroDefinition::String(color.clone())),
                false,
            );

            let body = context
                .parser
                .parse_expression(context.break_on_token_text)?;

            Ok(ParseNode::Color(ParseNodeColor {
                mode: context.parser.mode,
                loc: context.loc(),
                color,
                body,
            }))
        }),
        mathml_builder: Some(mathml_builder),
    });
}

fn mathml_builder(
    node: &ParseNode,
    options: &Options,
    ctx: &KatexContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::Color(color_node) = node else {
        return Err(ParseError::new("Expected Color node"));
    };

    let inner = build_mathml::build_expression(
        ctx,
        &color_node.body,
        &options.with_color(color_node.color.clone()),
    )?;

    let mut node = MathNode::builder()
        .node_type(MathNodeType::Mstyle)
        .children(inner)
        .build();
    node.set_attribute("mathcolor", color_node.color.clone());

    Ok(MathDomNode::Math(node))
}
