//! `\text` and its font variants

use crate::define_function::{FunctionDefSpec, FunctionPropSpec, ord_argument};
use crate::mathml_tree::MathDomNode;
use crate::options::Options;
use crate::parser::parse_node::{NodeType, ParseNode, ParseNodeText};
use crate::types::{ArgType, Mode, ParseError};
use crate::{KatexContext, build_mathml};

/// Maps a text command to the math font that gives the same variant.
fn text_font(func_name: &str) -> Option<String> {
    let font = match func_name {
        "\\textrm" => "mathrm",
        "\\textit" => "mathit",
        "\\textbf" => "mathbf",
        "\\textsf" => "mathsf",
        "\\texttt" => "mathtt",
        _ => return None,
    };
    Some(font.to_owned())
}

fn mathml_builder(
    node: &ParseNode,
    options: &Options,
    ctx: &KatexContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::Text(text_node) = node else {
        return Err(ParseError::new("Expected Text node"));
    };

    let new_options = match &text_node.font {
        Some(font) => options.with_font(font.clone()),
        None => options.clone(),
    };
    build_mathml::build_expression_row(ctx, &text_node.body, &new_options)
}

pub fn define_text(ctx: &mut KatexContext) {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Text),
        names: &[
            "\\text", "\\textrm", "\\textit", "\\textbf", "\\textsf", "\\texttt",
        ],
        props: FunctionPropSpec {
            num_args: 1,
            arg_types: Some(vec![ArgType::Mode(Mode::Text)]),
            allowed_in_argument: true,
            allowed_in_text: true,
            ..Default::default()
        },
        handler: Some(|context, args, _opt_args| {
            let body = args
                .first()
                .map(ord_argument)
                .ok_or_else(|| ParseError::new("Expected text argument"))?;
            Ok(ParseNode::Text(ParseNodeText {
                mode: context.parser.mode,
                loc: context.loc(),
                body,
                font: text_font(&context.func_name),
            }))
        }),
        mathml_builder: Some(mathml_builder),
    });
}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;
    use crate::parser::parse_node::ParseNode;
    use crate::tree::VirtualNode as _;
    use crate::types::Mode;
    use crate::{KatexContext, Settings, build_mathml, options::Options};

    #[test]
    fn test_text_body_is_text_mode() {
        let settings = Settings::default();
        let ctx = KatexContext::default();
        let tree = Parser::new(r"\text{a b}", &settings, &ctx).parse().unwrap();
        let ParseNode::Text(text) = &tree[0] else {
            panic!("expected text node");
        };
        assert_eq!(text.body.len(), 3);
        assert!(text.body.iter().all(|node| node.mode() == Mode::Text));
        assert_eq!(text.font, None);
    }

    #[test]
    fn test_text_font_variant() {
        let settings = Settings::default();
        let ctx = KatexContext::default();
        let tree = Parser::new(r"\textbf{ab}", &settings, &ctx).parse().unwrap();
        let markup = build_mathml::build_expression_row(&ctx, &tree, &Options::default())
            .unwrap()
            .to_markup()
            .unwrap();
        assert_eq!(markup, "<mtext mathvariant=\"bold\">ab</mtext>");
    }
}
