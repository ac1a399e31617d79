//! Ordinary symbols: mathord and textord

use phf::phf_map;

use crate::ParseError;
use crate::build_mathml::{get_variant, make_text};
use crate::context::KatexContext;
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::options::Options;
use crate::parser::parse_node::{AnyParseNode, NodeType};
use crate::types::Mode;

/// The `mathvariant` each element gets without an attribute.
static DEFAULT_VARIANT: phf::Map<&'static str, &'static str> = phf_map! {
    "mi" => "italic",
    "mn" => "normal",
    "mtext" => "normal",
};

pub fn define_symbols_ord(ctx: &mut KatexContext) {
    ctx.define_function_builders(NodeType::MathOrd, Some(mathord_mathml_builder));
    ctx.define_function_builders(NodeType::TextOrd, Some(textord_mathml_builder));
}

fn mathord_mathml_builder(
    node: &AnyParseNode,
    options: &Options,
    ctx: &KatexContext,
) -> Result<MathDomNode, ParseError> {
    let AnyParseNode::MathOrd(group) = node else {
        return Err(ParseError::new("Expected MathOrd node"));
    };
    let mut mi_node = MathNode::with_children(
        MathNodeType::Mi,
        vec![make_text(&group.text, group.mode, &ctx.symbols).into()],
    );

    let variant = get_variant(node, options).unwrap_or("italic");
    if Some(&variant) != DEFAULT_VARIANT.get("mi") {
        mi_node.set_attribute("mathvariant", variant);
    }

    Ok(mi_node.into())
}

fn textord_mathml_builder(
    node: &AnyParseNode,
    options: &Options,
    ctx: &KatexContext,
) -> Result<MathDomNode, ParseError> {
    let AnyParseNode::TextOrd(group) = node else {
        return Err(ParseError::new("Expected TextOrd node"));
    };

    let text = make_text(&group.text, group.mode, &ctx.symbols);
    let variant = get_variant(node, options).unwrap_or("normal");

    let element_type = if group.mode == Mode::Text {
        MathNodeType::Mtext
    } else if group.text.chars().any(|c| c.is_ascii_digit()) {
        MathNodeType::Mn
    } else if group.text == "\\prime" {
        MathNodeType::Mo
    } else {
        MathNodeType::Mi
    };

    let mut node = MathNode::with_children(element_type, vec![text.into()]);
    if Some(&variant) != DEFAULT_VARIANT.get(element_type.as_ref()) {
        node.set_attribute("mathvariant", variant);
    }

    Ok(node.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_node::{ParseNodeMathOrd, ParseNodeTextOrd};
    use crate::tree::VirtualNode as _;

    fn build(node: &AnyParseNode, options: &Options) -> String {
        let ctx = KatexContext::default();
        crate::build_mathml::build_group(&ctx, node, options)
            .unwrap()
            .to_markup()
            .unwrap()
    }

    #[test]
    fn test_mathord_variants() {
        let x = AnyParseNode::MathOrd(ParseNodeMathOrd {
            mode: Mode::Math,
            loc: None,
            text: "x".to_owned(),
        });
        assert_eq!(build(&x, &Options::default()), "<mi>x</mi>");
        assert_eq!(
            build(&x, &Options::default().with_font("mathrm".to_owned())),
            "<mi mathvariant=\"normal\">x</mi>"
        );
    }

    #[test]
    fn test_textord_elements() {
        let textord = |text: &str, mode| {
            AnyParseNode::TextOrd(ParseNodeTextOrd {
                mode,
                loc: None,
                text: text.to_owned(),
            })
        };
        let options = Options::default();
        assert_eq!(build(&textord("5", Mode::Math), &options), "<mn>5</mn>");
        assert_eq!(build(&textord("a", Mode::Text), &options), "<mtext>a</mtext>");
        assert_eq!(
            build(&textord("\\prime", Mode::Math), &options),
            "<mo>\u{2032}</mo>"
        );
    }
}
