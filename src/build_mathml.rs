//! MathML rendering
//!
//! Converts a parse tree into a `<math>` element. Each node type has a
//! builder registered in [`KatexContext::mathml_group_builders`]; this
//! module dispatches to them and merges adjacent text and number runs.

use strum::IntoDiscriminant as _;

use crate::ParseError;
use crate::context::KatexContext;
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType, TextNode};
use crate::options::Options;
use crate::parser::parse_node::AnyParseNode;
use crate::symbols::Symbols;
use crate::types::{Mode, ParseErrorKind};

const MATHML_NAMESPACE: &str = "http://www.w3.org/1998/Math/MathML";

/// Makes a text node, applying the symbol table's replacement character.
#[must_use]
pub fn make_text(text: &str, mode: Mode, symbols: &Symbols) -> TextNode {
    let text = symbols
        .get(mode, text)
        .and_then(|info| info.replace)
        .map_or_else(|| text.to_owned(), String::from);
    TextNode { text }
}

/// Wraps `body` in an `<mrow>` unless it is a single node.
#[must_use]
pub fn make_row(mut body: Vec<MathDomNode>) -> MathDomNode {
    if body.len() == 1
        && let Some(node) = body.pop()
    {
        return node;
    }
    MathNode::with_children(MathNodeType::Mrow, body).into()
}

/// The `mathvariant` for a leaf node under the current font, if any.
#[must_use]
pub fn get_variant(group: &AnyParseNode, options: &Options) -> Option<&'static str> {
    group.text()?;
    match options.font.as_str() {
        "mathrm" => Some("normal"),
        "mathit" => Some("italic"),
        "mathbf" => Some("bold"),
        "mathsf" => Some("sans-serif"),
        "mathtt" => Some("monospace"),
        _ => None,
    }
}

fn single_text_child(node: &MathNode) -> Option<&str> {
    match node.children.as_slice() {
        [MathDomNode::Text(text)] => Some(&text.text),
        _ => None,
    }
}

/// A decimal point that may join the numbers around it.
fn is_number_punctuation(node: &MathNode) -> bool {
    node.node_type == MathNodeType::Mi && single_text_child(node) == Some(".")
}

/// Builds a list of nodes, merging neighbors that belong together:
/// `<mtext>` runs with the same variant, and digits with their decimal
/// points.
pub fn build_expression(
    ctx: &KatexContext,
    expression: &[AnyParseNode],
    options: &Options,
) -> Result<Vec<MathDomNode>, ParseError> {
    let mut groups: Vec<MathDomNode> = Vec::with_capacity(expression.len());

    for node in expression {
        let group = build_group(ctx, node, options)?;

        if let Some(MathDomNode::Math(last)) = groups.last_mut()
            && let MathDomNode::Math(current) = &group
        {
            let mergeable = match (last.node_type, current.node_type) {
                (MathNodeType::Mtext, MathNodeType::Mtext) => {
                    last.get_attribute("mathvariant") == current.get_attribute("mathvariant")
                }
                (MathNodeType::Mn, MathNodeType::Mn) => true,
                (MathNodeType::Mn, _) => is_number_punctuation(current),
                _ => false,
            };
            if mergeable {
                last.children.extend(current.children.iter().cloned());
                continue;
            }
            if current.node_type == MathNodeType::Mn && is_number_punctuation(last) {
                let mut merged = current.clone();
                let mut children = core::mem::take(&mut last.children);
                children.append(&mut merged.children);
                merged.children = children;
                *last = merged;
                continue;
            }
        }

        groups.push(group);
    }

    Ok(groups)
}

/// Builds `expression` and wraps the result with [`make_row`].
pub fn build_expression_row(
    ctx: &KatexContext,
    expression: &[AnyParseNode],
    options: &Options,
) -> Result<MathDomNode, ParseError> {
    Ok(make_row(build_expression(ctx, expression, options)?))
}

/// Dispatches `group` to the builder registered for its node type.
pub fn build_group(
    ctx: &KatexContext,
    group: &AnyParseNode,
    options: &Options,
) -> Result<MathDomNode, ParseError> {
    let group_type = group.discriminant();
    ctx.mathml_group_builders.get(&group_type).map_or_else(
        || Err(ParseError::new(ParseErrorKind::UnknownGroupType { group_type })),
        |builder| builder(group, options, ctx),
    )
}

/// Builds the complete `<math>` element, annotated with the source TeX.
pub fn build_mathml(
    ctx: &KatexContext,
    tree: &[AnyParseNode],
    tex_expression: &str,
    options: &Options,
    is_display_mode: bool,
) -> Result<MathNode, ParseError> {
    let mut expression = build_expression(ctx, tree, options)?;

    let is_row = matches!(
        expression.as_slice(),
        [MathDomNode::Math(node)] if node.node_type == MathNodeType::Mrow
    );
    let wrapper = if is_row {
        expression.remove(0)
    } else {
        MathNode::with_children(MathNodeType::Mrow, expression).into()
    };

    let mut annotation = MathNode::with_children(
        MathNodeType::Annotation,
        vec![
            TextNode {
                text: tex_expression.to_owned(),
            }
            .into(),
        ],
    );
    annotation.set_attribute("encoding", "application/x-tex");

    let semantics =
        MathNode::with_children(MathNodeType::Semantics, vec![wrapper, annotation.into()]);

    let mut math = MathNode::with_children(MathNodeType::Math, vec![semantics.into()]);
    math.set_attribute("xmlns", MATHML_NAMESPACE);
    if is_display_mode {
        math.set_attribute("display", "block");
    }
    Ok(math)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::tree::VirtualNode as _;
    use crate::{KatexContext, Settings};

    fn render_body(input: &str) -> String {
        let settings = Settings::default();
        let ctx = KatexContext::default();
        let tree = Parser::new(input, &settings, &ctx).parse().unwrap();
        build_expression_row(&ctx, &tree, &Options::default())
            .unwrap()
            .to_markup()
            .unwrap()
    }

    #[test]
    fn test_numbers_merge_with_decimal_point() {
        assert_eq!(render_body("3.25"), "<mn>3.25</mn>");
        assert_eq!(
            render_body("12x"),
            "<mrow><mn>12</mn><mi>x</mi></mrow>"
        );
    }

    #[test]
    fn test_text_runs_merge() {
        assert_eq!(render_body(r"\text{ab}"), "<mtext>ab</mtext>");
    }

    #[test]
    fn test_math_wrapper() {
        let settings = Settings::default();
        let ctx = KatexContext::default();
        let tree = Parser::new("x", &settings, &ctx).parse().unwrap();
        let math = build_mathml(&ctx, &tree, "x", &Options::default(), true).unwrap();
        assert_eq!(
            math.to_markup().unwrap(),
            "<math xmlns=\"http://www.w3.org/1998/Math/MathML\" display=\"block\">\
             <semantics><mrow><mi>x</mi></mrow>\
             <annotation encoding=\"application/x-tex\">x</annotation>\
             </semantics></math>"
        );
    }

    #[test]
    fn test_variant_follows_font() {
        let node = AnyParseNode::MathOrd(crate::parser::parse_node::ParseNodeMathOrd {
            mode: Mode::Math,
            loc: None,
            text: "x".to_owned(),
        });
        let rm = Options::default().with_font("mathrm".to_owned());
        assert_eq!(get_variant(&node, &rm), Some("normal"));
        assert_eq!(get_variant(&node, &Options::default()), None);
    }
}
