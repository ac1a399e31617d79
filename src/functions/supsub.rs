//! Superscripts and subscripts
//!
//! There is no `\sup` command; the parser builds supsub nodes directly when
//! it meets `^`, `_` or `'`. Only the builder is registered here.

use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::options::Options;
use crate::parser::parse_node::{NodeType, ParseNode};
use crate::types::ParseError;
use crate::{KatexContext, build_mathml};

pub fn define_supsub(ctx: &mut KatexContext) {
    ctx.define_function_builders(NodeType::SupSub, Some(mathml_builder));
}

fn mathml_builder(
    node: &ParseNode,
    options: &Options,
    ctx: &KatexContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::SupSub(group) = node else {
        return Err(ParseError::new("Expected SupSub node"));
    };

    // A missing base still needs a slot in the script element.
    let base = match group.base.as_deref() {
        Some(base) => build_mathml::build_group(ctx, base, options)?,
        None => MathNode::with_children(MathNodeType::Mrow, Vec::new()).into(),
    };
    let mut children = vec![base];

    if let Some(sub) = &group.sub {
        children.push(build_mathml::build_group(ctx, sub, options)?);
    }
    if let Some(sup) = &group.sup {
        children.push(build_mathml::build_group(ctx, sup, options)?);
    }

    let node_type = match (&group.sub, &group.sup) {
        (None, _) => MathNodeType::Msup,
        (Some(_), None) => MathNodeType::Msub,
        (Some(_), Some(_)) => MathNodeType::Msubsup,
    };

    Ok(MathNode::with_children(node_type, children).into())
}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;
    use crate::tree::VirtualNode as _;
    use crate::{KatexContext, Settings, build_mathml, options::Options};

    fn render(input: &str) -> String {
        let settings = Settings::default();
        let ctx = KatexContext::default();
        let tree = Parser::new(input, &settings, &ctx).parse().unwrap();
        build_mathml::build_expression_row(&ctx, &tree, &Options::default())
            .unwrap()
            .to_markup()
            .unwrap()
    }

    #[test]
    fn test_script_elements() {
        assert_eq!(render("x^2"), "<msup><mi>x</mi><mn>2</mn></msup>");
        assert_eq!(render("x_i"), "<msub><mi>x</mi><mi>i</mi></msub>");
        assert_eq!(
            render("x_i^2"),
            "<msubsup><mi>x</mi><mi>i</mi><mn>2</mn></msubsup>"
        );
    }

    #[test]
    fn test_missing_base() {
        assert_eq!(render("^2"), "<msup><mrow></mrow><mn>2</mn></msup>");
    }
}
