//! Symbols with an atom class: operators, relations, delimiters and
//! punctuation

use crate::ParseError;
use crate::build_mathml::{get_variant, make_text};
use crate::context::KatexContext;
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType};
use crate::options::Options;
use crate::parser::parse_node::{AnyParseNode, NodeType};
use crate::symbols::Atom;

pub fn define_symbols_op(ctx: &mut KatexContext) {
    ctx.define_function_builders(NodeType::Atom, Some(atom_mathml_builder));
}

fn atom_mathml_builder(
    node: &AnyParseNode,
    options: &Options,
    ctx: &KatexContext,
) -> Result<MathDomNode, ParseError> {
    let AnyParseNode::Atom(atom) = node else {
        return Err(ParseError::new("Expected Atom node"));
    };

    let mut mo = MathNode::with_children(
        MathNodeType::Mo,
        vec![make_text(&atom.text, atom.mode, &ctx.symbols).into()],
    );
    if atom.family == Atom::Punct {
        mo.set_attribute("separator", "true");
    } else if let Some(variant) = get_variant(node, options) {
        mo.set_attribute("mathvariant", variant);
    }

    Ok(mo.into())
}
