//! MathML for `\si`, `\SI` and the unit runs inside them

use core::str::FromStr as _;

use strum::IntoEnumIterator as _;

use crate::define_function::{FunctionDefSpec, FunctionPropSpec};
use crate::mathml_tree::{MathDomNode, MathNode, MathNodeType, SpaceNode, TextNode};
use crate::options::Options;
use crate::parser::parse_node::{NodeType, ParseNode, ParseNodeSiUnits};
use crate::siunitx::{RunPiece, SiCommand};
use crate::types::ParseError;
use crate::units::calculate_size;
use crate::{KatexContext, build_mathml};

pub fn define_siunitx(ctx: &mut KatexContext) {
    for command in SiCommand::iter() {
        let arg_types = command.arg_types();
        ctx.define_function(FunctionDefSpec {
            node_type: Some(command.node_type()),
            names: &[command.name()],
            props: FunctionPropSpec {
                num_args: arg_types.len(),
                arg_types: Some(arg_types),
                allowed_in_text: true,
                ..Default::default()
            },
            handler: Some(|context, args, _opt_args| {
                SiCommand::from_str(&context.func_name)?.build(&context, args)
            }),
            mathml_builder: None,
        });
    }

    ctx.define_function_builders(NodeType::SiUnits, Some(units_mathml_builder));
    ctx.define_function_builders(NodeType::SiQuantity, Some(quantity_mathml_builder));
    ctx.define_function_builders(NodeType::UnitRun, Some(run_mathml_builder));
}

/// Every piece of a run becomes an upright `<mi>`.
fn run_mathml_builder(
    node: &ParseNode,
    _options: &Options,
    _ctx: &KatexContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::UnitRun(group) = node else {
        return Err(ParseError::new("Expected UnitRun node"));
    };

    let pieces = group
        .run
        .pieces
        .iter()
        .map(|piece| {
            let text = match piece {
                RunPiece::Text(text) => text.clone(),
                RunPiece::Glyph(glyph) => glyph.as_char().to_string(),
            };
            let mut mi = MathNode::with_children(MathNodeType::Mi, vec![TextNode { text }.into()]);
            mi.set_attribute("mathvariant", group.run.style.as_ref());
            mi.into()
        })
        .collect();

    Ok(build_mathml::make_row(pieces))
}

/// Literals in a unit field are set upright like the units around them.
fn build_units(
    units: &ParseNodeSiUnits,
    options: &Options,
    ctx: &KatexContext,
) -> Result<MathDomNode, ParseError> {
    let upright = options.with_font("mathrm".to_owned());
    build_mathml::build_expression_row(ctx, &units.expression.body, &upright)
}

fn units_mathml_builder(
    node: &ParseNode,
    options: &Options,
    ctx: &KatexContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::SiUnits(units) = node else {
        return Err(ParseError::new("Expected SiUnits node"));
    };
    build_units(units, options, ctx)
}

/// The number, one quantity space, then the units.
fn quantity_mathml_builder(
    node: &ParseNode,
    options: &Options,
    ctx: &KatexContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::SiQuantity(quantity) = node else {
        return Err(ParseError::new("Expected SiQuantity node"));
    };

    let mut children = build_mathml::build_expression(ctx, &quantity.number, options)?;
    children.push(SpaceNode::new(calculate_size(&quantity.space)?).into());
    children.push(build_units(&quantity.units, options, ctx)?);

    Ok(MathNode::with_children(MathNodeType::Mrow, children).into())
}
