//! Horizontal spacing commands: `\kern`, `\mkern` and `\hskip`

use crate::define_function::{FunctionDefSpec, FunctionPropSpec};
use crate::mathml_tree::{MathDomNode, SpaceNode};
use crate::options::Options;
use crate::parser::parse_node::{NodeType, ParseNode, ParseNodeKern};
use crate::types::{ArgType, ErrorLocationProvider, ParseError};
use crate::KatexContext;
use crate::units::calculate_size;

fn mathml_builder(
    node: &ParseNode,
    _options: &Options,
    _ctx: &KatexContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::Kern(kern) = node else {
        return Err(ParseError::new("Expected Kern node"));
    };
    Ok(SpaceNode::new(calculate_size(&kern.dimension)?).into())
}

pub fn define_kern(ctx: &mut KatexContext) {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Kern),
        names: &["\\kern", "\\mkern", "\\hskip"],
        props: FunctionPropSpec {
            num_args: 1,
            arg_types: Some(vec![ArgType::Size]),
            allowed_in_argument: true,
            allowed_in_text: true,
            primitive: true,
            ..Default::default()
        },
        handler: Some(|context, args, _opt_args| {
            let Some(ParseNode::Size(size)) = args.into_iter().next() else {
                return Err(ParseError::new("Expected size argument"));
            };

            // `\mkern` takes math units and the others take anything else.
            let is_mu = size.value.unit == "mu";
            let math_kern = context.func_name == "\\mkern";
            if is_mu != math_kern {
                let message = if math_kern {
                    format!(
                        "LaTeX's {} supports only mu units, not {} units",
                        context.func_name, size.value.unit
                    )
                } else {
                    format!("LaTeX's {} doesn't support mu units", context.func_name)
                };
                context.parser.settings.report_nonstrict(
                    "mathVsTextUnits",
                    &message,
                    context.token.map(|t| t as &dyn ErrorLocationProvider),
                )?;
            }

            Ok(ParseNode::Kern(ParseNodeKern {
                mode: context.parser.mode,
                loc: context.loc(),
                dimension: size.value,
            }))
        }),
        mathml_builder: Some(mathml_builder),
    });
}
