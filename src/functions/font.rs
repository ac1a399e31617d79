//! Math font commands such as `\mathrm` and `\mathbf`

use phf::phf_map;

use crate::define_function::{FunctionDefSpec, FunctionPropSpec, normalize_argument};
use crate::mathml_tree::MathDomNode;
use crate::options::Options;
use crate::parser::parse_node::{NodeType, ParseNode, ParseNodeFont};
use crate::types::ParseError;
use crate::{KatexContext, build_mathml};

fn mathml_builder(
    node: &ParseNode,
    options: &Options,
    ctx: &KatexContext,
) -> Result<MathDomNode, ParseError> {
    let ParseNode::Font(font_node) = node else {
        return Err(ParseError::new("Expected Font node"));
    };

    let new_options = options.with_font(font_node.font.clone());
    build_mathml::build_group(ctx, &font_node.body, &new_options)
}

const FONT_ALIASES_MAP: phf::Map<&str, &str> = phf_map!(
    "\\bold" => "\\mathbf",
);

const FONT_NAMES: &[&str] = &[
    "\\mathrm",
    "\\mathit",
    "\\mathbf",
    "\\mathnormal",
    "\\mathsf",
    "\\mathtt",
    "\\bold",
];

pub fn define_font(ctx: &mut KatexContext) {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Font),
        names: FONT_NAMES,
        props: FunctionPropSpec {
            num_args: 1,
            allowed_in_argument: true,
            ..Default::default()
        },
        handler: Some(|context, args, _opt_args| {
            let body = args
                .first()
                .map(normalize_argument)
                .ok_or_else(|| ParseError::new("Expected font argument"))?;
            let func = FONT_ALIASES_MAP
                .get(context.func_name.as_str())
                .copied()
                .unwrap_or(context.func_name.as_str());
            let font = func.trim_start_matches('\\').to_owned();

            Ok(ParseNode::Font(ParseNodeFont {
                mode: context.parser.mode,
                loc: context.loc(),
                font,
                body: Box::new(body.clone()),
            }))
        }),
        mathml_builder: Some(mathml_builder),
    });
}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;
    use crate::parser::parse_node::ParseNode;
    use crate::{KatexContext, Settings};

    #[test]
    fn test_alias_resolves_font() {
        let settings = Settings::default();
        let ctx = KatexContext::default();
        let tree = Parser::new(r"\bold{x}", &settings, &ctx).parse().unwrap();
        let ParseNode::Font(font) = &tree[0] else {
            panic!("expected font node");
        };
        assert_eq!(font.font, "mathbf");
        assert!(matches!(*font.body, ParseNode::MathOrd(_)));
    }
}
