//! `\def` and `\gdef`
//!
//! Both read a control sequence, an optional parameter text such as `#1#2`
//! with delimiters between the parameters, and a braced body. The body is
//! stored already lexed so it is never re-tokenized on use.

use crate::context::KatexContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::macros::{MacroDefinition, MacroExpansion};
use crate::parser::parse_node::{NodeType, ParseNode, ParseNodeInternal};
use crate::types::{ParseError, ParseErrorKind, Token};

/// Tokens that can never name a macro.
const INVALID_NAMES: &[&str] = &["\\", "{", "}", "$", "&", "#", "^", "_", "EOF"];

pub fn define_def(ctx: &mut KatexContext) {
    ctx.define_function(FunctionDefSpec {
        node_type: Some(NodeType::Internal),
        names: &["\\def", "\\gdef"],
        props: FunctionPropSpec {
            allowed_in_text: true,
            primitive: true,
            ..Default::default()
        },
        handler: Some(|context: FunctionContext, _args, _opt_args| {
            let gullet = &mut context.parser.gullet;
            let name_tok = gullet.pop_token()?;
            if INVALID_NAMES.contains(&name_tok.text.as_str()) {
                return Err(ParseError::with_token(
                    "Expected a control sequence",
                    &name_tok,
                ));
            }

            let mut num_args = 0usize;
            let mut delimiters: Vec<Vec<String>> = vec![Vec::new()];
            // `#{` ends the parameter text but keeps the brace in the body.
            let mut insert: Option<Token> = None;

            while gullet.future_mut()?.text != "{" {
                let tok = gullet.pop_token()?;
                if tok.is_eof() {
                    return Err(ParseError::with_token("Expected a macro definition", &tok));
                }
                if tok.text != "#" {
                    delimiters[num_args].push(tok.text);
                    continue;
                }

                if gullet.future_mut()?.text == "{" {
                    insert = Some(gullet.future_mut()?.clone());
                    delimiters[num_args].push("{".to_owned());
                    break;
                }
                let arg_tok = gullet.pop_token()?;
                let arg_num = parameter_number(&arg_tok)?;
                if arg_num != num_args + 1 {
                    return Err(ParseError::with_token(
                        ParseErrorKind::ExpectedMacroParameter {
                            expected: num_args + 1,
                            found: arg_num,
                        },
                        &arg_tok,
                    ));
                }
                num_args += 1;
                delimiters.push(Vec::new());
            }

            let mut tokens = gullet.consume_arg(None)?.tokens;
            if let Some(brace) = insert {
                tokens.insert(0, brace);
            }

            let global = context.func_name == "\\gdef";
            gullet.macros_mut().set(
                &name_tok.text,
                Some(MacroDefinition::Expansion(MacroExpansion {
                    tokens,
                    num_args,
                    delimiters: Some(delimiters),
                })),
                global,
            );

            Ok(ParseNode::Internal(ParseNodeInternal {
                mode: context.parser.mode,
                loc: context.loc(),
            }))
        }),
        mathml_builder: None,
    });
}

/// Reads the digit after `#`. Parameters are numbered 1 to 9.
fn parameter_number(tok: &Token) -> Result<usize, ParseError> {
    let mut chars = tok.text.chars();
    match (chars.next(), chars.next()) {
        (Some(c @ '1'..='9'), None) => Ok(c as usize - '0' as usize),
        _ => Err(ParseError::with_token(
            ParseErrorKind::InvalidMacroArgumentNumber {
                value: tok.text.clone(),
            },
            tok,
        )),
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;
    use crate::parser::parse_node::ParseNode;
    use crate::types::ParseErrorKind;
    use crate::{KatexContext, Settings};

    fn parse(input: &str) -> Result<Vec<ParseNode>, crate::ParseError> {
        let settings = Settings::default();
        let ctx = KatexContext::default();
        Parser::new(input, &settings, &ctx).parse()
    }

    #[test]
    fn test_def_with_parameters() {
        let tree = parse(r"\def\pair#1#2{#2#1}\pair ab").unwrap();
        let texts: Vec<_> = tree.iter().filter_map(ParseNode::text).collect();
        assert_eq!(texts, ["b", "a"]);
    }

    #[test]
    fn test_def_with_delimiter() {
        let tree = parse(r"\def\upto#1.{#1}\upto xy.z").unwrap();
        let texts: Vec<_> = tree.iter().filter_map(ParseNode::text).collect();
        assert_eq!(texts, ["x", "y", "z"]);
    }

    #[test]
    fn test_def_is_local_to_group() {
        assert!(parse(r"{\def\x{a}}\x").is_err());
        assert!(parse(r"{\gdef\x{a}}\x").is_ok());
    }

    #[test]
    fn test_def_rejects_bad_parameters() {
        let err = parse(r"\def\x#2{}").unwrap_err();
        assert!(matches!(
            *err.kind,
            ParseErrorKind::ExpectedMacroParameter {
                expected: 1,
                found: 2
            }
        ));
        let err = parse(r"\def\x#a{}").unwrap_err();
        assert!(matches!(
            *err.kind,
            ParseErrorKind::InvalidMacroArgumentNumber { .. }
        ));
    }
}
