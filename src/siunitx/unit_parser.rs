//! The unit field state machine
//!
//! [`UnitParser`] reads the argument of `\si` (or the second argument of
//! `\SI`) token by token. Prefix commands become pending, unit commands
//! consume the pending prefix and produce a [`RenderRun`], and everything
//! else is handed to the host parser as literal markup. `\per` raises the
//! next unit to the power of minus one.

use alloc::rc::Rc;

use tracing::{debug, trace};

use crate::parser::Parser;
use crate::parser::parse_node::{
    ParseNode, ParseNodeAtom, ParseNodeOrdGroup, ParseNodeSupSub, ParseNodeText,
    ParseNodeTextOrd, ParseNodeUnitRun,
};
use crate::siunitx::output::{RenderRun, build_run};
use crate::siunitx::prefixes::Prefix;
use crate::siunitx::resolver::{Command, UnitResolver};
use crate::siunitx::tables::UnitTables;
use crate::symbols::Atom;
use crate::types::{Mode, ParseError, ParseErrorKind, SourceRangeRef as _, Token};

/// The result of parsing one unit field.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitExpression {
    /// Nodes in source order: unit runs (possibly with scripts) and
    /// literal markup.
    pub body: Vec<ParseNode>,
    /// Every parsed unit, in source order.
    pub runs: Vec<RenderRun>,
    /// Whether anything other than a unit, a prefix or a script on a unit
    /// appeared in the field.
    pub had_literal: bool,
}

/// Parses one unit field on top of a host [`Parser`].
///
/// The gullet's resolver is replaced by a [`UnitResolver`] for the duration
/// of [`UnitParser::parse`], so abbreviations and aliases expand only here.
pub struct UnitParser<'p, 'a> {
    parser: &'p mut Parser<'a>,
    tables: &'a UnitTables,
    /// At most one prefix waits for its unit.
    pending: Option<(&'static Prefix, Token)>,
    /// The `\per` waiting for its unit.
    per: Option<Token>,
    runs: Vec<RenderRun>,
    had_literal: bool,
}

impl<'p, 'a> UnitParser<'p, 'a> {
    /// A parser positioned at the start of a field, after its `{`.
    pub fn new(parser: &'p mut Parser<'a>, tables: &'a UnitTables) -> Self {
        Self {
            parser,
            tables,
            pending: None,
            per: None,
            runs: Vec::new(),
            had_literal: false,
        }
    }

    /// Parses up to the end of the field.
    ///
    /// The previous resolver is restored before any error is returned.
    pub fn parse(mut self) -> Result<UnitExpression, ParseError> {
        let host = self.parser.gullet.resolver();
        let units = UnitResolver::new(self.tables, Rc::clone(&host));
        self.parser.gullet.replace_resolver(Rc::new(units));

        let result = self.parse_body().and_then(|body| {
            if let Some((prefix, token)) = self.pending.take() {
                return Err(ParseError::with_token(
                    ParseErrorKind::DanglingSiPrefix {
                        prefix: prefix.command(),
                    },
                    &token,
                ));
            }
            if let Some(token) = self.per.take() {
                return Err(ParseError::with_token(ParseErrorKind::DanglingSiPer, &token));
            }
            Ok(body)
        });

        self.parser.gullet.replace_resolver(host);
        let body = result?;

        debug!(
            runs = self.runs.len(),
            had_literal = self.had_literal,
            "unit field complete"
        );
        Ok(UnitExpression {
            body,
            runs: self.runs,
            had_literal: self.had_literal,
        })
    }

    fn parse_body(&mut self) -> Result<Vec<ParseNode>, ParseError> {
        let mut body = Vec::new();

        loop {
            self.parser.consume_spaces()?;
            let token = self.parser.fetch()?.clone();
            if token.is_eof() || token.text == "}" {
                break;
            }

            let resolver = self.parser.gullet.resolver();
            match resolver.resolve(&token.text) {
                Some(Command::Prefix(prefix)) => {
                    if let Some((first, _)) = &self.pending {
                        return Err(ParseError::with_token(
                            ParseErrorKind::DoubleSiPrefix {
                                first: first.command(),
                                second: prefix.command(),
                            },
                            &token,
                        ));
                    }
                    trace!(prefix = prefix.name, "prefix pending");
                    self.parser.consume();
                    self.pending = Some((prefix, token));
                }
                Some(Command::Per) => {
                    if self.per.is_some() {
                        return Err(ParseError::with_token(ParseErrorKind::DoubleSiPer, &token));
                    }
                    trace!("per pending");
                    self.parser.consume();
                    self.per = Some(token);
                }
                Some(Command::Unit(unit)) => {
                    self.parser.consume();
                    let (prefix, start) = match self.pending.take() {
                        Some((prefix, start)) => (Some(prefix), start),
                        None => (None, token.clone()),
                    };
                    let run = build_run(prefix, unit);
                    trace!(unit = unit.name, text = %run.text(), "unit run");
                    let node = ParseNode::UnitRun(ParseNodeUnitRun {
                        mode: Mode::Math,
                        loc: start.loc.as_ref().range_ref(token.loc.as_ref()),
                        run: run.clone(),
                    });
                    self.runs.push(run);
                    let scripted = self.parser.parse_scripts(Some(node))?;
                    match (scripted, self.per.take()) {
                        (Some(node), Some(_)) => body.push(reciprocal(node)),
                        (Some(node), None) => body.push(node),
                        (None, _) => {}
                    }
                }
                _ if token.text == "{" => {
                    self.had_literal = true;
                    self.parser.consume();
                    self.parser.gullet.begin_group();
                    let inner = self.parse_body()?;
                    let last = self.parser.fetch()?.clone();
                    self.parser.expect("}", true)?;
                    self.parser.gullet.end_group()?;
                    let group = ParseNode::OrdGroup(ParseNodeOrdGroup {
                        mode: Mode::Math,
                        loc: token.loc.as_ref().range_ref(last.loc.as_ref()),
                        body: inner,
                        semisimple: None,
                    });
                    if let Some(node) = self.parser.parse_scripts(Some(group))? {
                        body.push(node);
                    }
                }
                None if self.is_unknown_command(&token) => {
                    self.had_literal = true;
                    self.parser.consume();
                    trace!(command = %token.text, "unknown command kept as literal");
                    body.push(literal_command(token));
                }
                _ => {
                    self.had_literal = true;
                    match self.parser.parse_atom(None)? {
                        Some(ParseNode::Internal(_)) => {}
                        Some(node) => body.push(node),
                        None => {
                            return Err(ParseError::with_token(
                                ParseErrorKind::UnexpectedCharacter {
                                    character: token.text.clone(),
                                },
                                &token,
                            ));
                        }
                    }
                }
            }
        }

        Ok(body)
    }

    fn is_unknown_command(&self, token: &Token) -> bool {
        token.text.starts_with('\\')
            && !self.parser.ctx.symbols.contains(Mode::Math, &token.text)
    }
}

/// Negates the superscript of a (possibly scripted) unit run, adding `^{-1}`
/// when it has none. `\per\second\squared` becomes `\second^{-2}`.
fn reciprocal(node: ParseNode) -> ParseNode {
    match node {
        ParseNode::SupSub(mut supsub) => {
            supsub.sup = Some(Box::new(match supsub.sup.take() {
                Some(sup) => negated(*sup),
                None => negated_group(vec![one()]),
            }));
            ParseNode::SupSub(supsub)
        }
        base => ParseNode::SupSub(ParseNodeSupSub {
            mode: Mode::Math,
            loc: base.loc().cloned(),
            base: Some(Box::new(base)),
            sup: Some(Box::new(negated_group(vec![one()]))),
            sub: None,
        }),
    }
}

fn negated(exponent: ParseNode) -> ParseNode {
    match exponent {
        ParseNode::OrdGroup(mut group) => {
            group.body.insert(0, minus());
            ParseNode::OrdGroup(group)
        }
        other => negated_group(vec![other]),
    }
}

fn negated_group(mut body: Vec<ParseNode>) -> ParseNode {
    body.insert(0, minus());
    ParseNode::OrdGroup(ParseNodeOrdGroup {
        mode: Mode::Math,
        loc: None,
        body,
        semisimple: None,
    })
}

fn minus() -> ParseNode {
    ParseNode::Atom(ParseNodeAtom {
        family: Atom::Bin,
        mode: Mode::Math,
        loc: None,
        text: "-".to_owned(),
    })
}

fn one() -> ParseNode {
    ParseNode::TextOrd(ParseNodeTextOrd {
        mode: Mode::Math,
        loc: None,
        text: "1".to_owned(),
    })
}

/// The command name as upright text.
fn literal_command(token: Token) -> ParseNode {
    let body = token
        .text
        .chars()
        .map(|ch| {
            ParseNode::TextOrd(ParseNodeTextOrd {
                mode: Mode::Text,
                loc: None,
                text: ch.to_string(),
            })
        })
        .collect();
    ParseNode::Text(ParseNodeText {
        mode: Mode::Math,
        loc: token.loc,
        body,
        font: None,
    })
}
