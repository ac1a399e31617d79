use alloc::rc::Rc;
use core::iter;

use phf::phf_set;
use tracing::debug;

use crate::define_function::{FunctionContext, FunctionSpec};
use crate::macro_expander::{IMPLICIT_COMMANDS, MacroExpander};
use crate::siunitx::{Command, UnitParser};
use crate::symbols::{Group, NonAtom};
use crate::types::{
    ArgType, BreakToken, ErrorLocationProvider, Mode, ParseErrorKind, SourceRangeRef as _, Token,
};
use crate::units::{MeasurementOwned, valid_unit};
use crate::{KatexContext, ParseError, Settings};

pub mod parse_node;
use parse_node::{
    AnyParseNode, ParseNode, ParseNodeColor, ParseNodeColorToken, ParseNodeOrdGroup,
    ParseNodeSiUnits, ParseNodeSize, ParseNodeSupSub, ParseNodeText, ParseNodeTextOrd,
};
pub use parse_node::ParseNodeError;

/// Recursive descent parser turning TeX source into a list of
/// [`ParseNode`]s.
///
/// The parser keeps one token of lookahead in `next_token` and pulls tokens
/// from the [`MacroExpander`], which performs all macro expansion before the
/// parser sees a token. Which control sequences are functions, macros or
/// unit commands is decided by the resolver the gullet currently holds; the
/// parser swaps that resolver while it reads the argument of `\si` or `\SI`.
///
/// # Errors
///
/// Every parsing method returns a [`ParseError`] that carries the location of
/// the offending token when one is known.
pub struct Parser<'a> {
    /// Current parsing mode ([`Mode::Math`] or [`Mode::Text`])
    pub mode: Mode,
    /// Token stream provider and macro expander
    pub gullet: MacroExpander<'a>,
    pub settings: &'a Settings,
    /// Cached lookahead token
    pub next_token: Option<Token>,
    /// Shared context containing functions, symbols and unit tables
    pub ctx: &'a KatexContext,
}

const END_OF_EXPRESSION: phf::Set<&'static str> = phf_set! {
    "}",
    "\\endgroup",
    "\\right",
    "&",
};

#[inline]
fn parse_size_with_unit(s: &str) -> Option<(f64, String)> {
    let mut chars = s.chars().peekable();

    let mut sign = 1.0;
    if let Some(&c) = chars.peek() {
        if c == '+' {
            chars.next();
        } else if c == '-' {
            sign = -1.0;
            chars.next();
        }
    }

    while matches!(chars.peek(), Some(' ')) {
        chars.next();
    }

    let mut number_str = String::new();
    let mut saw_digit_before_dot = false;
    while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
        saw_digit_before_dot = true;
        number_str.push(chars.next()?);
    }
    if matches!(chars.peek(), Some('.')) {
        number_str.push('.');
        chars.next();
        let mut digit_after_dot = false;
        while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
            digit_after_dot = true;
            number_str.push(chars.next()?);
        }
        if !saw_digit_before_dot && !digit_after_dot {
            return None;
        }
    } else if !saw_digit_before_dot {
        return None;
    }

    while matches!(chars.peek(), Some(' ')) {
        chars.next();
    }

    let mut unit = String::new();
    for _ in 0..2 {
        match chars.next() {
            Some(c) if c.is_ascii_lowercase() => unit.push(c),
            _ => return None,
        }
    }
    if chars.any(|c| c != ' ') {
        return None;
    }

    let number_val: f64 = number_str.parse().ok()?;
    Some((sign * number_val, unit))
}

/// Accepts every prefix of a `[+-] digits[.digits] unit` size literal.
fn is_size_prefix(s: &str) -> bool {
    let t = s.trim();
    let rest = t.strip_prefix(['+', '-']).unwrap_or(t).trim_start();
    if rest.is_empty() {
        return true;
    }
    let bytes = rest.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let saw_digit = i > 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    } else if !saw_digit {
        return false;
    }
    let after_num = rest[i..].trim_start();
    let unit_len = after_num
        .bytes()
        .take(2)
        .take_while(u8::is_ascii_lowercase)
        .count();
    after_num[unit_len..].trim().is_empty()
}

impl<'a> Parser<'a> {
    /// Creates a parser over `input`. The parser starts in math mode with the
    /// context itself as the command resolver.
    #[must_use]
    pub fn new(input: &'a str, settings: &'a Settings, ctx: &'a KatexContext) -> Self {
        let gullet = MacroExpander::new(input, settings, Rc::new(ctx));
        Self {
            mode: Mode::Math,
            gullet,
            settings,
            next_token: None,
            ctx,
        }
    }

    /// Checks that the lookahead token is `text`, consuming it when asked.
    pub fn expect(&mut self, text: &str, consume: bool) -> Result<(), ParseError> {
        let token = self.fetch()?;
        if token.text != text {
            return Err(ParseError::with_token(
                ParseErrorKind::ExpectedToken {
                    expected: text.to_owned(),
                    found: token.text.clone(),
                },
                token,
            ));
        }
        if consume {
            self.consume();
        }
        Ok(())
    }

    /// Discards the lookahead token.
    pub fn consume(&mut self) {
        self.next_token = None;
    }

    /// Returns the lookahead token, expanding the next one from the gullet
    /// when the cache is empty. Repeated calls without [`Self::consume`]
    /// return the same token.
    pub fn fetch(&mut self) -> Result<&Token, ParseError> {
        match &mut self.next_token {
            Some(next_token) => Ok(next_token),
            next_token => {
                let token = self.gullet.expand_next_token()?;
                Ok(next_token.get_or_insert(token))
            }
        }
    }

    pub const fn switch_mode(&mut self, new_mode: Mode) {
        self.mode = new_mode;
    }

    /// Parses the whole input.
    ///
    /// Unless `global_group` is set, the expression gets its own macro
    /// group, so `\def` inside it does not leak into `settings.macros`.
    /// Groups are closed even when parsing fails.
    ///
    /// ```rust
    /// use katex_siunitx::parser::Parser;
    /// use katex_siunitx::{KatexContext, Settings};
    /// let settings = Settings::default();
    /// let ctx = KatexContext::default();
    /// let mut parser = Parser::new(r"\SI{3}{\kilo\metre}", &settings, &ctx);
    /// let ast = parser.parse().unwrap();
    /// assert_eq!(ast.len(), 1);
    /// ```
    pub fn parse(&mut self) -> Result<Vec<ParseNode>, ParseError> {
        if !self.settings.global_group {
            self.gullet.begin_group();
        }

        let result = self.parse_expression(None).and_then(|body| {
            self.expect("EOF", true)?;
            if !self.settings.global_group {
                self.gullet.end_group()?;
            }
            Ok(body)
        });

        self.gullet.end_groups();
        result
    }

    /// Parses atoms until the end of the expression, a closing token, or
    /// `break_on_token_text`.
    pub fn parse_expression(
        &mut self,
        break_on_token_text: Option<&BreakToken>,
    ) -> Result<Vec<ParseNode>, ParseError> {
        let mut body: Vec<ParseNode> = Vec::new();

        loop {
            if self.mode == Mode::Math {
                self.consume_spaces()?;
            }

            let lex_text = self.fetch()?.text.clone();
            if END_OF_EXPRESSION.contains(lex_text.as_str()) {
                break;
            }
            if let Some(break_tok) = break_on_token_text
                && lex_text == break_tok.as_ref()
            {
                break;
            }

            match self.parse_atom(break_on_token_text)? {
                // Internal nodes do not appear in the parse tree
                Some(ParseNode::Internal(_)) => {}
                Some(atom) => body.push(atom),
                None => break,
            }
        }

        Ok(body)
    }

    pub fn consume_spaces(&mut self) -> Result<(), ParseError> {
        while self.fetch()?.text == " " {
            self.consume();
        }
        Ok(())
    }

    /// Parses a group and, in math mode, any scripts attached to it.
    pub fn parse_atom(
        &mut self,
        break_on_token_text: Option<&BreakToken>,
    ) -> Result<Option<ParseNode>, ParseError> {
        let base = self.parse_group("atom", break_on_token_text)?;

        // No scripts on internal nodes or in text mode. Scripts after an
        // internal node attach to a blank base next round.
        if matches!(base, Some(ParseNode::Internal(_))) || self.mode == Mode::Text {
            return Ok(base);
        }

        self.parse_scripts(base)
    }

    /// Reads any `^`, `_` and `'` following `base` and wraps them into a
    /// [`ParseNodeSupSub`]. Returns `base` unchanged when no script follows.
    pub fn parse_scripts(
        &mut self,
        base: Option<ParseNode>,
    ) -> Result<Option<ParseNode>, ParseError> {
        let mut superscript = None;
        let mut subscript = None;

        loop {
            self.consume_spaces()?;
            let lex = self.fetch()?.clone();
            match lex.text.as_str() {
                "^" => {
                    if superscript.is_some() {
                        return Err(ParseError::with_token("Double superscript", &lex));
                    }
                    superscript = Some(self.handle_sup_subscript("superscript")?);
                }
                "_" => {
                    if subscript.is_some() {
                        return Err(ParseError::with_token("Double subscript", &lex));
                    }
                    subscript = Some(self.handle_sup_subscript("subscript")?);
                }
                "'" => {
                    if superscript.is_some() {
                        return Err(ParseError::with_token("Double superscript", &lex));
                    }
                    let mut n = 1;
                    self.consume();
                    while self.fetch()?.text == "'" {
                        n += 1;
                        self.consume();
                    }
                    let mut primes = iter::repeat_n(
                        ParseNode::TextOrd(ParseNodeTextOrd {
                            mode: self.mode,
                            loc: None,
                            text: "\\prime".to_owned(),
                        }),
                        n,
                    )
                    .collect::<Vec<_>>();
                    if self.fetch()?.text == "^" {
                        primes.push(self.handle_sup_subscript("superscript")?);
                    }
                    superscript = Some(ParseNode::OrdGroup(ParseNodeOrdGroup {
                        mode: self.mode,
                        loc: None,
                        body: primes,
                        semisimple: None,
                    }));
                }
                _ => break,
            }
        }

        if superscript.is_none() && subscript.is_none() {
            return Ok(base);
        }

        let loc = base.as_ref().and_then(ParseNode::loc).cloned();
        Ok(Some(ParseNode::SupSub(ParseNodeSupSub {
            mode: self.mode,
            loc,
            base: base.map(Box::new),
            sup: superscript.map(Box::new),
            sub: subscript.map(Box::new),
        })))
    }

    fn parse_regex_group<F>(&mut self, mode_name: &str, mut validator: F) -> Result<Token, ParseError>
    where
        F: FnMut(&str) -> bool,
    {
        let first_token = self.fetch()?.clone();
        let mut last_token = first_token.clone();
        let mut str = String::new();

        loop {
            let next_token = self.fetch()?;
            if next_token.is_eof() {
                break;
            }
            let test_str = format!("{str}{}", next_token.text);
            if !validator(&test_str) {
                break;
            }
            last_token = next_token.clone();
            str = test_str;
            self.consume();
        }

        if str.is_empty() {
            return Err(ParseError::with_token(
                ParseErrorKind::InvalidValue {
                    context: mode_name.to_owned(),
                    value: first_token.text.clone(),
                },
                &first_token,
            ));
        }

        first_token
            .range(last_token, str)
            .ok_or_else(|| ParseError::new("Failed to create combined token"))
    }

    /// Reads a braced argument as raw text, without parsing it.
    fn parse_string_group(&mut self, optional: bool) -> Result<Option<Token>, ParseError> {
        let Some(mut arg_token) = self.gullet.scan_argument(optional)? else {
            return Ok(None);
        };
        let mut s = String::new();
        loop {
            let next = self.fetch()?;
            if next.is_eof() {
                break;
            }
            s.push_str(&next.text);
            self.consume();
        }
        // consume EOF
        self.consume();
        arg_token.text = s;
        Ok(Some(arg_token))
    }

    fn parse_color_group(&mut self, optional: bool) -> Result<Option<ParseNode>, ParseError> {
        let Some(tok) = self.parse_string_group(optional)? else {
            return Ok(None);
        };
        let mut text = tok.text.clone();
        let is_hex = |s: &str| s.chars().all(|c| c.is_ascii_hexdigit());
        let is_letters = !text.is_empty() && text.chars().all(|c| c.is_ascii_alphabetic());
        let is_hash = text
            .strip_prefix('#')
            .is_some_and(|hex| matches!(hex.len(), 3 | 4 | 6 | 8) && is_hex(hex));
        let is_6hex = text.len() == 6 && is_hex(&text);
        if !(is_letters || is_hash || is_6hex) {
            return Err(ParseError::with_token(
                ParseErrorKind::InvalidValue {
                    context: "color".to_owned(),
                    value: text,
                },
                &tok,
            ));
        }
        if is_6hex {
            text = format!("#{text}");
        }
        Ok(Some(ParseNode::ColorToken(ParseNodeColorToken {
            mode: self.mode,
            loc: tok.loc,
            color: text,
        })))
    }

    /// Parses a dimension, either braced (`{3mu}`) or bare (`3mu`).
    pub fn parse_size_group(&mut self, optional: bool) -> Result<Option<ParseNodeSize>, ParseError> {
        self.gullet.consume_spaces()?;
        let res = if !optional && self.gullet.future_mut()?.text != "{" {
            Some(self.parse_regex_group("size", is_size_prefix)?)
        } else {
            self.parse_string_group(optional)?
        };

        let Some(mut res) = res else { return Ok(None) };
        let is_blank = !optional && res.text.is_empty();
        if is_blank {
            "0pt".clone_into(&mut res.text);
        }

        let Some((number, unit)) = parse_size_with_unit(&res.text) else {
            return Err(ParseError::with_token(
                ParseErrorKind::InvalidSize {
                    size: res.text.clone(),
                },
                &res,
            ));
        };

        let value = MeasurementOwned { number, unit };
        if !valid_unit(&value) {
            return Err(ParseError::with_token(
                ParseErrorKind::InvalidUnit { unit: value.unit },
                &res,
            ));
        }
        Ok(Some(ParseNodeSize {
            mode: self.mode,
            loc: res.loc,
            value,
            is_blank,
        }))
    }

    fn parse_argument_group(
        &mut self,
        optional: bool,
        mode: Option<Mode>,
    ) -> Result<Option<ParseNode>, ParseError> {
        let Some(arg_token) = self.gullet.scan_argument(optional)? else {
            return Ok(None);
        };
        let outer_mode = self.mode;
        if let Some(m) = mode {
            self.switch_mode(m);
        }
        self.gullet.begin_group();
        let expression = self.parse_expression(Some(&BreakToken::Eof))?;
        self.expect("EOF", true)?;
        self.gullet.end_group()?;
        self.switch_mode(outer_mode);

        Ok(Some(ParseNode::OrdGroup(ParseNodeOrdGroup {
            mode: self.mode,
            loc: arg_token.loc,
            body: expression,
            semisimple: None,
        })))
    }

    /// Parses a unit field. The field is always read in math mode, with the
    /// unit vocabulary resolved ahead of the host's commands.
    fn parse_units_group(&mut self, optional: bool) -> Result<Option<ParseNode>, ParseError> {
        let Some(arg_token) = self.gullet.scan_argument(optional)? else {
            return Ok(None);
        };
        let outer_mode = self.mode;
        self.switch_mode(Mode::Math);
        self.gullet.begin_group();

        let ctx = self.ctx;
        let expression = UnitParser::new(self, &ctx.units).parse()?;
        self.expect("EOF", true)?;
        self.gullet.end_group()?;
        self.switch_mode(outer_mode);

        debug!(
            runs = expression.runs.len(),
            had_literal = expression.had_literal,
            "parsed unit field"
        );
        Ok(Some(ParseNode::SiUnits(ParseNodeSiUnits {
            mode: self.mode,
            loc: arg_token.loc,
            expression,
        })))
    }

    fn parse_group_of_type(
        &mut self,
        name: &str,
        arg_type: Option<&ArgType>,
        optional: bool,
    ) -> Result<Option<ParseNode>, ParseError> {
        match arg_type {
            Some(ArgType::Color) => self.parse_color_group(optional),
            Some(ArgType::Size) => Ok(self.parse_size_group(optional)?.map(ParseNode::Size)),
            Some(ArgType::Mode(mode)) => self.parse_argument_group(optional, Some(*mode)),
            Some(ArgType::Units) => self.parse_units_group(optional),
            Some(ArgType::Primitive) => {
                if optional {
                    return Err(ParseError::new("A primitive argument cannot be optional"));
                }
                if let Some(group) = self.parse_group(name, None)? {
                    Ok(Some(group))
                } else {
                    let token = self.fetch()?;
                    Err(ParseError::with_token(
                        ParseErrorKind::ExpectedGroupAs {
                            context: name.to_owned(),
                        },
                        token,
                    ))
                }
            }
            Some(ArgType::Original) | None => self.parse_argument_group(optional, None),
        }
    }

    /// Parses a braced group, a function call or a symbol.
    ///
    /// Undefined control sequences are an error, unless `throw_on_error` is
    /// off, in which case they render as colored text. Unit commands are
    /// reported separately when they show up outside a unit field.
    pub fn parse_group(
        &mut self,
        name: &str,
        break_on_token_text: Option<&BreakToken>,
    ) -> Result<Option<ParseNode>, ParseError> {
        let first_token = self.fetch()?.clone();
        let text = first_token.text.as_str();
        if text == "{" || text == "\\begingroup" {
            self.consume();
            let break_token = if text == "{" {
                BreakToken::RightBrace
            } else {
                BreakToken::EndGroup
            };

            self.gullet.begin_group();
            let expression = self.parse_expression(Some(&break_token))?;
            let last_token = self.fetch()?.clone();
            self.expect(break_token.as_ref(), true)?;
            self.gullet.end_group()?;

            return Ok(Some(ParseNode::OrdGroup(ParseNodeOrdGroup {
                mode: self.mode,
                loc: first_token.loc().range_ref(last_token.loc()),
                body: expression,
                // \begingroup...\endgroup is semi-simple, i.e. transparent
                semisimple: (text == "\\begingroup").then_some(true),
            })));
        }

        let mut result = self.parse_function(break_on_token_text, Some(name))?;
        if result.is_none() {
            result = self.parse_symbol()?;
        }

        if result.is_none() && text.starts_with('\\') && !IMPLICIT_COMMANDS.contains(text) {
            if self.settings.throw_on_error {
                let kind = if self.ctx.units.lookup_command(text).is_some() {
                    ParseErrorKind::UnitCommandOutsideUnitField {
                        name: text.to_owned(),
                    }
                } else {
                    ParseErrorKind::UndefinedControlSequence {
                        name: text.to_owned(),
                    }
                };
                return Err(ParseError::with_token(kind, &first_token));
            }
            result = Some(ParseNode::Color(self.format_unsupported_cmd(text)));
            self.consume();
        }

        Ok(result)
    }

    /// Renders an unknown command as its literal text in the error color.
    #[must_use]
    pub fn format_unsupported_cmd(&self, text: &str) -> ParseNodeColor {
        let body = text
            .chars()
            .map(|ch| {
                AnyParseNode::TextOrd(ParseNodeTextOrd {
                    mode: Mode::Text,
                    loc: None,
                    text: ch.to_string(),
                })
            })
            .collect();
        let text_node = AnyParseNode::Text(ParseNodeText {
            mode: self.mode,
            loc: None,
            body,
            font: None,
        });
        ParseNodeColor {
            mode: self.mode,
            loc: None,
            color: self.settings.error_color.clone(),
            body: vec![text_node],
        }
    }

    /// Parses a function call if the lookahead token resolves to one.
    pub fn parse_function(
        &mut self,
        break_on_token_text: Option<&BreakToken>,
        name: Option<&str>,
    ) -> Result<Option<ParseNode>, ParseError> {
        let token = self.fetch()?.clone();
        let func = token.text.as_str();
        let resolver = self.gullet.resolver();
        let Some(Command::Function(spec)) = resolver.resolve(func) else {
            return Ok(None);
        };
        let func_data = spec.clone();
        self.consume();

        if let Some(name) = name
            && name != "atom"
            && !func_data.allowed_in_argument
        {
            return Err(ParseError::with_token(
                ParseErrorKind::FunctionMissingArguments {
                    func: func.to_owned(),
                    context: name.to_owned(),
                },
                &token,
            ));
        } else if self.mode == Mode::Text && !func_data.allowed_in_text {
            return Err(ParseError::with_token(
                ParseErrorKind::FunctionDisallowedInMode {
                    func: func.to_owned(),
                    mode: Mode::Text,
                },
                &token,
            ));
        } else if self.mode == Mode::Math && !func_data.allowed_in_math {
            return Err(ParseError::with_token(
                ParseErrorKind::FunctionDisallowedInMode {
                    func: func.to_owned(),
                    mode: Mode::Math,
                },
                &token,
            ));
        }

        let (args, opt_args) = self.parse_arguments(func, &func_data)?;
        let node = self.call_function(
            func,
            &func_data,
            args,
            opt_args,
            Some(&token),
            break_on_token_text,
        )?;
        Ok(Some(node))
    }

    fn parse_symbol(&mut self) -> Result<Option<ParseNode>, ParseError> {
        let nucleus = self.fetch()?.clone();
        let text = nucleus.text.clone();
        let mode = self.mode;
        let loc = nucleus.loc.clone();

        let node = if let Some(info) = self.ctx.symbols.get(mode, &text) {
            match info.group {
                Group::Atom(family) => ParseNode::Atom(parse_node::ParseNodeAtom {
                    mode,
                    loc,
                    family,
                    text,
                }),
                Group::NonAtom(NonAtom::MathOrd) => {
                    ParseNode::MathOrd(parse_node::ParseNodeMathOrd { mode, loc, text })
                }
                Group::NonAtom(NonAtom::TextOrd) => {
                    ParseNode::TextOrd(ParseNodeTextOrd { mode, loc, text })
                }
                Group::NonAtom(NonAtom::Spacing) => {
                    ParseNode::Spacing(parse_node::ParseNodeSpacing { mode, loc, text })
                }
            }
        } else if let Some(first_char) = text.chars().next()
            && first_char >= '\u{80}'
        {
            self.settings.report_nonstrict(
                "unknownSymbol",
                &format!(
                    "Unrecognized Unicode character \"{text}\" (0x{:X})",
                    u32::from(first_char)
                ),
                Some(&nucleus as &dyn ErrorLocationProvider),
            )?;
            ParseNode::TextOrd(ParseNodeTextOrd {
                mode: Mode::Text,
                loc,
                text,
            })
        } else {
            // EOF, ^, _, {, }, etc.
            return Ok(None);
        };

        self.consume();
        Ok(Some(node))
    }

    /// Consumes `^` or `_` and parses the script that follows it.
    pub fn handle_sup_subscript(&mut self, name: &str) -> Result<ParseNode, ParseError> {
        let symbol_token = self.fetch()?.clone();
        self.consume();
        self.consume_spaces()?;

        // Skip over internal nodes such as \relax
        let mut group = self.parse_group(name, None)?;
        while let Some(ParseNode::Internal(_)) = group {
            group = self.parse_group(name, None)?;
        }

        group.ok_or_else(|| {
            ParseError::with_token(
                ParseErrorKind::ExpectedGroupAfterSymbol {
                    symbol: symbol_token.text.clone(),
                },
                &symbol_token,
            )
        })
    }

    pub fn call_function(
        &mut self,
        name: &str,
        func: &FunctionSpec,
        args: Vec<ParseNode>,
        opt_args: Vec<Option<ParseNode>>,
        token: Option<&Token>,
        break_on_token_text: Option<&BreakToken>,
    ) -> Result<ParseNode, ParseError> {
        let Some(handler) = func.handler else {
            return Err(ParseError::new(ParseErrorKind::NoFunctionHandler {
                name: name.to_owned(),
            }));
        };
        let context = FunctionContext {
            func_name: name.to_owned(),
            parser: self,
            token,
            break_on_token_text,
        };
        handler(context, args, opt_args)
    }

    /// Parses the arguments of `func`. Optional arguments come first.
    pub fn parse_arguments(
        &mut self,
        func: &str,
        func_data: &FunctionSpec,
    ) -> Result<(Vec<ParseNode>, Vec<Option<ParseNode>>), ParseError> {
        let total_args = func_data.num_args + func_data.num_optional_args;
        if total_args == 0 {
            return Ok((Vec::new(), Vec::new()));
        }

        let mut args = Vec::with_capacity(func_data.num_args);
        let mut opt_args = Vec::with_capacity(func_data.num_optional_args);

        for i in 0..total_args {
            let arg_type = func_data.arg_types.as_ref().and_then(|v| v.get(i));
            let is_optional = i < func_data.num_optional_args;

            let arg_type = if func_data.primitive && arg_type.is_none() {
                Some(ArgType::Primitive)
            } else {
                arg_type.copied()
            };

            let arg = self.parse_group_of_type(
                &format!("argument to '{func}'"),
                arg_type.as_ref(),
                is_optional,
            )?;

            if is_optional {
                opt_args.push(arg);
            } else if let Some(a) = arg {
                args.push(a);
            } else {
                return Err(ParseError::new(ParseErrorKind::FunctionMissingArguments {
                    func: func.to_owned(),
                    context: "argument list".to_owned(),
                }));
            }
        }

        Ok((args, opt_args))
    }
}
