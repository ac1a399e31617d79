//! MacroExpander, the "gullet" that expands macros to tokens
//!
//! Tokens come from the [`Lexer`] and are kept on a stack in reverse order.
//! Whether a control sequence expands is decided by the active
//! [`CommandResolver`] first and by the macro namespace second. The parser
//! swaps the resolver while it reads a unit field so abbreviations and
//! aliases expand there and nowhere else.

use alloc::rc::Rc;
use alloc::sync::Arc;

use tracing::trace;

use crate::lexer::{CATCODE_ACTIVE, Lexer};
use crate::macros::builtins::BUILTIN_MACROS;
use crate::macros::{MacroArg, MacroDefinition, MacroExpansion};
use crate::namespace::{KeyMap, Namespace};
use crate::siunitx::{Command, CommandResolver};
use crate::types::{ParseError, ParseErrorKind, Settings, Token};

/// Map of macro definitions.
pub type MacroMap = KeyMap<String, MacroDefinition>;

/// Commands that act like macros but aren't defined as a macro, function, or
/// symbol
pub const IMPLICIT_COMMANDS: phf::Set<&str> = phf::phf_set! {
    "^",
    "_",
};

/// Expands macros until only non-macro tokens remain.
pub struct MacroExpander<'a> {
    settings: &'a Settings,
    expansion_count: usize,
    lexer: Lexer<'a>,
    macros: Namespace<'a, MacroDefinition>,
    /// Tokens in reverse order.
    stack: Vec<Token>,
    resolver: Rc<dyn CommandResolver + 'a>,
}

impl<'a> MacroExpander<'a> {
    /// Creates a gullet over `input`. Global macros come from
    /// `settings.macros`, which stays mutably borrowed until the gullet is
    /// dropped.
    #[must_use]
    pub fn new(
        input: &str,
        settings: &'a Settings,
        resolver: Rc<dyn CommandResolver + 'a>,
    ) -> Self {
        let globals = settings.macros.borrow_mut();
        Self {
            settings,
            expansion_count: 0,
            lexer: Lexer::new(Arc::from(input), settings),
            macros: Namespace::new(&BUILTIN_MACROS, globals),
            stack: Vec::new(),
            resolver,
        }
    }

    /// The resolver currently consulted for command lookups.
    #[must_use]
    pub fn resolver(&self) -> Rc<dyn CommandResolver + 'a> {
        Rc::clone(&self.resolver)
    }

    /// Installs a new resolver and returns the previous one.
    pub fn replace_resolver(
        &mut self,
        resolver: Rc<dyn CommandResolver + 'a>,
    ) -> Rc<dyn CommandResolver + 'a> {
        core::mem::replace(&mut self.resolver, resolver)
    }

    pub const fn macros_mut(&mut self) -> &mut Namespace<'a, MacroDefinition> {
        &mut self.macros
    }

    pub fn begin_group(&mut self) {
        self.macros.begin_group();
    }

    pub fn end_group(&mut self) -> Result<(), ParseError> {
        self.macros.end_group()
    }

    /// Ends all currently nested groups (if any)
    pub fn end_groups(&mut self) {
        self.macros.end_groups();
    }

    pub fn push_token(&mut self, token: Token) {
        self.stack.push(token);
    }

    /// Pushes tokens that are already in reverse order.
    pub fn push_tokens(&mut self, tokens: Vec<Token>) {
        self.stack.extend(tokens);
    }

    /// Returns the topmost token on the stack, lexing one if needed.
    pub fn future_mut(&mut self) -> Result<&Token, ParseError> {
        if self.stack.is_empty() {
            let tok = self.lexer.lex()?;
            self.push_token(tok);
        }
        self.stack
            .last()
            .ok_or_else(|| ParseError::new("stack is empty"))
    }

    pub fn pop_token(&mut self) -> Result<Token, ParseError> {
        self.future_mut()?;
        self.stack
            .pop()
            .ok_or_else(|| ParseError::new("stack is empty"))
    }

    pub fn consume_spaces(&mut self) -> Result<(), ParseError> {
        while self.future_mut()?.text == " " {
            self.stack.pop();
        }
        Ok(())
    }

    /// Finds a macro argument without expanding tokens and pushes it back
    /// followed by an `EOF` marker. Returns a token spanning the argument, or
    /// `None` for a missing optional argument.
    pub fn scan_argument(&mut self, is_optional: bool) -> Result<Option<Token>, ParseError> {
        let (start, arg) = if is_optional {
            self.consume_spaces()?;
            if self.future_mut()?.text != "[" {
                return Ok(None);
            }
            let start = self.pop_token()?;
            let arg = self.consume_arg(Some(&["]".to_owned()][..]))?;
            (start, arg)
        } else {
            let arg = self.consume_arg(None)?;
            (arg.start.clone(), arg)
        };

        let end = arg.end;
        self.push_token(Token::eof(end.loc.clone()));
        self.push_tokens(arg.tokens);

        let range = start.clone().range(end, String::new());
        Ok(Some(
            range.unwrap_or_else(|| Token::new(String::new(), start.loc)),
        ))
    }

    /// Consumes one argument: a single token, a braced group, or with
    /// `delims`, everything up to the delimiter sequence.
    pub fn consume_arg(&mut self, delims: Option<&[String]>) -> Result<MacroArg, ParseError> {
        let delims = delims.filter(|d| !d.is_empty());
        if delims.is_none() {
            self.consume_spaces()?;
        }
        let start = self.future_mut()?.clone();
        let mut tokens: Vec<Token> = Vec::new();
        let mut depth: usize = 0;
        let mut match_idx: usize = 0;
        let end = loop {
            let tok = self.pop_token()?;
            tokens.push(tok.clone());
            if tok.text == "{" {
                depth += 1;
            } else if tok.text == "}" {
                if depth == 0 {
                    return Err(ParseError::with_token("Extra }", &tok));
                }
                depth -= 1;
            } else if tok.is_eof() {
                let expected = delims
                    .and_then(|d| d.get(match_idx))
                    .map_or("}", String::as_str);
                return Err(ParseError::with_token(
                    ParseErrorKind::UnexpectedEndOfMacroArgument {
                        expected: expected.to_owned(),
                    },
                    &tok,
                ));
            }
            match delims {
                Some(d) => {
                    if (depth == 0 || (depth == 1 && d[match_idx] == "{"))
                        && tok.text == d[match_idx]
                    {
                        match_idx += 1;
                        if match_idx == d.len() {
                            tokens.truncate(tokens.len() - match_idx);
                            break tok;
                        }
                    } else {
                        match_idx = 0;
                    }
                }
                None => {
                    if depth == 0 && (start.text != "{" || tok.text == "}") {
                        break tok;
                    }
                }
            }
        };

        // Remove the outermost braces
        if start.text == "{" && tokens.last().is_some_and(|t| t.text == "}") {
            tokens.pop();
            if !tokens.is_empty() {
                tokens.remove(0);
            }
        }
        tokens.reverse();
        Ok(MacroArg { tokens, start, end })
    }

    /// Consumes `num_args` arguments, matching `delimiters` around them.
    pub fn consume_args_with_delims(
        &mut self,
        num_args: usize,
        delimiters: Option<&Vec<Vec<String>>>,
    ) -> Result<Vec<Vec<Token>>, ParseError> {
        if let Some(d) = delimiters {
            if d.len() != num_args + 1 {
                return Err(ParseError::new(
                    "The length of delimiters doesn't match the number of args!",
                ));
            }
            for expected in &d[0] {
                let tok = self.pop_token()?;
                if *expected != tok.text {
                    return Err(ParseError::with_token(
                        "Use of the macro doesn't match its definition",
                        &tok,
                    ));
                }
            }
        }

        let mut args: Vec<Vec<Token>> = Vec::with_capacity(num_args);
        for i in 0..num_args {
            let delims_for_arg = delimiters.and_then(|v| v.get(i + 1)).map(Vec::as_slice);
            args.push(self.consume_arg(delims_for_arg)?.tokens);
        }
        Ok(args)
    }

    fn count_expansion(&mut self, amount: usize) -> Result<(), ParseError> {
        self.expansion_count += amount;
        if self.expansion_count > self.settings.max_expand {
            return Err(ParseError::new(ParseErrorKind::TooManyExpansions));
        }
        Ok(())
    }

    /// Expands the next token once if it is a macro. Returns whether an
    /// expansion happened; an unexpandable token is left on the stack.
    pub fn expand_once(&mut self) -> Result<bool, ParseError> {
        let top_token = self.pop_token()?;
        let Some(expansion) = self.get_expansion(&top_token.text) else {
            self.push_token(top_token);
            return Ok(false);
        };

        self.count_expansion(1)?;
        trace!(name = %top_token.text, "expand");
        let mut tokens = expansion.tokens;
        let args =
            self.consume_args_with_delims(expansion.num_args, expansion.delimiters.as_ref())?;
        if expansion.num_args > 0 {
            substitute_args(&mut tokens, &args)?;
        }
        self.push_tokens(tokens);
        Ok(true)
    }

    /// Expands until the top token is not a macro, then pops it.
    pub fn expand_next_token(&mut self) -> Result<Token, ParseError> {
        while self.expand_once()? {}
        self.pop_token()
    }

    fn get_expansion(&self, name: &str) -> Option<MacroExpansion> {
        // A single character only expands when it is active
        let mut chars = name.chars();
        if let (Some(ch), None) = (chars.next(), chars.next())
            && self
                .lexer
                .get_catcode(ch)
                .is_some_and(|code| code != CATCODE_ACTIVE)
        {
            return None;
        }

        match self.resolver.resolve(name) {
            Some(Command::Macro(body)) => return Some(self.string_to_expansion(body)),
            Some(Command::Prefix(_) | Command::Unit(_) | Command::Per) => return None,
            Some(Command::Function(_)) | None => {}
        }

        match self.macros.get(name)? {
            MacroDefinition::StaticStr(s) => Some(self.string_to_expansion(s)),
            MacroDefinition::String(s) => Some(self.string_to_expansion(s)),
            MacroDefinition::Expansion(e) => Some(e.clone()),
        }
    }

    fn string_to_expansion(&self, expansion: &str) -> MacroExpansion {
        let mut num_args = 0usize;
        if expansion.contains('#') {
            let stripped = expansion.replace("##", "");
            while stripped.contains(&format!("#{}", num_args + 1)) {
                num_args += 1;
            }
        }

        let mut body_lexer = Lexer::new(Arc::from(expansion), self.settings);
        let mut tokens: Vec<Token> = Vec::new();
        while let Ok(tok) = body_lexer.lex() {
            if tok.is_eof() {
                break;
            }
            tokens.push(tok);
        }
        tokens.reverse();
        MacroExpansion {
            tokens,
            num_args,
            delimiters: None,
        }
    }
}

/// Replaces `#n` placeholders in a reversed macro body with the arguments.
fn substitute_args(tokens: &mut Vec<Token>, args: &[Vec<Token>]) -> Result<(), ParseError> {
    // Reversed order: a placeholder `#1` appears as `1` followed by `#`.
    let mut i = tokens.len();
    while i > 0 {
        i -= 1;
        if tokens[i].text != "#" {
            continue;
        }
        if i == 0 {
            return Err(ParseError::with_token(
                "Incomplete placeholder at end of macro body",
                &tokens[i],
            ));
        }
        let next = &tokens[i - 1];
        if next.text == "#" {
            // ## -> #
            tokens.remove(i);
            i -= 1;
            continue;
        }
        let Some(arg) = next
            .text
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=9).contains(n))
            .and_then(|n| args.get(n - 1))
        else {
            return Err(ParseError::with_token(
                ParseErrorKind::InvalidMacroArgumentNumber {
                    value: next.text.clone(),
                },
                next,
            ));
        };
        tokens.splice(i - 1..=i, arg.iter().cloned());
        i -= 1;
    }
    Ok(())
}
