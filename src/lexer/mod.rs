//! The lexer turns the input string into tokens on demand.
//!
//! Tokens are single characters (with any trailing combining marks), control
//! words such as `\kilo` (trailing whitespace is swallowed), control symbols
//! such as `\,`, and runs of whitespace, which collapse to a single `" "`
//! token. Characters with catcode 14 start a comment that runs to the end of
//! the line.

use crate::namespace::KeyMap;
use crate::types::{ParseError, ParseErrorKind, Settings, SourceLocation, Token};
use alloc::sync::Arc;

/// Catcode of the comment character `%`.
pub const CATCODE_COMMENT: u8 = 14;
/// Catcode of active characters such as `~`, which expand like macros.
pub const CATCODE_ACTIVE: u8 = 13;

const fn is_combining_mark(ch: char) -> bool {
    (ch as u32) >= 0x0300 && (ch as u32) <= 0x036F
}

fn match_space(s: &str) -> Option<usize> {
    let len: usize = s
        .chars()
        .take_while(|c| matches!(c, ' ' | '\r' | '\n' | '\t'))
        .map(char::len_utf8)
        .sum();
    (len > 0).then_some(len)
}

fn match_control_space(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('\\')?;
    let next = rest.chars().next()?;
    if next == '\n' {
        return Some(2);
    }
    if !matches!(next, ' ' | '\r' | '\t') {
        return None;
    }
    let blanks: usize = rest
        .chars()
        .take_while(|c| matches!(c, ' ' | '\r' | '\t'))
        .count();
    let mut len = 1 + blanks;
    if rest[blanks..].starts_with('\n') {
        len += 1;
    }
    Some(len)
}

fn match_normal_char_with_accents(s: &str) -> Option<usize> {
    let mut chars = s.chars();
    let first = chars.next()?;
    let u = first as u32;
    let in_range = |x: u32, a: u32, b: u32| x >= a && x <= b;
    if !(in_range(u, 0x0021, 0x005B)
        || in_range(u, 0x005D, 0x2027)
        || in_range(u, 0x202A, 0xD7FF)
        || in_range(u, 0xF900, 0xFFFF)
        || u > 0xFFFF)
    {
        return None;
    }
    let marks: usize = chars
        .take_while(|&c| is_combining_mark(c))
        .map(char::len_utf8)
        .sum();
    Some(first.len_utf8() + marks)
}

fn match_control_word(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('\\')?;
    let len = rest
        .chars()
        .take_while(|c| c.is_ascii_alphabetic() || *c == '@')
        .count();
    (len > 0).then_some(1 + len)
}

fn match_control_symbol(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('\\')?;
    let c = rest.chars().next()?;
    Some(1 + c.len_utf8())
}

#[derive(PartialEq, Eq)]
enum BranchKind {
    Unknown,
    Space,
    ControlSpace,
    NormalWithAccents,
    ControlWord,
    ControlSymbol,
}

struct TokenMatch {
    branch: BranchKind,
    /// Bytes consumed from the input.
    mlen: usize,
    /// Trailing bytes consumed but not part of the token text.
    skip: usize,
}

fn exec(slice: &str) -> TokenMatch {
    let (branch, mlen, skip) = if let Some(l) = match_space(slice) {
        (BranchKind::Space, l, 0)
    } else if let Some(l) = match_control_space(slice) {
        (BranchKind::ControlSpace, l, 0)
    } else if let Some(l) = match_normal_char_with_accents(slice) {
        (BranchKind::NormalWithAccents, l, 0)
    } else if let Some(l) = match_control_word(slice) {
        let s = match_space(&slice[l..]).unwrap_or(0);
        (BranchKind::ControlWord, l + s, s)
    } else if let Some(l) = match_control_symbol(slice) {
        (BranchKind::ControlSymbol, l, 0)
    } else {
        let len = slice.chars().next().map_or(0, char::len_utf8);
        (BranchKind::Unknown, len, 0)
    };
    TokenMatch { branch, mlen, skip }
}

/// Produces tokens from one input string.
pub struct Lexer<'a> {
    input: Arc<str>,
    last_index: usize,
    settings: &'a Settings,
    catcodes: KeyMap<char, u8>,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(input: Arc<str>, settings: &'a Settings) -> Self {
        let mut catcodes = KeyMap::default();
        catcodes.insert('%', CATCODE_COMMENT);
        catcodes.insert('~', CATCODE_ACTIVE);

        Self {
            input,
            last_index: 0,
            settings,
            catcodes,
        }
    }

    #[must_use]
    pub fn get_catcode(&self, ch: char) -> Option<u8> {
        self.catcodes.get(&ch).copied()
    }

    fn location(&self, start: usize, end: usize) -> Option<SourceLocation> {
        Some(SourceLocation::new(Arc::clone(&self.input), start, end))
    }

    /// Lexes the next token, returning `EOF` once the input is exhausted.
    pub fn lex(&mut self) -> Result<Token, ParseError> {
        loop {
            let start = self.last_index;
            if start >= self.input.len() {
                return Ok(Token::eof(self.location(start, start)));
            }

            let slice = &self.input[start..];
            let matched = exec(slice);
            self.last_index += matched.mlen;
            let end = self.last_index;

            let text = match matched.branch {
                BranchKind::Unknown => {
                    let token = Token::new(slice[..matched.mlen].to_owned(), self.location(start, end));
                    return Err(ParseError::with_token(
                        ParseErrorKind::UnexpectedCharacter {
                            character: token.text.clone(),
                        },
                        &token,
                    ));
                }
                BranchKind::ControlWord => slice[..matched.mlen - matched.skip].to_owned(),
                BranchKind::ControlSymbol | BranchKind::NormalWithAccents => {
                    slice[..matched.mlen].to_owned()
                }
                BranchKind::ControlSpace => r"\ ".to_owned(),
                BranchKind::Space => " ".to_owned(),
            };

            let mut chars = text.chars();
            if let (Some(first), None) = (chars.next(), chars.next())
                && self.catcodes.get(&first) == Some(&CATCODE_COMMENT)
            {
                if let Some(rel_pos) = slice.find('\n') {
                    self.last_index = start + rel_pos;
                } else {
                    self.last_index = self.input.len();
                    self.settings.report_nonstrict(
                        "commentAtEnd",
                        "% comment has no terminating newline; LaTeX would fail because of commenting the end of math mode (e.g. $)",
                        None,
                    )?;
                }
                continue;
            }

            return Ok(Token::new(text, self.location(start, end)));
        }
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.last_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(input: &str) -> Vec<String> {
        let settings = Settings::default();
        let mut lexer = Lexer::new(Arc::from(input), &settings);
        let mut out = Vec::new();
        loop {
            let tok = lexer.lex().unwrap();
            if tok.is_eof() {
                break;
            }
            out.push(tok.text);
        }
        out
    }

    #[test]
    fn test_control_words_swallow_trailing_space() {
        assert_eq!(lex_all(r"\kilo \metre"), [r"\kilo", r"\metre"]);
        assert_eq!(lex_all(r"\si{\km}"), [r"\si", "{", r"\km", "}"]);
    }

    #[test]
    fn test_spaces_and_control_symbols() {
        assert_eq!(lex_all("5 \\, kg"), ["5", " ", r"\,", " ", "k", "g"]);
        assert_eq!(lex_all("a\\ b"), ["a", r"\ ", "b"]);
    }

    #[test]
    fn test_comment_skips_to_newline() {
        assert_eq!(lex_all("\\metre % per second\n^2"), [r"\metre", " ", "^", "2"]);
        assert_eq!(lex_all("x%"), ["x"]);
    }

    #[test]
    fn test_combining_marks_stay_with_base() {
        assert_eq!(lex_all("a\u{0301}b"), ["a\u{0301}", "b"]);
    }

    #[test]
    fn test_token_locations() {
        let settings = Settings::default();
        let mut lexer = Lexer::new(Arc::from(r"\kilo  \metre"), &settings);
        let kilo = lexer.lex().unwrap();
        let metre = lexer.lex().unwrap();
        let kilo_loc = kilo.loc.unwrap();
        let metre_loc = metre.loc.unwrap();
        assert_eq!((kilo_loc.start, kilo_loc.end), (0, 7));
        assert_eq!((metre_loc.start, metre_loc.end), (7, 13));
        assert!(lexer.lex().unwrap().is_eof());
        assert_eq!(lexer.position(), 13);
    }
}
