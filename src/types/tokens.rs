use crate::types::{ErrorLocationProvider, SourceLocation};

/// A single lexed token: a character, a control sequence or a space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The raw text of the token. Control sequences keep their backslash
    /// (e.g. `\kilo`), and the end of input is the pseudo-token `EOF`.
    pub text: String,
    /// Where the token came from, used for error reporting.
    pub loc: Option<SourceLocation>,
}

impl Token {
    #[must_use]
    pub const fn new(text: String, loc: Option<SourceLocation>) -> Self {
        Self { text, loc }
    }

    /// Creates the end-of-input marker.
    #[must_use]
    pub fn eof(loc: Option<SourceLocation>) -> Self {
        Self::new("EOF".to_owned(), loc)
    }

    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.text == "EOF"
    }

    /// Computes a new token spanning from this token to `end_token`.
    #[must_use]
    pub fn range(self, end_token: Self, text: String) -> Option<Self> {
        let loc = SourceLocation::range(self.loc, end_token.loc)?;
        Some(Self {
            text,
            loc: Some(loc),
        })
    }
}

impl ErrorLocationProvider for Token {
    fn loc(&self) -> Option<&SourceLocation> {
        self.loc.as_ref()
    }
}

impl ErrorLocationProvider for Option<Token> {
    fn loc(&self) -> Option<&SourceLocation> {
        let t = self.as_ref()?;
        t.loc.as_ref()
    }
}
