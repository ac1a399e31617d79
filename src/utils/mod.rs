//! Small string helpers used by the markup writers

use core::fmt;

/// Escapes markup special characters in a string.
///
/// ```
/// use katex_siunitx::utils::escape;
///
/// assert_eq!(escape("a & b"), "a &amp; b");
/// assert_eq!(escape("a < b"), "a &lt; b");
/// assert_eq!(escape("a \" b"), "a &quot; b");
/// ```
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::new();
    let _ = escape_into(&mut escaped, text);
    escaped
}

/// Writes the escaped form of `text` into `writer` without allocating.
#[inline]
pub fn escape_into<W: fmt::Write>(writer: &mut W, text: &str) -> fmt::Result {
    let mut last = 0;
    for (idx, ch) in text.char_indices() {
        let replacement = match ch {
            '&' => Some("&amp;"),
            '>' => Some("&gt;"),
            '<' => Some("&lt;"),
            '"' => Some("&quot;"),
            '\'' => Some("&#x27;"),
            _ => None,
        };

        if let Some(rep) = replacement {
            if last < idx {
                writer.write_str(&text[last..idx])?;
            }
            writer.write_str(rep)?;
            last = idx + ch.len_utf8();
        }
    }

    if last < text.len() {
        writer.write_str(&text[last..])
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_passes_plain_text_through() {
        assert_eq!(escape("kHz"), "kHz");
        assert_eq!(escape("\u{03a9}"), "\u{03a9}");
        assert_eq!(escape(""), "");
    }

    #[test]
    fn test_escape_all_specials() {
        assert_eq!(escape("<a href='x'>&</a>"), "&lt;a href=&#x27;x&#x27;&gt;&amp;&lt;/a&gt;");
    }
}
