//! The virtual node interface shared by the MathML tree

use core::cell::RefCell;
use core::fmt;

use crate::ParseError;
use crate::types::ParseErrorKind;

/// A node that can serialize itself as markup.
pub trait VirtualNode {
    /// Writes the node's markup into the provided formatter.
    fn write_markup(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), ParseError>;

    /// Convenience helper that renders the node into a [`String`].
    fn to_markup(&self) -> Result<String, ParseError>
    where
        Self: Sized,
    {
        markup_to_string(self)
    }
}

pub use crate::mathml_tree::MathDomNode;

/// Renders the provided [`VirtualNode`] into a [`String`] buffer.
pub fn markup_to_string<T: VirtualNode + ?Sized>(node: &T) -> Result<String, ParseError> {
    struct FormatterWriter<'a> {
        buf: &'a mut String,
    }

    impl fmt::Write for FormatterWriter<'_> {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.buf.push_str(s);
            Ok(())
        }
    }

    struct DisplayAdapter<'a, T: VirtualNode + ?Sized> {
        node: &'a T,
        error: &'a RefCell<Option<ParseError>>,
    }

    impl<T: VirtualNode + ?Sized> fmt::Display for DisplayAdapter<'_, T> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self.node.write_markup(f) {
                Ok(()) => Ok(()),
                Err(err) => {
                    self.error.replace(Some(err));
                    Err(fmt::Error)
                }
            }
        }
    }

    let mut buffer = String::new();
    let error = RefCell::new(None);
    let mut writer = FormatterWriter { buf: &mut buffer };
    let adapter = DisplayAdapter {
        node,
        error: &error,
    };

    if fmt::write(&mut writer, format_args!("{adapter}")).is_err() {
        if let Some(err) = error.into_inner() {
            return Err(err);
        }
        return Err(ParseError::new(ParseErrorKind::Message(
            "failed to write markup",
        )));
    }

    Ok(buffer)
}
