//! siunitx-style units for a KaTeX-style TeX to MathML renderer
//!
//! `\si{\kilo\metre\per\second}` and `\SI{5}{\kHz}` are parsed with a unit
//! vocabulary of SI prefixes, units and synthesized abbreviations, then
//! rendered as upright MathML runs next to the rest of the expression.
#![warn(missing_docs)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::str_to_string)]
#![warn(clippy::non_ascii_literal)]
#![warn(clippy::pointer_format)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::absolute_paths)]
#![warn(clippy::panic)]
#![warn(clippy::expect_used)]
#![warn(clippy::unwrap_in_result)]
#![warn(clippy::if_then_some_else_none)]
#![warn(clippy::unused_trait_names)]
#![warn(clippy::get_unwrap)]
#![warn(clippy::impl_trait_in_params)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::unimplemented)]
#![warn(clippy::return_and_then)]
#![warn(clippy::needless_raw_strings)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::rc_buffer)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::map_with_unused_argument_over_ranges)]
#![warn(clippy::missing_asserts_for_indexing)]
#![warn(clippy::separated_literal_suffix)]
#![warn(clippy::ref_patterns)]
// Not sure
#![allow(clippy::indexing_slicing)]
#![allow(clippy::string_slice)]
#![allow(clippy::pub_use)]
// clippy exceptions
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::default_numeric_fallback)]
#![allow(clippy::single_call_fn)]

extern crate alloc;
/// Conversion of parse trees into MathML nodes.
pub mod build_mathml;
pub mod context;
pub mod core;
pub mod define_function;
pub mod functions;
pub mod lexer;
pub mod macro_expander;
pub mod macros;
pub mod mathml_tree;
pub mod namespace;
pub mod options;
/// Core parsing logic for TeX expressions.
pub mod parser;
/// SI prefixes, units and the unit field engine.
pub mod siunitx;
pub mod symbols;
pub mod tree;
/// Errors, settings, tokens and source locations.
pub mod types;
pub mod units;
pub mod utils;

/// The registry of functions, MathML builders, symbols and unit tables.
///
/// Build it once with [`KatexContext::default`] and share it between
/// renders.
///
/// ```rust
/// use katex_siunitx::KatexContext;
///
/// let ctx = KatexContext::default();
/// assert!(ctx.functions.contains_key(r"\si"));
/// assert!(ctx.units.lookup_command(r"\kilo").is_some());
/// ```
pub use crate::context::KatexContext;

/// Parses and renders an expression to MathML markup.
///
/// # Examples
///
/// ```rust
/// use katex_siunitx::{KatexContext, Settings, render_to_string};
///
/// fn main() -> Result<(), katex_siunitx::ParseError> {
///     let ctx = KatexContext::default();
///     let settings = Settings::default();
///
///     let markup = render_to_string(&ctx, r"v = \SI{3}{\metre\per\second}", &settings)?;
///     assert!(markup.starts_with("<math"));
///     Ok(())
/// }
/// ```
///
/// Errors carry the offending position:
/// ```rust
/// use katex_siunitx::{KatexContext, Settings, render_to_string};
///
/// let ctx = KatexContext::default();
/// let settings = Settings::default();
///
/// match render_to_string(&ctx, r"\si{\kilo\milli\metre}", &settings) {
///     Ok(_) => unreachable!(),
///     Err(e) => assert_eq!(e.position, Some(9)),
/// }
/// ```
pub use crate::core::render_to_string;

/// Parse an expression and return the parse tree
///
/// NOTE: The tree representation is unstable and is very likely to change.
pub use crate::core::parse;

pub use crate::types::ParseError;

/// Options controlling parsing and rendering. See [`types::Settings`].
///
/// ```rust
/// use katex_siunitx::Settings;
///
/// let settings = Settings::builder()
///     .display_mode(true)
///     .throw_on_error(false)
///     .build();
/// assert!(settings.display_mode);
/// assert!(!settings.throw_on_error);
/// ```
pub use crate::types::Settings;

pub use crate::types::{StrictMode, StrictSetting};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
