//! Built-in functions and the MathML builders of their node types
//!
//! Each submodule registers a family of commands with
//! [`KatexContext::define_function`](crate::KatexContext::define_function).
//! Node types without a command of their own, like symbols and scripts,
//! register only a builder.

mod color;
mod def;
mod font;
mod kern;
mod ordgroup;
mod relax;
mod siunitx;
mod supsub;
mod symbols_op;
mod symbols_ord;
mod symbols_spacing;
mod text;

/// Registers `\textcolor` and `\color`.
pub use color::define_color;

/// Registers `\def` and `\gdef`.
pub use def::define_def;

/// Registers the math font commands `\mathrm`, `\mathbf` and friends.
pub use font::define_font;

/// Registers `\kern`, `\mkern` and `\hskip`.
pub use kern::define_kern;

pub use ordgroup::define_ordgroup;

/// Registers the `\relax` command in the KaTeX context.
///
/// The `\relax` command produces no output. It ends the scan for an
/// argument or a size without being part of it.
pub use relax::define_relax;

/// Registers `\si` and `\SI` together with the builders for unit fields,
/// quantities and unit runs.
///
/// # LaTeX Syntax
///
/// ```latex
/// \si{\kilo\metre\per\second}   % units alone
/// \SI{5}{\kilo\hertz}           % a number, a thin space, then units
/// \si{\kHz}                     % abbreviations expand inside the field
/// ```
pub use siunitx::define_siunitx;

pub use supsub::define_supsub;

pub use symbols_op::define_symbols_op;

pub use symbols_ord::define_symbols_ord;

pub use symbols_spacing::define_spacing;

/// Registers `\text` and the `\textrm` family.
pub use text::define_text;
