//! SI unit vocabulary and the unit field engine behind `\si` and `\SI`
//!
//! The static tables ([`prefixes`], [`unit_table`]) and the derived
//! abbreviation map are bundled into [`UnitTables`], built once and shared
//! by reference. While the parser reads a unit field, a [`UnitResolver`]
//! puts that vocabulary in front of the host's commands and the
//! [`UnitParser`] turns prefix and unit commands into [`RenderRun`]s.

pub mod abbreviations;
pub mod commands;
pub mod output;
pub mod prefixes;
pub mod resolver;
pub mod symbol;
pub mod tables;
pub mod unit_parser;
pub mod unit_table;

pub use abbreviations::{ABBREVIATION_GROUPS, AbbreviationDefect, AbbreviationEntry};
pub use commands::SiCommand;
pub use output::{ParsedUnit, RenderRun, RunPiece, RunStyle, build_run};
pub use prefixes::Prefix;
pub use resolver::{Command, CommandResolver, UnitResolver};
pub use symbol::{Glyph, SymbolAtom};
pub use tables::{UnitCommand, UnitTables};
pub use unit_parser::{UnitExpression, UnitParser};
pub use unit_table::{Unit, UnitCategory};
