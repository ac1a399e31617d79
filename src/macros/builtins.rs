//! Macros available in every expression

use phf::phf_map;

use crate::macros::MacroDefinition;

/// Built-in macros. User macros from the settings take precedence.
pub static BUILTIN_MACROS: phf::Map<&'static str, MacroDefinition> = phf_map! {
    "\\bgroup" => MacroDefinition::StaticStr("{"),
    "\\egroup" => MacroDefinition::StaticStr("}"),
    "~" => MacroDefinition::StaticStr("\\nobreakspace"),
    "\\lq" => MacroDefinition::StaticStr("`"),
    "\\rq" => MacroDefinition::StaticStr("'"),
    "\\mbox" => MacroDefinition::StaticStr("\\text"),

    // Math spacing in mu, as amsmath defines it
    "\\," => MacroDefinition::StaticStr("\\mkern{3mu}"),
    "\\thinspace" => MacroDefinition::StaticStr("\\,"),
    "\\:" => MacroDefinition::StaticStr("\\mkern{4mu}"),
    "\\>" => MacroDefinition::StaticStr("\\:"),
    "\\medspace" => MacroDefinition::StaticStr("\\:"),
    "\\;" => MacroDefinition::StaticStr("\\mkern{5mu}"),
    "\\thickspace" => MacroDefinition::StaticStr("\\;"),
    "\\!" => MacroDefinition::StaticStr("\\mkern{-3mu}"),
    "\\negthinspace" => MacroDefinition::StaticStr("\\!"),
    "\\enspace" => MacroDefinition::StaticStr("\\kern{0.5em}"),
    "\\quad" => MacroDefinition::StaticStr("\\kern{1em}"),
    "\\qquad" => MacroDefinition::StaticStr("\\kern{2em}"),
};
