//! The unit vocabulary
//!
//! Units are keyed by their command name without the backslash. Aliases
//! are not units of their own; they are macro bodies that name another
//! command (or a power) and are expanded by the gullet.

use phf::phf_map;
use strum::{AsRefStr, EnumIter, IntoStaticStr};

use crate::siunitx::symbol::{Glyph, SymbolAtom};

/// Where a unit sits in the SI brochure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum UnitCategory {
    /// The seven base units, plus the gram for prefixing.
    SiBase,
    /// Named units derived from the base units, such as the hertz.
    CoherentDerived,
    /// Non-SI units accepted for use with the SI, such as the litre.
    AcceptedNonSi,
    /// Units whose value is obtained experimentally, such as the electronvolt.
    ExperimentalNonSi,
    OtherNonSi,
}

/// A named unit of measure.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Unit {
    /// Command name without the backslash.
    pub name: &'static str,
    pub category: UnitCategory,
    /// What the unit renders as, e.g. `Hz` or a glyph run for `\ohm`.
    pub symbol: &'static [SymbolAtom],
    /// Abbreviation used to build prefixed commands such as `\kHz`.
    pub abbreviation: Option<&'static str>,
}

impl Unit {
    /// The command that selects this unit, e.g. `\hertz`.
    #[must_use]
    pub fn command(&self) -> String {
        format!("\\{}", self.name)
    }
}

macro_rules! unit {
    ($name:literal, $category:ident, $symbol:literal) => {
        unit!($name, $category, $symbol, None)
    };
    ($name:literal, $category:ident, $symbol:literal, $abbreviation:expr) => {
        Unit {
            name: $name,
            category: UnitCategory::$category,
            symbol: &[SymbolAtom::Text($symbol)],
            abbreviation: $abbreviation,
        }
    };
    ($name:literal, $category:ident, [$($atom:expr),+ $(,)?], $abbreviation:expr) => {
        Unit {
            name: $name,
            category: UnitCategory::$category,
            symbol: &[$($atom),+],
            abbreviation: $abbreviation,
        }
    };
}

use SymbolAtom::{Glyph as G, Text as T};

/// All units, keyed by name.
pub static UNITS: phf::Map<&'static str, Unit> = phf_map! {
    // SI base
    "ampere" => unit!("ampere", SiBase, "A", Some("A")),
    "candela" => unit!("candela", SiBase, "cd"),
    "kelvin" => unit!("kelvin", SiBase, "K"),
    "kilogram" => unit!("kilogram", SiBase, "kg"),
    "metre" => unit!("metre", SiBase, "m", Some("m")),
    "mole" => unit!("mole", SiBase, "mol", Some("mol")),
    "second" => unit!("second", SiBase, "s", Some("s")),
    // Not itself a base unit: prefixes attach to the gram, so it is listed
    // beside the kilogram.
    "gram" => unit!("gram", SiBase, "g", Some("g")),

    // Coherent derived
    "becquerel" => unit!("becquerel", CoherentDerived, "Bq"),
    "degreeCelsius" => unit!("degreeCelsius", CoherentDerived, [G(Glyph::Degree), T("C")], None),
    "coulomb" => unit!("coulomb", CoherentDerived, "C"),
    "farad" => unit!("farad", CoherentDerived, "F"),
    "gray" => unit!("gray", CoherentDerived, "Gy"),
    "hertz" => unit!("hertz", CoherentDerived, "Hz", Some("Hz")),
    "henry" => unit!("henry", CoherentDerived, "H"),
    "joule" => unit!("joule", CoherentDerived, "J"),
    "katal" => unit!("katal", CoherentDerived, "kat"),
    "lumen" => unit!("lumen", CoherentDerived, "lm"),
    "lux" => unit!("lux", CoherentDerived, "lx"),
    "newton" => unit!("newton", CoherentDerived, "N", Some("N")),
    "ohm" => unit!("ohm", CoherentDerived, [G(Glyph::Ohm)], Some("ohm")),
    "pascal" => unit!("pascal", CoherentDerived, "Pa", Some("Pa")),
    "radian" => unit!("radian", CoherentDerived, "rad"),
    "siemens" => unit!("siemens", CoherentDerived, "S"),
    "sievert" => unit!("sievert", CoherentDerived, "Sv"),
    "steradian" => unit!("steradian", CoherentDerived, "sr"),
    "tesla" => unit!("tesla", CoherentDerived, "T"),
    "volt" => unit!("volt", CoherentDerived, "V", Some("V")),
    "watt" => unit!("watt", CoherentDerived, "W"),
    "weber" => unit!("weber", CoherentDerived, "Wb"),

    // Accepted for use with the SI
    "day" => unit!("day", AcceptedNonSi, "d"),
    "degree" => unit!("degree", AcceptedNonSi, [G(Glyph::Degree)], None),
    "hectare" => unit!("hectare", AcceptedNonSi, "ha"),
    "hour" => unit!("hour", AcceptedNonSi, "h"),
    "litre" => unit!("litre", AcceptedNonSi, "l", Some("l")),
    "liter" => unit!("liter", AcceptedNonSi, "L", Some("L")),
    "arcminute" => unit!("arcminute", AcceptedNonSi, [G(Glyph::ArcMinute)], None),
    "minute" => unit!("minute", AcceptedNonSi, "min"),
    "arcsecond" => unit!("arcsecond", AcceptedNonSi, [G(Glyph::ArcSecond)], None),
    "tonne" => unit!("tonne", AcceptedNonSi, "t"),

    // Experimentally determined
    "electronvolt" => unit!("electronvolt", ExperimentalNonSi, "eV"),
    "dalton" => unit!("dalton", ExperimentalNonSi, "Da"),
    "atomicmassunit" => unit!("atomicmassunit", ExperimentalNonSi, "u"),
    "astronomicalunit" => unit!("astronomicalunit", ExperimentalNonSi, "ua"),

    // Other
    "angstrom" => unit!("angstrom", OtherNonSi, [G(Glyph::Angstrom)], None),
    "bar" => unit!("bar", OtherNonSi, "bar"),
    "barn" => unit!("barn", OtherNonSi, "b"),
    "bel" => unit!("bel", OtherNonSi, "B"),
    "decibel" => unit!("decibel", OtherNonSi, "dB"),
    "knot" => unit!("knot", OtherNonSi, "kn"),
    "mmHg" => unit!("mmHg", OtherNonSi, "mmHg"),
    "nauticalmile" => unit!("nauticalmile", OtherNonSi, "M"),
    "neper" => unit!("neper", OtherNonSi, "Np"),
};

/// Alternate spellings. The body is TeX source expanded in place of the
/// alias.
pub static UNIT_ALIASES: phf::Map<&'static str, &'static str> = phf_map! {
    "meter" => "\\metre",
    "kg" => "\\kilogram",
    "squared" => "^{2}",
    "cubed" => "^{3}",
};

/// Looks up a unit by name (without backslash).
#[must_use]
pub fn lookup_unit(name: &str) -> Option<&'static Unit> {
    UNITS.get(name)
}

/// Looks up an alias body by name (without backslash).
#[must_use]
pub fn lookup_alias(name: &str) -> Option<&'static str> {
    UNIT_ALIASES.get(name).copied()
}
