//! The SI prefix table

use phf::phf_map;

use crate::siunitx::symbol::{Glyph, SymbolAtom};

/// A decimal scale modifier such as `kilo`.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Prefix {
    /// Command name without the backslash.
    pub name: &'static str,
    /// Power of ten the prefix multiplies by.
    pub exponent: i8,
    /// Letter used in abbreviations such as `km`. Not every prefix has one.
    pub abbreviation: Option<&'static str>,
    /// What the prefix renders as. Only `micro` needs a glyph.
    pub symbol: &'static [SymbolAtom],
}

impl Prefix {
    /// The multiplier `10^exponent`.
    #[must_use]
    pub fn factor(&self) -> f64 {
        10_f64.powi(i32::from(self.exponent))
    }

    /// The command that selects this prefix, e.g. `\kilo`.
    #[must_use]
    pub fn command(&self) -> String {
        format!("\\{}", self.name)
    }
}

macro_rules! prefix {
    ($name:literal, $exponent:literal, $abbreviation:expr, $symbol:literal) => {
        Prefix {
            name: $name,
            exponent: $exponent,
            abbreviation: $abbreviation,
            symbol: &[SymbolAtom::Text($symbol)],
        }
    };
}

/// All SI prefixes, keyed by name.
pub static PREFIXES: phf::Map<&'static str, Prefix> = phf_map! {
    "yocto" => prefix!("yocto", -24, None, "y"),
    "zepto" => prefix!("zepto", -21, None, "z"),
    "atto" => prefix!("atto", -18, Some("a"), "a"),
    "femto" => prefix!("femto", -15, Some("f"), "f"),
    "pico" => prefix!("pico", -12, Some("p"), "p"),
    "nano" => prefix!("nano", -9, Some("n"), "n"),
    "micro" => Prefix {
        name: "micro",
        exponent: -6,
        abbreviation: Some("u"),
        symbol: &[SymbolAtom::Glyph(Glyph::Micro)],
    },
    "milli" => prefix!("milli", -3, Some("m"), "m"),
    "centi" => prefix!("centi", -2, Some("c"), "c"),
    "deci" => prefix!("deci", -1, Some("d"), "d"),
    "deca" => prefix!("deca", 1, None, "da"),
    "hecto" => prefix!("hecto", 2, Some("h"), "h"),
    "kilo" => prefix!("kilo", 3, Some("k"), "k"),
    "mega" => prefix!("mega", 6, Some("M"), "M"),
    "giga" => prefix!("giga", 9, Some("G"), "G"),
    "tera" => prefix!("tera", 12, Some("T"), "T"),
    "peta" => prefix!("peta", 15, None, "P"),
    "exa" => prefix!("exa", 18, None, "E"),
    "zetta" => prefix!("zetta", 21, None, "Z"),
    "yotta" => prefix!("yotta", 24, None, "Y"),
};

/// Looks up a prefix by name (without backslash).
#[must_use]
pub fn lookup_prefix(name: &str) -> Option<&'static Prefix> {
    PREFIXES.get(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_factor() {
        let kilo = lookup_prefix("kilo").unwrap();
        assert_eq!(kilo.exponent, 3);
        assert_eq!(kilo.factor(), 1000.0);
        assert_eq!(kilo.command(), r"\kilo");
        assert!((lookup_prefix("nano").unwrap().factor() - 1e-9).abs() < 1e-24);
        assert!(lookup_prefix("kibi").is_none());
    }

    #[test]
    fn test_exponents_step_through_si_range() {
        let mut exponents: Vec<i8> = PREFIXES.values().map(|p| p.exponent).collect();
        exponents.sort_unstable();
        assert_eq!(exponents.first(), Some(&-24));
        assert_eq!(exponents.last(), Some(&24));
        assert_eq!(exponents.len(), 20);
        for p in PREFIXES.values() {
            assert!(p.exponent.abs() <= 3 || p.exponent % 3 == 0, "{}", p.name);
        }
    }

    #[test]
    fn test_prefixes_without_abbreviation() {
        let mut bare: Vec<&str> = PREFIXES
            .values()
            .filter(|p| p.abbreviation.is_none())
            .map(|p| p.name)
            .collect();
        bare.sort_unstable();
        assert_eq!(
            bare,
            ["deca", "exa", "peta", "yocto", "yotta", "zepto", "zetta"]
        );
    }
}
