//! Abbreviation commands such as `\kHz`
//!
//! Abbreviations are synthesized from the prefix and unit tables. Every
//! unit with an abbreviation registers it bare; every token of the
//! combination groups is then split into a prefix letter and a unit
//! abbreviation. The resulting commands expand to the explicit
//! `\prefix\unit` sequence, so `\kHz` behaves exactly like `\kilo\hertz`.

use thiserror::Error;
use tracing::{trace, warn};

use crate::namespace::KeyMap;
use crate::siunitx::prefixes::{PREFIXES, Prefix};
use crate::siunitx::unit_table::{UNITS, Unit};

/// The combination groups shipped with the crate.
pub const ABBREVIATION_GROUPS: [&str; 11] = [
    "fg pg ng ug mg g",
    "pm nm um mm cm dm m km",
    "as fs ps ns us ms s",
    "fmol pmol nmol umol mmol mol kmol",
    "pA nA uA mA A kA",
    "ul ml l hl uL mL L hL",
    "mHz Hz kHz MHz GHz THz",
    "mN N kN MN",
    "Pa kPa MPa GPa",
    "mohm kohm Mohm",
    "pV nV uV mV V",
];

/// A synthesized abbreviation command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbbreviationEntry {
    /// Command name without the backslash, e.g. `kHz`.
    pub token: String,
    /// `None` for a bare unit abbreviation such as `Hz`.
    pub prefix: Option<&'static Prefix>,
    pub unit: &'static Unit,
    /// The macro body the command expands to, e.g. `\kilo\hertz`.
    pub expansion: String,
}

impl AbbreviationEntry {
    fn new(token: &str, prefix: Option<&'static Prefix>, unit: &'static Unit) -> Self {
        let mut expansion = prefix.map(Prefix::command).unwrap_or_default();
        expansion.push_str(&unit.command());
        Self {
            token: token.to_owned(),
            prefix,
            unit,
            expansion,
        }
    }
}

/// A group token that could not be turned into an abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbbreviationDefect {
    /// No unit abbreviation is a suffix of the token.
    #[error("abbreviation '{token}': no unit is abbreviated '{remainder}'")]
    UnknownUnit { token: String, remainder: String },
    /// What is left in front of the unit is not a prefix letter.
    #[error("abbreviation '{token}': no prefix is abbreviated '{prefix}' (unit '{unit}')")]
    UnknownPrefix {
        token: String,
        prefix: String,
        unit: &'static str,
    },
    /// Two groups define the same token with different meanings.
    #[error("abbreviation '{token}' is already defined differently")]
    Conflict { token: String },
}

/// Output of [`expand_abbreviations`].
#[derive(Debug, Default)]
pub struct Abbreviations {
    /// Accepted entries in registration order.
    pub entries: Vec<AbbreviationEntry>,
    /// Token to position in `entries`.
    pub index: KeyMap<String, usize>,
    /// Rejected tokens.
    pub defects: Vec<AbbreviationDefect>,
}

impl Abbreviations {
    fn insert(&mut self, entry: AbbreviationEntry) -> Result<(), AbbreviationDefect> {
        if let Some(&i) = self.index.get(&entry.token) {
            let existing = &self.entries[i];
            if existing.prefix == entry.prefix && existing.unit == entry.unit {
                return Ok(());
            }
            return Err(AbbreviationDefect::Conflict { token: entry.token });
        }
        if PREFIXES.contains_key(entry.token.as_str())
            || UNITS
                .get(entry.token.as_str())
                .is_some_and(|unit| entry.prefix.is_some() || unit != entry.unit)
        {
            return Err(AbbreviationDefect::Conflict { token: entry.token });
        }
        trace!(token = %entry.token, expansion = %entry.expansion, "abbreviation");
        self.index.insert(entry.token.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    fn reject(&mut self, defect: AbbreviationDefect) {
        warn!(%defect, "skipping malformed abbreviation");
        self.defects.push(defect);
    }
}

fn resolve_token(
    token: &str,
    prefixes: &KeyMap<&'static str, &'static Prefix>,
    units: &KeyMap<&'static str, &'static Unit>,
) -> Result<AbbreviationEntry, AbbreviationDefect> {
    if let Some(&unit) = units.get(token) {
        return Ok(AbbreviationEntry::new(token, None, unit));
    }
    let mut known_unit = None;
    for (split, _) in token.char_indices().skip(1) {
        let (head, tail) = token.split_at(split);
        let Some(&unit) = units.get(tail) else {
            continue;
        };
        if let Some(&prefix) = prefixes.get(head) {
            return Ok(AbbreviationEntry::new(token, Some(prefix), unit));
        }
        known_unit.get_or_insert((head, unit));
    }
    match known_unit {
        Some((prefix, unit)) => Err(AbbreviationDefect::UnknownPrefix {
            token: token.to_owned(),
            prefix: prefix.to_owned(),
            unit: unit.name,
        }),
        None => Err(AbbreviationDefect::UnknownUnit {
            token: token.to_owned(),
            remainder: token
                .char_indices()
                .nth(1)
                .map_or_else(String::new, |(i, _)| token[i..].to_owned()),
        }),
    }
}

/// Builds the abbreviation table for the given combination groups.
///
/// Defects are logged, recorded in [`Abbreviations::defects`] and left out
/// of the table. Construction never fails.
#[must_use]
pub fn expand_abbreviations(groups: &[&str]) -> Abbreviations {
    let prefixes: KeyMap<&'static str, &'static Prefix> = PREFIXES
        .values()
        .filter_map(|p| p.abbreviation.map(|a| (a, p)))
        .collect();
    let units: KeyMap<&'static str, &'static Unit> = UNITS
        .values()
        .filter_map(|u| u.abbreviation.map(|a| (a, u)))
        .collect();

    let mut out = Abbreviations::default();

    let mut bare: Vec<(&'static str, &'static Unit)> = units.iter().map(|(&a, &u)| (a, u)).collect();
    bare.sort_unstable_by_key(|&(a, _)| a);
    for (abbreviation, unit) in bare {
        if let Err(defect) = out.insert(AbbreviationEntry::new(abbreviation, None, unit)) {
            out.reject(defect);
        }
    }

    for token in groups.iter().flat_map(|group| group.split_whitespace()) {
        match resolve_token(token, &prefixes, &units).and_then(|entry| out.insert(entry)) {
            Ok(()) => {}
            Err(defect) => out.reject(defect),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_groups_have_no_defects() {
        let abbreviations = expand_abbreviations(&ABBREVIATION_GROUPS);
        assert!(abbreviations.defects.is_empty(), "{:?}", abbreviations.defects);
    }

    #[test]
    fn test_prefixed_entry() {
        let abbreviations = expand_abbreviations(&ABBREVIATION_GROUPS);
        let entry = &abbreviations.entries[abbreviations.index["kHz"]];
        assert_eq!(entry.prefix.map(|p| p.name), Some("kilo"));
        assert_eq!(entry.unit.name, "hertz");
        assert_eq!(entry.expansion, r"\kilo\hertz");

        let entry = &abbreviations.entries[abbreviations.index["umol"]];
        assert_eq!(entry.prefix.map(|p| p.name), Some("micro"));
        assert_eq!(entry.unit.name, "mole");
    }

    #[test]
    fn test_bare_entries_win_over_splits() {
        let abbreviations = expand_abbreviations(&ABBREVIATION_GROUPS);
        let entry = &abbreviations.entries[abbreviations.index["mol"]];
        assert_eq!(entry.prefix, None);
        assert_eq!(entry.expansion, r"\mole");

        let entry = &abbreviations.entries[abbreviations.index["mm"]];
        assert_eq!(entry.prefix.map(|p| p.name), Some("milli"));
        assert_eq!(entry.unit.name, "metre");
    }

    #[test]
    fn test_defects_are_recorded_and_excluded() {
        let abbreviations = expand_abbreviations(&["km xm kQ", "da"]);
        assert!(abbreviations.index.contains_key("km"));
        assert!(!abbreviations.index.contains_key("xm"));
        assert!(!abbreviations.index.contains_key("kQ"));
        assert!(!abbreviations.index.contains_key("da"));
        assert_eq!(
            abbreviations.defects,
            [
                AbbreviationDefect::UnknownPrefix {
                    token: "xm".to_owned(),
                    prefix: "x".to_owned(),
                    unit: "metre",
                },
                AbbreviationDefect::UnknownUnit {
                    token: "kQ".to_owned(),
                    remainder: "Q".to_owned(),
                },
                AbbreviationDefect::UnknownUnit {
                    token: "da".to_owned(),
                    remainder: "a".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_conflict_with_vocabulary() {
        let hertz = UNITS.get("hertz").unwrap();
        let mut abbreviations = Abbreviations::default();
        assert_eq!(
            abbreviations.insert(AbbreviationEntry::new("kilo", None, hertz)),
            Err(AbbreviationDefect::Conflict {
                token: "kilo".to_owned()
            })
        );
        assert!(abbreviations.insert(AbbreviationEntry::new("Hz", None, hertz)).is_ok());
        assert!(abbreviations.insert(AbbreviationEntry::new("Hz", None, hertz)).is_ok());
        let kilo = PREFIXES.get("kilo");
        assert_eq!(
            abbreviations.insert(AbbreviationEntry::new("Hz", kilo, hertz)),
            Err(AbbreviationDefect::Conflict {
                token: "Hz".to_owned()
            })
        );
        assert_eq!(abbreviations.entries.len(), 1);
    }

    #[test]
    fn test_defect_messages() {
        let defect = AbbreviationDefect::Conflict {
            token: "kilo".to_owned(),
        };
        assert_eq!(
            defect.to_string(),
            "abbreviation 'kilo' is already defined differently"
        );
    }
}
