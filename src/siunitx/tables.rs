//! The immutable table bundle shared by every unit parse

use tracing::debug;

use crate::siunitx::abbreviations::{
    ABBREVIATION_GROUPS, AbbreviationDefect, AbbreviationEntry, Abbreviations,
    expand_abbreviations,
};
use crate::siunitx::prefixes::{PREFIXES, Prefix, lookup_prefix};
use crate::siunitx::unit_table::{UNIT_ALIASES, UNITS, Unit, lookup_alias, lookup_unit};

/// What a command name means inside a unit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitCommand<'t> {
    /// A prefix waiting for its unit.
    Prefix(&'static Prefix),
    /// A unit, consuming any pending prefix.
    Unit(&'static Unit),
    /// `\per`
    Per,
    /// A macro body, from an alias or an abbreviation.
    Expansion(&'t str),
}

/// Prefixes, units, aliases and the synthesized abbreviations.
///
/// Built once with [`UnitTables::new`] and then only read. The bundle is
/// `Send + Sync` and is passed by reference to every unit parse.
#[derive(Debug)]
pub struct UnitTables {
    abbreviations: Abbreviations,
}

impl Default for UnitTables {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitTables {
    /// Builds the tables with the shipped abbreviation groups.
    #[must_use]
    pub fn new() -> Self {
        Self::from_groups(&ABBREVIATION_GROUPS)
    }

    /// Builds the tables with custom abbreviation groups.
    #[must_use]
    pub fn from_groups(groups: &[&str]) -> Self {
        let abbreviations = expand_abbreviations(groups);
        debug!(
            prefixes = PREFIXES.len(),
            units = UNITS.len(),
            aliases = UNIT_ALIASES.len(),
            abbreviations = abbreviations.entries.len(),
            defects = abbreviations.defects.len(),
            "built unit tables"
        );
        Self { abbreviations }
    }

    /// A prefix by name, without the backslash.
    #[must_use]
    pub fn lookup_prefix(&self, name: &str) -> Option<&'static Prefix> {
        lookup_prefix(name)
    }

    /// A unit by name, without the backslash.
    #[must_use]
    pub fn lookup_unit(&self, name: &str) -> Option<&'static Unit> {
        lookup_unit(name)
    }

    /// The macro body of an alias such as `meter`.
    #[must_use]
    pub fn lookup_alias(&self, name: &str) -> Option<&'static str> {
        lookup_alias(name)
    }

    /// A synthesized abbreviation such as `kHz`.
    #[must_use]
    pub fn lookup_abbreviation(&self, name: &str) -> Option<&AbbreviationEntry> {
        self.abbreviations
            .index
            .get(name)
            .and_then(|&i| self.abbreviations.entries.get(i))
    }

    /// All abbreviations, in registration order.
    pub fn abbreviations(&self) -> impl Iterator<Item = &AbbreviationEntry> {
        self.abbreviations.entries.iter()
    }

    /// Group tokens that were rejected while building the tables.
    #[must_use]
    pub fn defects(&self) -> &[AbbreviationDefect] {
        &self.abbreviations.defects
    }

    /// Resolves a control sequence (with its backslash) against the unit
    /// vocabulary: `\per`, prefixes, units, aliases and finally
    /// abbreviations.
    #[must_use]
    pub fn lookup_command(&self, name: &str) -> Option<UnitCommand<'_>> {
        let name = name.strip_prefix('\\')?;
        if name == "per" {
            return Some(UnitCommand::Per);
        }
        if let Some(prefix) = self.lookup_prefix(name) {
            return Some(UnitCommand::Prefix(prefix));
        }
        if let Some(unit) = self.lookup_unit(name) {
            return Some(UnitCommand::Unit(unit));
        }
        if let Some(body) = self.lookup_alias(name) {
            return Some(UnitCommand::Expansion(body));
        }
        self.lookup_abbreviation(name)
            .map(|entry| UnitCommand::Expansion(&entry.expansion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_tables_are_shareable() {
        assert_send_sync::<UnitTables>();
    }

    #[test]
    fn test_lookup_command_order() {
        let tables = UnitTables::new();
        assert!(matches!(
            tables.lookup_command(r"\kilo"),
            Some(UnitCommand::Prefix(p)) if p.name == "kilo"
        ));
        assert!(matches!(
            tables.lookup_command(r"\ohm"),
            Some(UnitCommand::Unit(u)) if u.name == "ohm"
        ));
        assert_eq!(
            tables.lookup_command(r"\meter"),
            Some(UnitCommand::Expansion(r"\metre"))
        );
        assert_eq!(
            tables.lookup_command(r"\kHz"),
            Some(UnitCommand::Expansion(r"\kilo\hertz"))
        );
        assert_eq!(tables.lookup_command(r"\per"), Some(UnitCommand::Per));
        assert_eq!(tables.lookup_command(r"\frac"), None);
        assert_eq!(tables.lookup_command("kilo"), None);
    }

    #[test]
    fn test_abbreviation_units_are_in_the_table() {
        let tables = UnitTables::new();
        assert!(tables.defects().is_empty());
        for entry in tables.abbreviations() {
            assert_eq!(tables.lookup_unit(entry.unit.name), Some(entry.unit));
            if let Some(prefix) = entry.prefix {
                assert_eq!(tables.lookup_prefix(prefix.name), Some(prefix));
            }
        }
    }

    #[test]
    fn test_custom_groups() {
        let tables = UnitTables::from_groups(&["kV MV", "qV"]);
        assert!(tables.lookup_abbreviation("kV").is_some());
        assert!(tables.lookup_abbreviation("kHz").is_none());
        assert_eq!(tables.defects().len(), 1);
    }
}
