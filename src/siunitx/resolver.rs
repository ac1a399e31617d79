//! Command lookup that the gullet and parser consult
//!
//! The host resolver knows macros (through the gullet's namespace) and
//! functions. Inside a unit field the [`UnitResolver`] is swapped in front
//! of it, so the unit vocabulary wins over anything the host defines.

use alloc::rc::Rc;

use crate::context::KatexContext;
use crate::define_function::FunctionSpec;
use crate::siunitx::prefixes::Prefix;
use crate::siunitx::tables::{UnitCommand, UnitTables};
use crate::siunitx::unit_table::Unit;

/// What a control sequence resolves to.
#[derive(Debug, Clone, Copy)]
pub enum Command<'r> {
    /// See [`UnitCommand::Prefix`].
    Prefix(&'static Prefix),
    /// See [`UnitCommand::Unit`].
    Unit(&'static Unit),
    /// `\per`: the next unit is raised to the power of minus one.
    Per,
    /// Replacement text to be lexed and expanded in place.
    Macro(&'r str),
    /// A host function such as `\text`.
    Function(&'r FunctionSpec),
}

/// Maps command names (with their backslash) to [`Command`]s.
pub trait CommandResolver {
    /// Returns `None` for names the resolver does not know.
    fn resolve(&self, name: &str) -> Option<Command<'_>>;
}

impl<T: CommandResolver + ?Sized> CommandResolver for &T {
    fn resolve(&self, name: &str) -> Option<Command<'_>> {
        (**self).resolve(name)
    }
}

impl CommandResolver for KatexContext {
    fn resolve(&self, name: &str) -> Option<Command<'_>> {
        self.functions.get(name).map(Command::Function)
    }
}

/// Resolves the unit vocabulary first and defers everything else to the
/// host resolver.
pub struct UnitResolver<'t> {
    tables: &'t UnitTables,
    host: Rc<dyn CommandResolver + 't>,
}

impl<'t> UnitResolver<'t> {
    /// Wraps `host`, which answers everything the unit tables do not.
    #[must_use]
    pub fn new(tables: &'t UnitTables, host: Rc<dyn CommandResolver + 't>) -> Self {
        Self { tables, host }
    }
}

impl CommandResolver for UnitResolver<'_> {
    fn resolve(&self, name: &str) -> Option<Command<'_>> {
        match self.tables.lookup_command(name) {
            Some(UnitCommand::Prefix(prefix)) => Some(Command::Prefix(prefix)),
            Some(UnitCommand::Unit(unit)) => Some(Command::Unit(unit)),
            Some(UnitCommand::Per) => Some(Command::Per),
            Some(UnitCommand::Expansion(body)) => Some(Command::Macro(body)),
            None => self.host.resolve(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_resolves_functions_only() {
        let ctx = KatexContext::default();
        assert!(matches!(ctx.resolve(r"\si"), Some(Command::Function(_))));
        assert!(ctx.resolve(r"\kilo").is_none());
    }

    #[test]
    fn test_unit_vocabulary_shadows_host() {
        let ctx = KatexContext::default();
        let host: Rc<dyn CommandResolver + '_> = Rc::new(&ctx);
        let resolver = UnitResolver::new(&ctx.units, host);
        assert!(matches!(resolver.resolve(r"\kilo"), Some(Command::Prefix(p)) if p.exponent == 3));
        assert!(matches!(resolver.resolve(r"\hertz"), Some(Command::Unit(u)) if u.name == "hertz"));
        assert!(matches!(
            resolver.resolve(r"\kHz"),
            Some(Command::Macro(r"\kilo\hertz"))
        ));
        assert!(matches!(resolver.resolve(r"\per"), Some(Command::Per)));
        assert!(matches!(resolver.resolve(r"\text"), Some(Command::Function(_))));
        assert!(resolver.resolve(r"\nosuchcommand").is_none());
    }
}
