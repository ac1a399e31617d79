//! Scoped name tables with TeX grouping semantics
//!
//! A [`Namespace`] maps names (macros, in this crate) to values. Local
//! definitions are undone when the enclosing group ends; global ones survive.
//! Like TeX, this is implemented with an undo stack holding the previous
//! value of every name changed inside each open group.

use core::cell::RefMut;

use rapidhash::{RapidHashMap, RapidHashSet};

use crate::types::{ParseError, ParseErrorKind};

pub type KeyMap<K, V> = RapidHashMap<K, V>;
pub type KeySet<K> = RapidHashSet<K>;
pub type Mapping<V> = KeyMap<String, V>;

#[derive(Debug)]
pub struct Namespace<'a, V: Clone + 'static> {
    current: RefMut<'a, Mapping<V>>,
    builtins: &'static phf::Map<&'static str, V>,
    undef_stack: Vec<Mapping<Option<V>>>,
}

impl<'a, V: Clone> Namespace<'a, V> {
    /// Creates a namespace over `global`, falling back to `builtins` for
    /// names that were never defined.
    #[must_use]
    pub const fn new(
        builtins: &'static phf::Map<&'static str, V>,
        global: RefMut<'a, Mapping<V>>,
    ) -> Self {
        Self {
            current: global,
            builtins,
            undef_stack: Vec::new(),
        }
    }

    pub fn begin_group(&mut self) {
        self.undef_stack.push(KeyMap::default());
    }

    fn restore(&mut self, undefs: Mapping<Option<V>>) {
        for (name, previous) in undefs {
            match previous {
                Some(v) => self.current.insert(name, v),
                None => self.current.remove(&name),
            };
        }
    }

    /// Ends the innermost group, undoing its local definitions.
    pub fn end_group(&mut self) -> Result<(), ParseError> {
        let undefs = self
            .undef_stack
            .pop()
            .ok_or_else(|| ParseError::new(ParseErrorKind::UnbalancedNamespaceDestruction))?;
        self.restore(undefs);
        Ok(())
    }

    /// Ends every open group, returning how many were closed.
    pub fn end_groups(&mut self) -> usize {
        let mut count = 0;
        while let Some(undefs) = self.undef_stack.pop() {
            self.restore(undefs);
            count += 1;
        }
        count
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.current.contains_key(name) || self.builtins.contains_key(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&V> {
        self.current.get(name).or_else(|| self.builtins.get(name))
    }

    /// Defines (or with `None`, undefines) `name` locally or globally.
    pub fn set(&mut self, name: &str, value: Option<V>, global: bool) {
        if global {
            // A global set survives every open group: drop the pending undos
            // and record the new value as the one to restore.
            for level in &mut self.undef_stack {
                level.remove(name);
            }
            if let Some(top) = self.undef_stack.last_mut() {
                top.insert(name.to_owned(), value.clone());
            }
        } else if let Some(top) = self.undef_stack.last_mut()
            && !top.contains_key(name)
        {
            let prev = self.current.get(name).cloned();
            top.insert(name.to_owned(), prev);
        }

        match value {
            Some(v) => self.current.insert(name.to_owned(), v),
            None => self.current.remove(name),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;

    static BUILTINS: phf::Map<&'static str, &'static str> = phf::phf_map! {
        "\\meter" => "\\metre",
    };

    #[test]
    fn test_local_definitions_are_undone() {
        let globals = RefCell::new(Mapping::default());
        let mut ns = Namespace::new(&BUILTINS, globals.borrow_mut());

        ns.begin_group();
        ns.set("\\unit", Some("\\metre"), false);
        assert_eq!(ns.get("\\unit"), Some(&"\\metre"));
        ns.end_group().unwrap();
        assert!(!ns.has("\\unit"));
        assert_eq!(ns.get("\\meter"), Some(&"\\metre"));
    }

    #[test]
    fn test_global_definitions_survive_groups() {
        let globals = RefCell::new(Mapping::default());
        {
            let mut ns = Namespace::new(&BUILTINS, globals.borrow_mut());
            ns.begin_group();
            ns.begin_group();
            ns.set("\\unit", Some("\\second"), true);
            assert_eq!(ns.end_groups(), 2);
            assert_eq!(ns.get("\\unit"), Some(&"\\second"));
        }
        assert_eq!(globals.borrow().get("\\unit"), Some(&"\\second"));
    }

    #[test]
    fn test_unbalanced_end_group() {
        let globals = RefCell::new(Mapping::<&'static str>::default());
        let mut ns = Namespace::new(&BUILTINS, globals.borrow_mut());
        let err = ns.end_group().unwrap_err();
        assert!(matches!(
            err.kind.as_ref(),
            ParseErrorKind::UnbalancedNamespaceDestruction
        ));
    }
}
