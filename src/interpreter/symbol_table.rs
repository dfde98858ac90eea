use std::collections::HashMap;

use crate::ast::Position;

/// A declared variable and its current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// The variable name.
    pub name:        String,
    /// Current value. Every variable starts at 0.
    pub value:       i64,
    /// Where the `variable` declaration appears.
    pub declared_at: Position,
    /// Declaration index, starting at 0.
    pub slot:        usize,
}

/// The single flat scope of a program.
///
/// Names map to mutable integer cells. A name can be declared once; later
/// declarations are rejected and report the first one. Symbols are stored in
/// declaration order, which is also their slot order.
///
/// # Example
/// ```
/// use hansen::{ast::Position, interpreter::symbol_table::SymbolTable};
///
/// let mut table = SymbolTable::new();
/// table.declare("n", Position::new(1, 16)).unwrap();
/// table.set("n", 9);
///
/// assert_eq!(table.get("n"), Some(9));
/// assert_eq!(table.declare("n", Position::new(2, 10)), Err(Position::new(1, 16)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    index:   HashMap<String, usize>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `name` with value 0.
    ///
    /// # Returns
    /// The slot assigned to the new variable.
    ///
    /// # Errors
    /// Returns the position of the earlier declaration if `name` is already in
    /// the table. The table is left unchanged.
    pub fn declare(&mut self, name: &str, position: Position) -> Result<usize, Position> {
        if let Some(&slot) = self.index.get(name) {
            return Err(self.symbols[slot].declared_at);
        }

        let slot = self.symbols.len();
        self.symbols.push(Symbol { name: name.to_string(),
                                   value: 0,
                                   declared_at: position,
                                   slot });
        self.index.insert(name.to_string(), slot);
        Ok(slot)
    }

    /// Looks up the full entry for `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).map(|&slot| &self.symbols[slot])
    }

    /// Returns the current value of `name`, or `None` if it was never declared.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<i64> {
        self.lookup(name).map(|symbol| symbol.value)
    }

    /// Stores `value` in the cell for `name`.
    ///
    /// Returns `false` without changing anything if `name` was never declared.
    pub fn set(&mut self, name: &str, value: i64) -> bool {
        match self.index.get(name) {
            Some(&slot) => {
                self.symbols[slot].value = value;
                true
            },
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of declared variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterates over the symbols in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type IntoIter = std::slice::Iter<'a, Symbol>;
    type Item = &'a Symbol;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
