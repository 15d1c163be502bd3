use std::{
    collections::HashMap,
    ops::{Deref, DerefMut},
    sync::LazyLock,
};

use log::{debug, trace, warn};

use crate::interpreter::analyzer::symbol::{BuiltinType, Symbol};

/// The process-wide scope holding the built-in types, level 0.
///
/// Seeded exactly once, on first use, and shared by every analysis.
pub static BUILTIN_SCOPE: LazyLock<ScopedSymbolTable> = LazyLock::new(|| {
    let mut table = ScopedSymbolTable::new("builtins", 0);
    for ty in BuiltinType::ALL {
        table.define(Symbol::BuiltinType(ty));
    }
    debug!("initialized built-in scope\n{table}");
    table
});

/// A table of the symbols declared directly in one scope.
#[derive(Debug, Clone)]
pub struct ScopedSymbolTable {
    scope_name:  String,
    scope_level: usize,
    symbols:     HashMap<String, Symbol>,
}

impl ScopedSymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new(scope_name: impl Into<String>, scope_level: usize) -> Self {
        Self { scope_name: scope_name.into(),
               scope_level,
               symbols: HashMap::new() }
    }

    /// Inserts a symbol, replacing any symbol of the same name.
    ///
    /// Rejecting duplicates is the caller's job.
    pub fn define(&mut self, symbol: Symbol) {
        trace!("define in '{}': {symbol}", self.scope_name);
        self.symbols.insert(symbol.name().to_string(), symbol);
    }

    /// Looks a name up in this table only.
    #[must_use]
    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// The scope's name: `builtins`, the program name or a procedure name.
    #[must_use]
    pub fn scope_name(&self) -> &str {
        &self.scope_name
    }

    /// The nesting level, 0 for the built-in scope.
    #[must_use]
    pub const fn scope_level(&self) -> usize {
        self.scope_level
    }

    /// Number of symbols defined directly in this scope.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the scope defines no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl std::fmt::Display for ScopedSymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SCOPE (SCOPED SYMBOL TABLE)")?;
        writeln!(f, "   scope name  : {}", self.scope_name)?;
        writeln!(f, "   scope level : {}", self.scope_level)?;
        let mut names = self.symbols.keys().collect::<Vec<_>>();
        names.sort();
        for name in names {
            writeln!(f, "   {name:<12}: {}", self.symbols[name])?;
        }
        Ok(())
    }
}

/// The chain of scopes open at one point of the analysis.
///
/// The bottom of the chain is always [`BUILTIN_SCOPE`]. Every table above it
/// is enclosed by the table directly beneath, and its level is one higher.
/// Tables are created by [`ScopeChain::enter`] and discarded when the
/// returned guard is dropped.
///
/// # Example
/// ```
/// use pasci::interpreter::analyzer::scope::ScopeChain;
///
/// let mut chain = ScopeChain::new();
/// assert_eq!(chain.current_level(), 0);
/// assert!(chain.lookup("INTEGER", false).is_some());
///
/// {
///     let scope = chain.enter("main");
///     assert_eq!(scope.current_level(), 1);
///     assert!(scope.lookup("INTEGER", true).is_none());
/// }
///
/// assert_eq!(chain.current_level(), 0);
/// ```
#[derive(Debug, Default)]
pub struct ScopeChain {
    tables: Vec<ScopedSymbolTable>,
}

impl ScopeChain {
    /// Creates a chain holding only the built-in scope.
    #[must_use]
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// The innermost open table.
    #[must_use]
    pub fn current(&self) -> &ScopedSymbolTable {
        self.tables.last().unwrap_or(&*BUILTIN_SCOPE)
    }

    /// Level of the innermost open table.
    #[must_use]
    pub fn current_level(&self) -> usize {
        self.current().scope_level()
    }

    /// Defines a symbol in the innermost open table.
    ///
    /// The built-in scope is never modified after seeding; defining while
    /// only it is open is ignored.
    pub fn define(&mut self, symbol: Symbol) {
        match self.tables.last_mut() {
            Some(table) => table.define(symbol),
            None => warn!("no user scope is open, '{}' was not defined", symbol.name()),
        }
    }

    /// Resolves a name.
    ///
    /// Searches the innermost table, then, unless `current_scope_only` is
    /// set, every enclosing table outward down to the built-in scope.
    #[must_use]
    pub fn lookup(&self, name: &str, current_scope_only: bool) -> Option<&Symbol> {
        let mut tables = self.tables
                             .iter()
                             .rev()
                             .chain(std::iter::once::<&ScopedSymbolTable>(&*BUILTIN_SCOPE));
        if current_scope_only {
            return tables.next().and_then(|table| table.lookup_local(name));
        }
        tables.find_map(|table| table.lookup_local(name))
    }

    /// Opens a new innermost scope enclosed by the current one.
    ///
    /// The scope is closed again when the returned guard is dropped, however
    /// the code holding it exits.
    pub fn enter(&mut self, scope_name: &str) -> ScopeGuard<'_> {
        let table = ScopedSymbolTable::new(scope_name, self.current_level() + 1);
        debug!("enter scope: {scope_name} (level {})", table.scope_level());
        self.tables.push(table);
        ScopeGuard { chain: self }
    }

    fn leave(&mut self) {
        if let Some(table) = self.tables.pop() {
            debug!("leave scope: {}\n{table}", table.scope_name());
        }
    }

    /// Number of open scopes above the built-in scope.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.tables.len()
    }
}

/// Keeps a scope open; restores the enclosing scope when dropped.
pub struct ScopeGuard<'c> {
    chain: &'c mut ScopeChain,
}

impl Deref for ScopeGuard<'_> {
    type Target = ScopeChain;

    fn deref(&self) -> &Self::Target {
        self.chain
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.chain
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.chain.leave();
    }
}
