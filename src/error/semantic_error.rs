use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors raised while validating declarations and references.
///
/// Analysis stops at the first error, and a unit that fails analysis is never
/// interpreted.
pub enum SemanticError {
    /// A name was declared twice in the same scope.
    #[error("Error on line {line}: Duplicate identifier '{name}' in scope '{scope}'.")]
    DuplicateSymbol {
        /// The redeclared name.
        name:  String,
        /// The scope that already holds the name.
        scope: String,
        /// The source line of the second declaration.
        line:  usize,
    },
    /// A referenced identifier is not visible from the reference site.
    #[error("Error on line {line}: Identifier not found: '{name}'.")]
    UndeclaredSymbol {
        /// The unresolved name.
        name: String,
        /// The source line of the reference.
        line: usize,
    },
    /// A declaration names a type that does not resolve to a type symbol.
    #[error("Error on line {line}: Unknown type '{name}'.")]
    TypeNotFound {
        /// The unresolved type name.
        name: String,
        /// The source line of the declaration.
        line: usize,
    },
}
