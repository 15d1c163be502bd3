use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur during lexing or parsing.
///
/// Parsing stops at the first error; no partial tree is ever returned.
pub enum ParseError {
    /// A character matched no lexer rule.
    #[error("Error on line {line}: Invalid character '{character}'.")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// The current token did not match the token the grammar requires.
    #[error("Error on line {line}: Expected {expected}, found {found}.")]
    UnexpectedToken {
        /// Description of the expected token kind.
        expected: String,
        /// Description of the token actually found.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Reached the end of input while a token was still required.
    #[error("Error on line {line}: Unexpected end of input, expected {expected}.")]
    UnexpectedEndOfInput {
        /// Description of the expected token kind.
        expected: String,
        /// The last line that was read.
        line:     usize,
    },
    /// Found extra tokens after the compilation unit was complete.
    #[error("Error on line {line}: Extra tokens after end of unit: {token}.")]
    UnexpectedTrailingTokens {
        /// The first extra token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An integer literal does not fit into 64 bits.
    #[error("Error on line {line}: Integer literal is too large.")]
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Parentheses, prefixes, statements or procedures nest deeper than the
    /// parser allows.
    #[error("Error on line {line}: Nesting exceeds the limit of {limit} levels.")]
    NestingTooDeep {
        /// The deepest accepted nesting.
        limit: usize,
        /// The source line of the construct that went too deep.
        line:  usize,
    },
}

impl ParseError {
    /// Returns the source line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { line, .. }
            | Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line, .. }
            | Self::UnexpectedTrailingTokens { line, .. }
            | Self::LiteralTooLarge { line }
            | Self::NestingTooDeep { line, .. } => *line,
        }
    }

    /// Whether this error was raised by the lexer rather than the parser.
    #[must_use]
    pub const fn is_lexical(&self) -> bool {
        matches!(self,
                 Self::UnexpectedCharacter { .. } | Self::LiteralTooLarge { .. })
    }
}
