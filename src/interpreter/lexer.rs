use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
///
/// Keywords, built-in type names and boolean literals are matched without
/// regard to ASCII case; identifiers keep their spelling.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    IntegerConst(i64),
    /// Boolean literal tokens, `TRUE` or `FALSE`.
    #[token("true", parse_bool, ignore(ascii_case))]
    #[token("false", parse_bool, ignore(ascii_case))]
    Boolean(bool),
    /// `PROGRAM`
    #[token("program", ignore(ascii_case))]
    Program,
    /// `VAR`
    #[token("var", ignore(ascii_case))]
    Var,
    /// `PROCEDURE`
    #[token("procedure", ignore(ascii_case))]
    Procedure,
    /// `BEGIN`
    #[token("begin", ignore(ascii_case))]
    Begin,
    /// `END`
    #[token("end", ignore(ascii_case))]
    End,
    /// `IF`
    #[token("if", ignore(ascii_case))]
    If,
    /// `THEN`
    #[token("then", ignore(ascii_case))]
    Then,
    /// `ELSE`
    #[token("else", ignore(ascii_case))]
    Else,
    /// The built-in type name `INTEGER`.
    #[token("integer", ignore(ascii_case))]
    Integer,
    /// The built-in type name `REAL`.
    #[token("real", ignore(ascii_case))]
    Real,
    /// Identifier tokens; variable, procedure or program names such as `x`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `:=`
    #[token(":=")]
    Assign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `{ Comments. }`
    #[regex(r"\{[^}]*\}", |lex| {
        let comment      = lex.slice();
        let newlines     = comment.chars().filter(|&c| c == '\n').count();
        lex.extras.line += newlines;
        logos::Skip
    })]
    Comment,
    /// Line breaks only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IntegerConst(n) => write!(f, "integer literal {n}"),
            Self::Boolean(b) => write!(f, "boolean literal {}", if *b { "TRUE" } else { "FALSE" }),
            Self::Identifier(name) => write!(f, "identifier '{name}'"),
            other => write!(f, "'{}'", other.spelling()),
        }
    }
}

impl Token {
    /// Returns the canonical source spelling of a token without a payload.
    ///
    /// Tokens carrying a payload are spelled by their kind instead.
    ///
    /// # Example
    /// ```
    /// use pasci::interpreter::lexer::Token;
    ///
    /// assert_eq!(Token::Assign.spelling(), ":=");
    /// assert_eq!(Token::Begin.spelling(), "BEGIN");
    /// ```
    #[must_use]
    pub const fn spelling(&self) -> &'static str {
        match self {
            Self::IntegerConst(_) => "integer literal",
            Self::Boolean(_) => "boolean literal",
            Self::Identifier(_) => "identifier",
            Self::Program => "PROGRAM",
            Self::Var => "VAR",
            Self::Procedure => "PROCEDURE",
            Self::Begin => "BEGIN",
            Self::End => "END",
            Self::If => "IF",
            Self::Then => "THEN",
            Self::Else => "ELSE",
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Assign => ":=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Comment => "comment",
            Self::NewLine => "newline",
            Self::Ignored => "whitespace",
        }
    }

    /// Whether two tokens are of the same kind, ignoring payloads.
    ///
    /// # Example
    /// ```
    /// use pasci::interpreter::lexer::Token;
    ///
    /// assert!(Token::IntegerConst(1).same_kind(&Token::IntegerConst(2)));
    /// assert!(!Token::Plus.same_kind(&Token::Minus));
    /// ```
    #[must_use]
    pub fn same_kind(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// Parses an integer literal from the current token slice.
///
/// # Returns
/// - `Some(i64)`: The parsed integer value if successful.
/// - `None`: If the literal does not fit into an `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Parses a boolean literal from the current token slice, in any case.
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    let slice = lex.slice();
    if slice.eq_ignore_ascii_case("true") {
        Some(true)
    } else if slice.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Converts source text into a token stream.
///
/// Each token is paired with the line it starts on. The end of the returned
/// vector marks the end of input.
///
/// # Errors
/// - `ParseError::UnexpectedCharacter` for a character that starts no token.
/// - `ParseError::LiteralTooLarge` for an integer literal that overflows.
///
/// # Example
/// ```
/// use pasci::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("x := 1\n+ 2").unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Identifier("x".to_string()), 1),
///                 (Token::Assign, 1),
///                 (Token::IntegerConst(1), 1),
///                 (Token::Plus, 2),
///                 (Token::IntegerConst(2), 2)]);
///
/// assert!(tokenize("x := 1 ? 2").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras::default());

    while let Some(token) = lexer.next() {
        let line = lexer.extras.line;
        match token {
            Ok(tok) => tokens.push((tok, line)),
            Err(()) => {
                let slice = lexer.slice();
                if !slice.is_empty() && slice.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ParseError::LiteralTooLarge { line });
                }
                let character = slice.chars().next().unwrap_or('\0');
                return Err(ParseError::UnexpectedCharacter { character, line });
            },
        }
    }

    log::trace!("tokenized {} token(s)", tokens.len());
    Ok(tokens)
}
