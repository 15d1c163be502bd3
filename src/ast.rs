/// An abstract syntax tree (AST) node representing an expression.
///
/// Expressions cover literals, variable references and arithmetic. Each
/// variant owns its children, so an expression is always a finite tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// An integer literal such as `42`.
    Number {
        /// The literal value.
        value: i64,
        /// Line number in the source code.
        line:  usize,
    },
    /// A boolean literal, `TRUE` or `FALSE`.
    Boolean {
        /// The literal value.
        value: bool,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable(VariableRef),
    /// A unary prefix operation (`+x`, `-x`).
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary arithmetic operation.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use pasci::ast::Expr;
    ///
    /// let expr = Expr::Number { value: 3,
    ///                           line:  5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Number { line, .. }
            | Self::Boolean { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::BinaryOp { line, .. } => *line,
            Self::Variable(var) => var.line,
        }
    }
}

/// A use of a variable name, either read in an expression or written by an
/// assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableRef {
    /// Name of the variable.
    pub name: String,
    /// Line number in the source code.
    pub line: usize,
}

/// A type name as written in a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    /// The type name, upper-cased for the built-in type keywords.
    pub name: String,
    /// Line number in the source code.
    pub line: usize,
}

/// A variable declaration, `x : INTEGER`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    /// The declared name.
    pub name: String,
    /// The declared type.
    pub ty:   TypeSpec,
    /// Line number in the source code.
    pub line: usize,
}

/// A formal parameter of a procedure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// The parameter name.
    pub name: String,
    /// The declared type.
    pub ty:   TypeSpec,
    /// Line number in the source code.
    pub line: usize,
}

/// A procedure declaration with its own nested block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureDecl {
    /// The procedure name.
    pub name:   String,
    /// The formal parameters, in declaration order.
    pub params: Vec<Param>,
    /// The procedure body.
    pub block:  Block,
    /// Line number in the source code.
    pub line:   usize,
}

/// A single declaration inside a block's declaration section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// A variable declaration.
    Variable(VarDecl),
    /// A procedure declaration.
    Procedure(ProcedureDecl),
}

/// A block: the declarations of a program or procedure followed by its
/// compound statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The declarations, in source order.
    pub declarations: Vec<Declaration>,
    /// The statements of the `BEGIN ... END` body, in source order.
    pub statements:   Vec<Statement>,
}

/// The root of a compilation unit, `PROGRAM name; block.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// The program name.
    pub name:  String,
    /// The program block.
    pub block: Block,
    /// Line number in the source code.
    pub line:  usize,
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// A nested `BEGIN ... END` sequence.
    Compound(Vec<Self>),
    /// An assignment `target := value`.
    Assignment {
        /// The variable being written.
        target: VariableRef,
        /// The assigned expression.
        value:  Expr,
        /// Line number in the source code.
        line:   usize,
    },
    /// A call of a declared procedure.
    ProcedureCall {
        /// Name of the procedure being called.
        name:      String,
        /// The actual arguments, in order.
        arguments: Vec<Expr>,
        /// Line number in the source code.
        line:      usize,
    },
    /// Conditional `IF condition THEN statement ELSE statement`.
    Conditional {
        /// The condition expression.
        condition:   Expr,
        /// Statement executed if the condition holds.
        then_branch: Box<Self>,
        /// Statement executed otherwise, if present.
        else_branch: Option<Box<Self>>,
        /// Line number in the source code.
        line:        usize,
    },
    /// The empty statement.
    NoOp,
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Floor division (`/`)
    Div,
}

/// Represents a unary prefix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Identity (`+x`).
    Plus,
    /// Arithmetic negation (`-x`).
    Negate,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plus => write!(f, "+"),
            Self::Negate => write!(f, "-"),
        }
    }
}
