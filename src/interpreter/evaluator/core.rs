use log::{debug, error};

use crate::{
    ast::{Block, Declaration, Expr, Program, Statement, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        analyzer::symbol::ProgramSymbols,
        evaluator::{
            call_stack::{Bindings, CallStack, Frame},
            procedure::call_procedure,
        },
        value::core::Value,
    },
    util::num::checked_arithmetic,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Executes analyzed programs.
///
/// The interpreter itself is stateless apart from the procedure signatures
/// produced by the analyzer. All runtime state lives in the [`CallStack`]
/// handed to each entry point, so a caller can inspect the stack after a run,
/// including after a failed one.
///
/// ## Usage
///
/// Only run trees that passed
/// [`SemanticAnalyzer::analyze`](crate::interpreter::analyzer::core::SemanticAnalyzer::analyze);
/// the interpreter assumes every name resolves.
pub struct Interpreter<'a> {
    pub(crate) symbols: &'a ProgramSymbols<'a>,
}

impl<'a> Interpreter<'a> {
    /// Creates an interpreter over the signatures of one analyzed program.
    #[must_use]
    pub const fn new(symbols: &'a ProgramSymbols<'a>) -> Self {
        Self { symbols }
    }

    /// Runs a program to completion.
    ///
    /// Pushes the program frame, executes the main block and pops the frame
    /// again, also when execution fails.
    ///
    /// # Parameters
    /// - `program`: The analyzed program.
    /// - `stack`: The call stack to run on, normally empty.
    ///
    /// # Returns
    /// The program frame's variables as they were just before the frame was
    /// popped.
    ///
    /// # Errors
    /// The first `RuntimeError` raised anywhere in the program.
    ///
    /// # Example
    /// ```
    /// use pasci::interpreter::{
    ///     analyzer::core::SemanticAnalyzer,
    ///     evaluator::{call_stack::CallStack, core::Interpreter},
    ///     lexer::tokenize,
    ///     parser::core::parse_program,
    ///     value::core::Value,
    /// };
    ///
    /// let source = "PROGRAM p; VAR x : INTEGER; BEGIN x := 6 * 7 END.";
    /// let program = parse_program(&tokenize(source).unwrap()).unwrap();
    /// let symbols = SemanticAnalyzer::analyze(&program).unwrap();
    ///
    /// let mut stack = CallStack::new();
    /// let globals = Interpreter::new(&symbols).interpret(&program, &mut stack).unwrap();
    ///
    /// assert_eq!(globals["x"], Value::Integer(42));
    /// assert!(stack.is_balanced());
    /// ```
    pub fn interpret(&self, program: &Program, stack: &mut CallStack) -> EvalResult<Bindings> {
        debug!("ENTER: PROGRAM {}", program.name);
        let mut frame = stack.enter(Frame::program(&program.name));
        self.exec_block(&program.block, &mut frame)?;
        let globals = frame.peek().map(|f| f.members.clone()).unwrap_or_default();
        debug!("{}", *frame);
        debug!("LEAVE: PROGRAM {}", program.name);
        Ok(globals)
    }

    /// Evaluates a standalone expression inside a temporary frame.
    ///
    /// # Errors
    /// Any `RuntimeError` raised by the expression.
    pub fn evaluate_expression(&self, expr: &Expr, stack: &mut CallStack) -> EvalResult<Value> {
        let frame = stack.enter(Frame::program("expression"));
        self.eval(expr, &frame)
    }

    /// Binds the block's variables in the current frame, then runs its
    /// statements in order.
    ///
    /// Nested procedure declarations need no runtime work; their signatures
    /// were collected during analysis.
    pub(crate) fn exec_block(&self, block: &Block, stack: &mut CallStack) -> EvalResult<()> {
        for declaration in &block.declarations {
            if let Declaration::Variable(decl) = declaration {
                stack.define(&decl.name, Value::default());
            }
        }
        block.statements
             .iter()
             .try_for_each(|statement| self.exec_statement(statement, stack))
    }

    /// Executes one statement.
    pub(crate) fn exec_statement(&self, statement: &Statement, stack: &mut CallStack) -> EvalResult<()> {
        match statement {
            Statement::Compound(statements) => statements.iter()
                                                         .try_for_each(|s| self.exec_statement(s, stack)),
            Statement::Assignment { target, value, .. } => {
                let value = self.eval(value, stack)?;
                if stack.assign(&target.name, value) {
                    Ok(())
                } else {
                    Err(unbound(&target.name, target.line))
                }
            },
            Statement::ProcedureCall { name,
                                       arguments,
                                       line, } => call_procedure(self, name, arguments, *line, stack),
            Statement::Conditional { condition,
                                     then_branch,
                                     else_branch,
                                     .. } => {
                if self.eval(condition, stack)?.is_truthy() {
                    self.exec_statement(then_branch, stack)
                } else if let Some(branch) = else_branch {
                    self.exec_statement(branch, stack)
                } else {
                    Ok(())
                }
            },
            Statement::NoOp => Ok(()),
        }
    }

    /// Evaluates an expression against the current frame.
    ///
    /// Variables resolve through the enclosing links of the call stack, never
    /// through the caller chain.
    pub(crate) fn eval(&self, expr: &Expr, stack: &CallStack) -> EvalResult<Value> {
        match expr {
            Expr::Number { value, .. } => Ok(Value::Integer(*value)),
            Expr::Boolean { value, .. } => Ok(Value::Boolean(*value)),
            Expr::Variable(var) => stack.lookup(&var.name)
                                        .ok_or_else(|| unbound(&var.name, var.line)),
            Expr::UnaryOp { op, expr, line } => {
                let operand = self.eval(expr, stack)?.as_integer(*line)?;
                match op {
                    UnaryOperator::Plus => Ok(Value::Integer(operand)),
                    UnaryOperator::Negate => operand.checked_neg()
                                                    .map(Value::Integer)
                                                    .ok_or(RuntimeError::Overflow { line: *line }),
                }
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => {
                let left = self.eval(left, stack)?.as_integer(*line)?;
                let right = self.eval(right, stack)?.as_integer(*line)?;
                checked_arithmetic(*op, left, right, *line).map(Value::Integer)
            },
        }
    }
}

fn unbound(name: &str, line: usize) -> RuntimeError {
    error!("'{name}' is not bound in any enclosing frame (line {line})");
    RuntimeError::UnboundName { name: name.to_string(),
                                line }
}
