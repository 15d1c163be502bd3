use log::{debug, error, warn};

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            call_stack::{CallStack, Frame},
            core::{EvalResult, Interpreter},
        },
        value::core::Value,
    },
};

/// Executes a procedure call.
///
/// The callee is resolved by program-text nesting, starting from the
/// procedure that owns the current frame. Arguments are evaluated in the
/// caller's frame, left to right, before the callee's frame is pushed. The
/// frame is popped again on every exit path, including errors raised inside
/// the body.
///
/// A call that would grow the stack past its
/// [`max_depth`](CallStack::max_depth) is refused before anything is pushed.
///
/// # Parameters
/// - `interpreter`: Supplies the procedure signatures.
/// - `name`: Procedure name as written at the call site.
/// - `arguments`: Actual argument expressions.
/// - `line`: Line number for error reporting.
/// - `stack`: The call stack; its top frame is the caller.
///
/// # Errors
/// - `ArgumentCountMismatch` if the number of arguments differs from the
///   number of declared parameters.
/// - `UnboundName` if the name resolves to no procedure.
/// - `RecursionLimit` if the call stack is already full.
/// - Any error raised while evaluating the arguments or running the body.
pub fn call_procedure(interpreter: &Interpreter<'_>,
                      name: &str,
                      arguments: &[Expr],
                      line: usize,
                      stack: &mut CallStack)
                      -> EvalResult<()> {
    let caller = stack.peek().and_then(|frame| frame.procedure);
    let Some(id) = interpreter.symbols.resolve_procedure(name, caller) else {
        error!("procedure '{name}' is not visible from the calling frame (line {line})");
        return Err(RuntimeError::UnboundName { name: name.to_string(),
                                               line });
    };
    let Some(procedure) = interpreter.symbols.procedure(id) else {
        return Err(RuntimeError::UnboundName { name: name.to_string(),
                                               line });
    };

    let values = arguments.iter()
                          .map(|arg| interpreter.eval(arg, stack))
                          .collect::<EvalResult<Vec<Value>>>()?;

    if stack.depth() >= stack.max_depth() {
        warn!("call to '{name}' on line {line} refused at depth {}", stack.depth());
        return Err(RuntimeError::RecursionLimit { name: name.to_string(),
                                                  limit: stack.max_depth(),
                                                  line });
    }

    debug!("ENTER: PROCEDURE {name} (declared on line {})", procedure.line);
    let mut frame = stack.enter(Frame::procedure(&procedure.name, id, procedure.scope_level));

    if values.len() != procedure.params.len() {
        return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                         expected: procedure.params.len(),
                                                         found: values.len(),
                                                         line });
    }
    for (param, value) in procedure.params.iter().zip(values) {
        frame.define(&param.name, value);
    }

    interpreter.exec_block(procedure.block, &mut frame)?;
    debug!("{}", *frame);
    debug!("LEAVE: PROCEDURE {name}");
    Ok(())
}
