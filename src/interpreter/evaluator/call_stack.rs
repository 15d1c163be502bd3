use std::{
    collections::BTreeMap,
    ops::{Deref, DerefMut},
};

use log::trace;

use crate::interpreter::{analyzer::symbol::ProcedureId, value::core::Value};

/// Default bound on the number of frames a [`CallStack`] holds.
pub const MAX_CALL_DEPTH: usize = 128;

/// Variable bindings of one frame, ordered by name.
pub type Bindings = BTreeMap<String, Value>;

/// What kind of body a frame belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameKind {
    /// The main program block.
    Program,
    /// A procedure activation.
    Procedure,
}

impl std::fmt::Display for FrameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Program => write!(f, "PROGRAM"),
            Self::Procedure => write!(f, "PROCEDURE"),
        }
    }
}

/// An activation record: the runtime storage of one program or procedure
/// invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Program or procedure name.
    pub name:          String,
    /// Program or procedure frame.
    pub kind:          FrameKind,
    /// Dynamic depth: 1 for the program, caller + 1 for every call.
    pub nesting_level: usize,
    /// Static level of the body's scope: 1 for the program, declaring scope
    /// + 1 for a procedure.
    pub scope_level:   usize,
    /// The procedure being run, `None` for the program.
    pub procedure:     Option<ProcedureId>,
    /// Local variables and parameters.
    pub members:       Bindings,
    /// Stack index of the frame of the lexically enclosing body.
    pub enclosing:     Option<usize>,
}

impl Frame {
    /// Creates the frame of the main program.
    #[must_use]
    pub fn program(name: &str) -> Self {
        Self { name:          name.to_string(),
               kind:          FrameKind::Program,
               nesting_level: 1,
               scope_level:   1,
               procedure:     None,
               members:       Bindings::new(),
               enclosing:     None, }
    }

    /// Creates the frame of a procedure whose body scope has `scope_level`.
    ///
    /// Nesting level and enclosing frame are filled in by
    /// [`CallStack::push`].
    #[must_use]
    pub fn procedure(name: &str, id: ProcedureId, scope_level: usize) -> Self {
        Self { name: name.to_string(),
               kind: FrameKind::Procedure,
               nesting_level: 1,
               scope_level,
               procedure: Some(id),
               members: Bindings::new(),
               enclosing: None }
    }

    /// Returns the value bound to `name` in this frame only.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.members.get(name).copied()
    }

    /// Binds `name` in this frame.
    pub fn set(&mut self, name: &str, value: Value) {
        self.members.insert(name.to_string(), value);
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} {}", self.nesting_level, self.kind, self.name)?;
        for (name, value) in &self.members {
            write!(f, "\n   {name:<20}: {value}")?;
        }
        Ok(())
    }
}

/// The runtime call stack.
///
/// Frames are pushed and popped strictly LIFO. Besides the dynamic order,
/// each frame links to the frame of its lexically enclosing body, and
/// variable access follows those links only. A procedure nested in `A`
/// therefore sees `A`'s variables even when it is called from a sibling.
///
/// The stack also carries a depth limit. The interpreter refuses a call that
/// would grow the stack past it, so runaway recursion ends in an error
/// instead of exhausting the native stack.
///
/// # Example
/// ```
/// use pasci::interpreter::{
///     analyzer::symbol::ProcedureId,
///     evaluator::call_stack::{CallStack, Frame},
///     value::core::Value,
/// };
///
/// let mut stack = CallStack::new();
/// stack.push(Frame::program("main"));
/// stack.define("x", Value::Integer(1));
///
/// stack.push(Frame::procedure("inner", ProcedureId(0), 2));
/// assert_eq!(stack.lookup("x"), Some(Value::Integer(1)));
/// assert!(stack.assign("x", Value::Integer(2)));
/// stack.pop();
///
/// assert_eq!(stack.lookup("x"), Some(Value::Integer(2)));
/// stack.pop();
/// assert!(stack.is_balanced());
/// ```
#[derive(Debug)]
pub struct CallStack {
    frames:    Vec<Frame>,
    pushes:    usize,
    pops:      usize,
    max_depth: usize,
}

impl Default for CallStack {
    fn default() -> Self {
        Self::with_max_depth(MAX_CALL_DEPTH)
    }
}

impl CallStack {
    /// Creates an empty call stack limited to [`MAX_CALL_DEPTH`] frames.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty call stack limited to `max_depth` frames.
    #[must_use]
    pub const fn with_max_depth(max_depth: usize) -> Self {
        Self { frames: Vec::new(),
               pushes: 0,
               pops: 0,
               max_depth }
    }

    /// The most frames the interpreter will put on this stack.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Pushes a frame on top of the current one.
    ///
    /// The new frame's nesting level is one more than the current frame's.
    /// Its enclosing frame is derived from the current frame by following
    /// enclosing links down to the first frame of a lower static level,
    /// which is the activation of the scope that declares the pushed body.
    pub fn push(&mut self, mut frame: Frame) {
        if let Some(top) = self.frames.len().checked_sub(1) {
            frame.nesting_level = self.frames[top].nesting_level + 1;
            frame.enclosing = self.enclosing_for(top, frame.scope_level);
        }
        trace!("push frame\n{frame}");
        self.frames.push(frame);
        self.pushes += 1;
    }

    /// Pops the current frame.
    pub fn pop(&mut self) -> Option<Frame> {
        let frame = self.frames.pop()?;
        trace!("pop frame\n{frame}");
        self.pops += 1;
        Some(frame)
    }

    /// Pushes a frame and returns a guard that pops it when dropped.
    ///
    /// # Example
    /// ```
    /// use pasci::interpreter::evaluator::call_stack::{CallStack, Frame};
    ///
    /// let mut stack = CallStack::new();
    /// {
    ///     let frame = stack.enter(Frame::program("main"));
    ///     assert_eq!(frame.depth(), 1);
    /// }
    /// assert_eq!(stack.depth(), 0);
    /// assert!(stack.is_balanced());
    /// ```
    pub fn enter(&mut self, frame: Frame) -> FrameGuard<'_> {
        self.push(frame);
        FrameGuard { stack: self }
    }

    /// The current frame.
    #[must_use]
    pub fn peek(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Number of frames on the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Whether the stack holds no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Total number of pushes so far.
    #[must_use]
    pub const fn pushes(&self) -> usize {
        self.pushes
    }

    /// Total number of pops so far.
    #[must_use]
    pub const fn pops(&self) -> usize {
        self.pops
    }

    /// Whether every push has been matched by a pop.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.pushes == self.pops && self.frames.is_empty()
    }

    /// All frames, bottom first.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Binds `name` in the current frame.
    pub fn define(&mut self, name: &str, value: Value) {
        if let Some(frame) = self.frames.last_mut() {
            frame.set(name, value);
        }
    }

    /// Reads `name` from the current frame or its lexically enclosing frames.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.resolve(name).and_then(|index| self.frames[index].get(name))
    }

    /// Writes `name` in the nearest lexically enclosing frame that binds it.
    ///
    /// Returns `false` if no such frame exists.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        match self.resolve(name) {
            Some(index) => {
                self.frames[index].set(name, value);
                true
            },
            None => false,
        }
    }

    /// Index of the frame binding `name`, searching the current frame and then
    /// its enclosing chain.
    fn resolve(&self, name: &str) -> Option<usize> {
        let mut index = self.frames.len().checked_sub(1);
        while let Some(i) = index {
            let frame = &self.frames[i];
            if frame.members.contains_key(name) {
                return Some(i);
            }
            index = frame.enclosing;
        }
        None
    }

    fn enclosing_for(&self, from: usize, scope_level: usize) -> Option<usize> {
        let mut index = Some(from);
        while let Some(i) = index {
            let frame = &self.frames[i];
            if frame.scope_level < scope_level {
                return Some(i);
            }
            index = frame.enclosing;
        }
        None
    }
}

impl std::fmt::Display for CallStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CALL STACK")?;
        for frame in self.frames.iter().rev() {
            write!(f, "\n{frame}")?;
        }
        Ok(())
    }
}

/// Keeps a frame on the stack; pops it when dropped.
pub struct FrameGuard<'s> {
    stack: &'s mut CallStack,
}

impl Deref for FrameGuard<'_> {
    type Target = CallStack;

    fn deref(&self) -> &Self::Target {
        self.stack
    }
}

impl DerefMut for FrameGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.stack
    }
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        self.stack.pop();
    }
}
