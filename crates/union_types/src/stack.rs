use smallvec::SmallVec;

use crate::value::Value;

/// How a frame's callable was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallKind {
    #[default]
    Function,
    /// Instance method call, marker `->`.
    Method,
    /// Static method call, marker `::`.
    StaticMethod,
}

impl CallKind {
    pub fn marker(&self) -> &'static str {
        match self {
            CallKind::Function => "",
            CallKind::Method => "->",
            CallKind::StaticMethod => "::",
        }
    }
}

/// One pending invocation: where the callable was called from, its identity,
/// and the positional argument values that were explicitly passed.
///
/// Frames are built by the instrumentation site (a runtime integration or a
/// test fixture), not captured magically; `args` holds only the values the
/// caller actually passed, so a trailing optional parameter that was omitted
/// is simply absent.
#[derive(Debug, Clone)]
pub struct StackFrame {
    pub file: String,
    pub line: u32,
    pub function: String,
    pub class: Option<String>,
    pub call_kind: CallKind,
    pub args: Vec<Value>,
}

impl StackFrame {
    pub fn new(file: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
        StackFrame {
            file: file.into(),
            line,
            function: function.into(),
            class: None,
            call_kind: CallKind::Function,
            args: Vec::new(),
        }
    }

    /// Mark the callable as owned by `class`. Defaults the call marker to
    /// `::`; override with [`StackFrame::via`] for instance calls.
    pub fn in_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        if self.call_kind == CallKind::Function {
            self.call_kind = CallKind::StaticMethod;
        }
        self
    }

    pub fn via(mut self, kind: CallKind) -> Self {
        self.call_kind = kind;
        self
    }

    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }
}

/// An explicit call-context snapshot.
///
/// Exactly two frames matter to the engine: frame 0 is the engine's own entry
/// record (the site of the assertion call) and frame 1 the immediate caller
/// whose argument is being checked. The stack is passed explicitly so the
/// index arithmetic never silently shifts under an adapter frame.
#[derive(Debug, Clone, Default)]
pub struct CallStack {
    frames: SmallVec<[StackFrame; 2]>,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chaining builder: append a frame and return the stack.
    pub fn with(mut self, frame: StackFrame) -> Self {
        self.frames.push(frame);
        self
    }

    pub fn push(&mut self, frame: StackFrame) {
        self.frames.push(frame);
    }

    pub fn frame(&self, index: usize) -> Option<&StackFrame> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
