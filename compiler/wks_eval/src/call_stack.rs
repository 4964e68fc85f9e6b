//! Bounded call stack.
//!
//! Frames are immutable and linked to their caller, so pushing is O(1) and
//! a callee's stack shares every frame with its caller's. The stack only
//! records names for depth accounting; it never holds values.

use std::rc::Rc;

use crate::errors::{recursion_limit_exceeded, EvalResult};

/// Default maximum depth, counted in frames from the module root.
pub const DEFAULT_MAX_DEPTH: usize = 500;

#[derive(Debug)]
struct CallFrame {
    name: String,
    parent: Option<Rc<CallFrame>>,
    depth: usize,
}

/// Handle to the top frame of a call stack.
#[derive(Clone, Debug)]
pub struct CallStack {
    top: Rc<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    /// A stack holding just the module frame.
    pub fn root(name: impl Into<String>, max_depth: usize) -> Self {
        CallStack {
            top: Rc::new(CallFrame {
                name: name.into(),
                parent: None,
                depth: 1,
            }),
            max_depth,
        }
    }

    /// A new stack with `name` on top of `self`.
    ///
    /// Fails with `OverflowError` when the new depth would exceed the limit;
    /// `self` is left untouched either way.
    pub fn push(&self, name: impl Into<String>) -> EvalResult<CallStack> {
        let depth = self.top.depth + 1;
        if depth > self.max_depth {
            return Err(recursion_limit_exceeded(self.max_depth));
        }
        Ok(CallStack {
            top: Rc::new(CallFrame {
                name: name.into(),
                parent: Some(Rc::clone(&self.top)),
                depth,
            }),
            max_depth: self.max_depth,
        })
    }

    /// Number of frames down to the root.
    #[inline]
    pub fn len(&self) -> usize {
        self.top.depth
    }

    /// Always `false`: a stack has at least its root frame.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn name(&self) -> &str {
        &self.top.name
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Frame names, innermost first.
    pub fn names(&self) -> Vec<&str> {
        let mut names = Vec::with_capacity(self.len());
        let mut frame = Some(&self.top);
        while let Some(current) = frame {
            names.push(current.name.as_str());
            frame = current.parent.as_ref();
        }
        names
    }
}
