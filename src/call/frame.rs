//! Calling contexts.
//!
//! A [`Frame`] is the symbolic state of one activation: its operand stack, local
//! slots, the static fields it observes, and the symbolic heap with its size.
//! Frames live in a [`FrameArena`] and name their caller by [`FrameId`], so a
//! callee can look at its caller without owning it and caller/callee never form
//! an ownership cycle.
//!
//! # Heap Threading
//!
//! [`FrameArena::root`] starts a fresh symbolic heap (`heap: Heap`) and heap size
//! (`heap_size: int`). [`FrameArena::enter`] hands the caller's current heap and
//! heap size to the new callee frame.

use std::{collections::HashMap, fmt};

use crate::{
    call::function::FieldRef,
    expression::{Expression, SymType},
    Error, Result,
};

/// Handle of a frame inside a [`FrameArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(usize);

impl FrameId {
    /// Creates a frame handle from a raw arena index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame#{}", self.0)
    }
}

/// Symbolic state of a single activation.
#[derive(Debug, Clone)]
pub struct Frame {
    stack: Vec<Expression>,
    locals: Vec<Option<Expression>>,
    statics: HashMap<FieldRef, Expression>,
    heap: Expression,
    heap_size: Expression,
    previous: Option<FrameId>,
}

impl Frame {
    /// Creates an empty frame over the given heap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHeap`] if `heap` is not of type `Heap`.
    pub fn new(heap: Expression, heap_size: Expression, previous: Option<FrameId>) -> Result<Self> {
        if heap.ty() != SymType::Heap {
            return Err(Error::InvalidHeap(heap.ty()));
        }
        Ok(Self {
            stack: Vec::new(),
            locals: Vec::new(),
            statics: HashMap::new(),
            heap,
            heap_size,
            previous,
        })
    }

    /// Pushes a value onto the operand stack.
    pub fn push(&mut self, value: Expression) {
        self.stack.push(value);
    }

    /// Pops the top of the operand stack.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StackUnderflow`] if the stack is empty.
    pub fn pop(&mut self) -> Result<Expression> {
        self.stack.pop().ok_or(Error::StackUnderflow)
    }

    /// Returns the top of the operand stack.
    #[must_use]
    pub fn peek(&self) -> Option<&Expression> {
        self.stack.last()
    }

    /// Returns the operand stack, bottom first.
    #[must_use]
    pub fn stack(&self) -> &[Expression] {
        &self.stack
    }

    /// Returns up to `count` values from the top of the stack, topmost first.
    #[must_use]
    pub fn top(&self, count: usize) -> Vec<Expression> {
        self.stack.iter().rev().take(count).cloned().collect()
    }

    /// Stores `value` into local slot `index`, growing the slot array as needed.
    pub fn set_local(&mut self, index: usize, value: Expression) {
        if index >= self.locals.len() {
            self.locals.resize(index + 1, None);
        }
        self.locals[index] = Some(value);
    }

    /// Returns the value in local slot `index`, if the slot is populated.
    #[must_use]
    pub fn local(&self, index: usize) -> Option<&Expression> {
        self.locals.get(index).and_then(Option::as_ref)
    }

    /// Number of local slots allocated so far.
    #[must_use]
    pub fn local_count(&self) -> usize {
        self.locals.len()
    }

    /// Stores the symbolic value of a static field.
    pub fn set_static(&mut self, field: FieldRef, value: Expression) {
        self.statics.insert(field, value);
    }

    /// Returns the symbolic value of a static field, if known.
    #[must_use]
    pub fn static_value(&self, field: &FieldRef) -> Option<&Expression> {
        self.statics.get(field)
    }

    /// Returns the current symbolic heap.
    #[must_use]
    pub const fn heap(&self) -> &Expression {
        &self.heap
    }

    /// Replaces the symbolic heap, typically with the result of a `put`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHeap`] if `heap` is not of type `Heap`.
    pub fn set_heap(&mut self, heap: Expression) -> Result<()> {
        if heap.ty() != SymType::Heap {
            return Err(Error::InvalidHeap(heap.ty()));
        }
        self.heap = heap;
        Ok(())
    }

    /// Returns the symbolic heap size.
    #[must_use]
    pub const fn heap_size(&self) -> &Expression {
        &self.heap_size
    }

    /// Replaces the symbolic heap size.
    pub fn set_heap_size(&mut self, heap_size: Expression) {
        self.heap_size = heap_size;
    }

    /// Returns the caller's frame, if any.
    #[must_use]
    pub const fn previous(&self) -> Option<FrameId> {
        self.previous
    }
}

/// Owner of every frame created during one exploration.
///
/// # Examples
///
/// ```rust
/// use symexpr::call::FrameArena;
/// use symexpr::expression::{Expression, SymType};
///
/// let mut frames = FrameArena::new();
/// let caller = frames.root();
/// let callee = frames.enter(caller)?;
///
/// frames.get_mut(caller)?.push(Expression::constant(1, SymType::Int));
/// assert_eq!(frames.get(callee)?.previous(), Some(caller));
/// assert_eq!(frames.get(callee)?.heap(), frames.get(caller)?.heap());
/// # Ok::<(), symexpr::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FrameArena {
    frames: Vec<Frame>,
}

impl FrameArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a caller-less frame with a fresh symbolic heap.
    pub fn root(&mut self) -> FrameId {
        let frame = Frame {
            stack: Vec::new(),
            locals: Vec::new(),
            statics: HashMap::new(),
            heap: Expression::variable("heap", SymType::Heap),
            heap_size: Expression::variable("heap_size", SymType::Int),
            previous: None,
        };
        self.insert(frame)
    }

    /// Creates a callee frame of `caller`, inheriting its heap and heap size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFrame`] if `caller` is not in this arena.
    pub fn enter(&mut self, caller: FrameId) -> Result<FrameId> {
        let parent = self.get(caller)?;
        let frame = Frame::new(
            parent.heap().clone(),
            parent.heap_size().clone(),
            Some(caller),
        )?;
        Ok(self.insert(frame))
    }

    /// Adds an externally built frame.
    pub fn insert(&mut self, frame: Frame) -> FrameId {
        self.frames.push(frame);
        FrameId(self.frames.len() - 1)
    }

    /// Returns the frame behind `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFrame`] if `id` is not in this arena.
    pub fn get(&self, id: FrameId) -> Result<&Frame> {
        self.frames.get(id.0).ok_or(Error::UnknownFrame(id))
    }

    /// Returns the frame behind `id` for modification.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFrame`] if `id` is not in this arena.
    pub fn get_mut(&mut self, id: FrameId) -> Result<&mut Frame> {
        self.frames.get_mut(id.0).ok_or(Error::UnknownFrame(id))
    }

    /// Returns the caller of `id`, if it has one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFrame`] if `id` is not in this arena.
    pub fn caller(&self, id: FrameId) -> Result<Option<&Frame>> {
        match self.get(id)?.previous() {
            Some(previous) => self.get(previous).map(Some),
            None => Ok(None),
        }
    }

    /// Number of frames in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if no frame has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{empty_heap, int};

    #[test]
    fn test_stack_operations() -> Result<()> {
        let mut frames = FrameArena::new();
        let id = frames.root();
        let frame = frames.get_mut(id)?;

        frame.push(int(1));
        frame.push(int(2));
        frame.push(int(3));
        assert_eq!(frame.peek(), Some(&int(3)));
        assert_eq!(frame.top(2), vec![int(3), int(2)]);
        assert_eq!(frame.top(10).len(), 3);
        assert_eq!(frame.pop()?, int(3));
        assert_eq!(frame.stack(), &[int(1), int(2)]);

        frame.pop()?;
        frame.pop()?;
        assert!(matches!(frame.pop(), Err(Error::StackUnderflow)));
        Ok(())
    }

    #[test]
    fn test_locals_grow() -> Result<()> {
        let mut frames = FrameArena::new();
        let id = frames.root();
        let frame = frames.get_mut(id)?;

        frame.set_local(3, int(7));
        assert_eq!(frame.local_count(), 4);
        assert_eq!(frame.local(3), Some(&int(7)));
        assert_eq!(frame.local(1), None);
        assert_eq!(frame.local(99), None);
        Ok(())
    }

    #[test]
    fn test_statics() -> Result<()> {
        let mut frames = FrameArena::new();
        let id = frames.root();
        let field = FieldRef::new("com/acme/Counter", "hits");
        frames.get_mut(id)?.set_static(field.clone(), int(0));
        assert_eq!(frames.get(id)?.static_value(&field), Some(&int(0)));
        assert_eq!(
            frames
                .get(id)?
                .static_value(&FieldRef::new("com/acme/Counter", "misses")),
            None
        );
        Ok(())
    }

    #[test]
    fn test_heap_type_enforced() -> Result<()> {
        let mut frames = FrameArena::new();
        let id = frames.root();
        assert!(matches!(
            frames.get_mut(id)?.set_heap(int(0)),
            Err(Error::InvalidHeap(SymType::Int))
        ));
        frames.get_mut(id)?.set_heap(empty_heap())?;
        assert_eq!(frames.get(id)?.heap(), &empty_heap());

        assert!(matches!(
            Frame::new(int(0), int(0), None),
            Err(Error::InvalidHeap(SymType::Int))
        ));
        Ok(())
    }

    #[test]
    fn test_enter_links_caller() -> Result<()> {
        let mut frames = FrameArena::new();
        let caller = frames.root();
        frames.get_mut(caller)?.set_heap(empty_heap())?;
        let callee = frames.enter(caller)?;

        assert_eq!(frames.len(), 2);
        assert_eq!(frames.get(callee)?.previous(), Some(caller));
        assert_eq!(frames.get(callee)?.heap(), &empty_heap());
        assert!(frames.caller(callee)?.is_some());
        assert!(frames.caller(caller)?.is_none());

        assert!(matches!(
            frames.enter(FrameId::new(42)),
            Err(Error::UnknownFrame(_))
        ));
        Ok(())
    }
}
