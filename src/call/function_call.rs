//! Unresolved calls.
//!
//! A [`FunctionCall`] records a call site without fixing its arguments. The
//! parameter list is computed from the calling frame only when asked for,
//! which lets the translator emit the call before the caller's stack, locals
//! and heap have reached the state the callee will observe.
//!
//! # Parameter Order
//!
//! [`FunctionCall::parameters`] always yields, in this order:
//!
//! 1. Stack parameters, topmost first.
//! 2. Local parameters, ordered by slot.
//! 3. Static parameters, ordered by field.
//! 4. The heap, then the heap size.
//!
//! Invocations and returns only change how steps 2 and 1 respectively pick
//! their values.

use std::{fmt, sync::Arc};

use crate::{
    call::{
        frame::{Frame, FrameArena, FrameId},
        function::Function,
        processed::ProcessedFunctionCall,
    },
    expression::{Expression, SymType},
    Result,
};

/// Calling-convention role of a [`FunctionCall`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// Every parameter comes from the calling frame or the target's defaults.
    Plain,
    /// A method invocation with explicit arguments, indexed by local slot.
    Invocation {
        /// Caller-supplied arguments. Slot `i` of the callee reads `arguments[i]`.
        arguments: Vec<Expression>,
    },
    /// A return to the caller, optionally carrying the returned value.
    ///
    /// A returned value is always appended, even if the target declares no
    /// stack parameters, so the list can be one longer than
    /// [`Function::parameter_count`].
    Return {
        /// Returned value, appended after the mirrored stack entries.
        value: Option<Expression>,
    },
}

/// A call whose parameters are resolved lazily against a frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionCall {
    target: Arc<Function>,
    frame: FrameId,
    kind: CallKind,
    ty: SymType,
}

impl FunctionCall {
    /// Creates a plain call of `target` from `frame`.
    #[must_use]
    pub fn plain(target: Arc<Function>, frame: FrameId) -> Self {
        Self::with_kind(target, frame, CallKind::Plain)
    }

    /// Creates an invocation of `target` from `frame` with explicit arguments.
    #[must_use]
    pub fn invocation(target: Arc<Function>, frame: FrameId, arguments: Vec<Expression>) -> Self {
        Self::with_kind(target, frame, CallKind::Invocation { arguments })
    }

    /// Creates a return through `target` from `frame`.
    #[must_use]
    pub fn returning(target: Arc<Function>, frame: FrameId, value: Option<Expression>) -> Self {
        Self::with_kind(target, frame, CallKind::Return { value })
    }

    fn with_kind(target: Arc<Function>, frame: FrameId, kind: CallKind) -> Self {
        let ty = target.return_type();
        Self {
            target,
            frame,
            kind,
            ty,
        }
    }

    /// The called function.
    #[must_use]
    pub fn target(&self) -> &Arc<Function> {
        &self.target
    }

    /// The frame the parameters are read from.
    #[must_use]
    pub const fn frame(&self) -> FrameId {
        self.frame
    }

    /// The calling-convention role.
    #[must_use]
    pub const fn kind(&self) -> &CallKind {
        &self.kind
    }

    /// Type of the call's result.
    #[must_use]
    pub const fn ty(&self) -> SymType {
        self.ty
    }

    /// Returns a copy of this call with a different result type.
    #[must_use]
    pub fn with_type(&self, ty: SymType) -> Self {
        Self {
            ty,
            ..self.clone()
        }
    }

    /// Computes the parameter list against the current state of the calling frame.
    ///
    /// # Arguments
    ///
    /// * `frames` - Arena holding the calling frame
    ///
    /// # Returns
    ///
    /// Stack, local and static parameters followed by the heap and heap size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFrame`](crate::Error::UnknownFrame) if the calling
    /// frame is not in `frames`.
    pub fn parameters(&self, frames: &FrameArena) -> Result<Vec<Expression>> {
        let context = frames.get(self.frame)?;
        let returned = matches!(self.kind, CallKind::Return { value: Some(_) });
        let mut parameters =
            Vec::with_capacity(self.target.parameter_count() + usize::from(returned));

        self.stack_parameters(context, &mut parameters);
        self.local_parameters(context, &mut parameters);
        for (field, default) in self.target.static_params() {
            let value = context.static_value(field).unwrap_or(default);
            parameters.push(value.clone());
        }
        parameters.push(context.heap().clone());
        parameters.push(context.heap_size().clone());

        Ok(parameters)
    }

    fn stack_parameters(&self, context: &Frame, parameters: &mut Vec<Expression>) {
        let count = self.target.stack_param_count();
        match &self.kind {
            CallKind::Return { value: Some(value) } => {
                parameters.extend(context.top(count.saturating_sub(1)));
                parameters.push(value.clone());
            }
            _ => parameters.extend(context.top(count)),
        }
    }

    fn local_parameters(&self, context: &Frame, parameters: &mut Vec<Expression>) {
        let arguments = match &self.kind {
            CallKind::Invocation { arguments } => arguments.as_slice(),
            _ => &[],
        };

        for (slot, default) in self.target.local_params() {
            let value = match arguments.get(slot.index) {
                Some(argument) => argument,
                None if context.previous() == Some(slot.frame) => {
                    context.local(slot.index).unwrap_or(default)
                }
                None => default,
            };
            parameters.push(value.clone());
        }
    }

    /// Fixes the parameter list, producing the resolved form of this call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFrame`](crate::Error::UnknownFrame) if the calling
    /// frame is not in `frames`.
    pub fn materialize(&self, frames: &FrameArena) -> Result<ProcessedFunctionCall> {
        let parameters = self.parameters(frames)?;
        log::debug!(
            "materialized call to {} with {} parameters",
            self.target.name(),
            parameters.len()
        );
        Ok(ProcessedFunctionCall::new(
            Arc::clone(&self.target),
            parameters,
            self.ty,
        ))
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(call {})", self.target.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        call::function::FieldRef,
        test::{empty_heap, int},
        Error,
    };

    fn callee_frame() -> Result<(FrameArena, FrameId, FrameId)> {
        let mut frames = FrameArena::new();
        let caller = frames.root();
        let callee = frames.enter(caller)?;
        Ok((frames, caller, callee))
    }

    #[test]
    fn test_stack_parameters_topmost_first() -> Result<()> {
        let (mut frames, _, callee) = callee_frame()?;
        for value in 1..=4 {
            frames.get_mut(callee)?.push(int(value));
        }

        let target = Arc::new(Function::builder("f").stack_params(2).build());
        let params = FunctionCall::plain(Arc::clone(&target), callee).parameters(&frames)?;
        assert_eq!(params.len(), 4);
        assert_eq!(params[0], int(4));
        assert_eq!(params[1], int(3));

        let greedy = Arc::new(Function::builder("g").stack_params(10).build());
        let params = FunctionCall::plain(greedy, callee).parameters(&frames)?;
        assert_eq!(params.len(), 6);
        Ok(())
    }

    #[test]
    fn test_local_parameters_from_previous_frame() -> Result<()> {
        let (mut frames, caller, callee) = callee_frame()?;
        frames.get_mut(callee)?.set_local(0, int(100));

        let target = Arc::new(
            Function::builder("f")
                .local_param(0, caller, int(-1))
                .local_param(1, caller, int(-2))
                .local_param(0, callee, int(-3))
                .build(),
        );
        let params = FunctionCall::plain(target, callee).parameters(&frames)?;

        // ordered by (index, frame)
        assert_eq!(params[0], int(100));
        assert_eq!(params[1], int(-3));
        assert_eq!(params[2], int(-2));
        Ok(())
    }

    #[test]
    fn test_static_parameters_fallback() -> Result<()> {
        let (mut frames, _, callee) = callee_frame()?;
        let seen = FieldRef::new("A", "seen");
        let unseen = FieldRef::new("A", "unseen");
        frames.get_mut(callee)?.set_static(seen.clone(), int(7));

        let target = Arc::new(
            Function::builder("f")
                .static_param(seen, int(0))
                .static_param(unseen, int(1))
                .build(),
        );
        let params = FunctionCall::plain(target, callee).parameters(&frames)?;
        assert_eq!(params[0], int(7));
        assert_eq!(params[1], int(1));
        Ok(())
    }

    #[test]
    fn test_heap_appended_last() -> Result<()> {
        let (mut frames, _, callee) = callee_frame()?;
        frames.get_mut(callee)?.set_heap(empty_heap())?;
        frames.get_mut(callee)?.set_heap_size(int(3));
        frames.get_mut(callee)?.push(int(9));

        let target = Arc::new(Function::builder("f").stack_params(1).build());
        let params = FunctionCall::plain(target, callee).parameters(&frames)?;
        assert_eq!(params, vec![int(9), empty_heap(), int(3)]);
        Ok(())
    }

    #[test]
    fn test_invocation_arguments_override_locals() -> Result<()> {
        let (mut frames, caller, callee) = callee_frame()?;
        frames.get_mut(callee)?.set_local(0, int(100));
        frames.get_mut(callee)?.set_local(2, int(102));

        let target = Arc::new(
            Function::builder("f")
                .local_param(0, caller, int(-1))
                .local_param(2, caller, int(-3))
                .build(),
        );
        let call = FunctionCall::invocation(target, callee, vec![int(50), int(51)]);
        let params = call.parameters(&frames)?;
        assert_eq!(params[0], int(50));
        assert_eq!(params[1], int(102));
        Ok(())
    }

    #[test]
    fn test_return_appends_value() -> Result<()> {
        let (mut frames, _, callee) = callee_frame()?;
        for value in 1..=3 {
            frames.get_mut(callee)?.push(int(value));
        }
        let target = Arc::new(Function::builder("f").stack_params(3).build());

        let with_value = FunctionCall::returning(Arc::clone(&target), callee, Some(int(42)));
        let params = with_value.parameters(&frames)?;
        assert_eq!(&params[..3], &[int(3), int(2), int(42)]);

        let without_value = FunctionCall::returning(target, callee, None);
        let params = without_value.parameters(&frames)?;
        assert_eq!(&params[..3], &[int(3), int(2), int(1)]);
        Ok(())
    }

    #[test]
    fn test_return_value_without_stack_params() -> Result<()> {
        let (mut frames, _, callee) = callee_frame()?;
        frames.get_mut(callee)?.push(int(5));
        let target = Arc::new(Function::builder("f").build());

        let with_value = FunctionCall::returning(Arc::clone(&target), callee, Some(int(42)));
        let params = with_value.parameters(&frames)?;
        assert_eq!(params.len(), target.parameter_count() + 1);
        assert_eq!(params[0], int(42));

        let without_value = FunctionCall::returning(Arc::clone(&target), callee, None);
        assert_eq!(
            without_value.parameters(&frames)?.len(),
            target.parameter_count()
        );
        Ok(())
    }

    #[test]
    fn test_materialized_parameters_may_hold_calls() -> Result<()> {
        let (mut frames, _, callee) = callee_frame()?;
        let inner = Arc::new(Function::builder("inner").returns(SymType::Int).build());
        frames
            .get_mut(callee)?
            .push(Expression::from(FunctionCall::plain(inner, callee)));

        let outer = Arc::new(Function::builder("outer").stack_params(1).build());
        let processed = Expression::from(FunctionCall::plain(outer, callee).materialize(&frames)?);

        assert_eq!(
            processed.to_string(),
            "(outer (call inner) heap heap_size)"
        );
        assert!(processed.function_calls().is_empty());
        assert!(!processed.is_resolved());
        Ok(())
    }

    #[test]
    fn test_parameters_are_lazy() -> Result<()> {
        let (mut frames, _, callee) = callee_frame()?;
        let target = Arc::new(Function::builder("f").stack_params(1).build());
        let call = FunctionCall::plain(target, callee);

        frames.get_mut(callee)?.push(int(1));
        assert_eq!(call.parameters(&frames)?[0], int(1));
        frames.get_mut(callee)?.push(int(2));
        assert_eq!(call.parameters(&frames)?[0], int(2));
        Ok(())
    }

    #[test]
    fn test_materialize() -> Result<()> {
        let (frames, _, callee) = callee_frame()?;
        let target = Arc::new(Function::builder("f").returns(SymType::Long).build());
        let call = FunctionCall::plain(target, callee);
        let processed = call.materialize(&frames)?;

        assert_eq!(processed.ty(), SymType::Long);
        assert_eq!(processed.parameters(), call.parameters(&frames)?.as_slice());
        assert_eq!(call.to_string(), "(call f)");
        Ok(())
    }

    #[test]
    fn test_unknown_frame() {
        let frames = FrameArena::new();
        let target = Arc::new(Function::builder("f").build());
        let call = FunctionCall::plain(target, FrameId::new(3));
        assert!(matches!(
            call.parameters(&frames),
            Err(Error::UnknownFrame(_))
        ));
    }

    #[test]
    fn test_with_type() {
        let target = Arc::new(Function::builder("f").returns(SymType::Int).build());
        let call = FunctionCall::plain(target, FrameId::new(0));
        let retyped = call.with_type(SymType::Reference);
        assert_eq!(call.ty(), SymType::Int);
        assert_eq!(retyped.ty(), SymType::Reference);
    }
}
