//! Calls and calling contexts.
//!
//! The translator models every invoke and return as a call node whose
//! parameters depend on the frame the call was made from. This module holds
//! the pieces of that model:
//!
//! - [`FrameArena`], [`Frame`], [`FrameId`] - Calling contexts with stack, locals, statics and heap
//! - [`Function`] - What is known about a call target
//! - [`FunctionCall`] - A call with lazily computed parameters
//! - [`ProcessedFunctionCall`] - A call with a fixed parameter list
//!
//! # Lifecycle
//!
//! A [`FunctionCall`] is created when the call instruction is translated. While
//! the path is explored further the calling frame keeps changing, and
//! [`FunctionCall::parameters`] always reflects its current state. Once the
//! path is complete, [`Resolver`](crate::visitor::Resolver) rewrites each call
//! into a [`ProcessedFunctionCall`].
//!
//! ```rust
//! use std::sync::Arc;
//! use symexpr::call::{FrameArena, Function, FunctionCall};
//! use symexpr::expression::{Expression, SymType};
//!
//! let mut frames = FrameArena::new();
//! let frame = frames.root();
//! frames.get_mut(frame)?.push(Expression::constant(2, SymType::Int));
//!
//! let target = Arc::new(Function::builder("sqr").returns(SymType::Int).stack_params(1).build());
//! let call = FunctionCall::plain(target, frame);
//!
//! let processed = call.materialize(&frames)?;
//! assert_eq!(processed.to_string(), "(sqr 2 heap heap_size)");
//! # Ok::<(), symexpr::Error>(())
//! ```

mod frame;
mod function;
mod function_call;
mod processed;

pub use frame::{Frame, FrameArena, FrameId};
pub use function::{FieldRef, Function, FunctionBuilder, LocalSlot};
pub use function_call::{CallKind, FunctionCall};
pub use processed::ProcessedFunctionCall;
