//! # symexpr Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the symexpr library. Import this module to get quick access to everything needed
//! to build, type and resolve expressions.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all symexpr operations
pub use crate::Error;

/// The result type used throughout symexpr
pub use crate::Result;

/// Construction and resolution settings
pub use crate::config::ExpressionConfig;

// ================================================================================================
// Expressions
// ================================================================================================

/// The expression sum type and its node types
pub use crate::expression::{Constant, Expression, OperationExpression, Variable};

/// Types, operators and literal values
pub use crate::expression::{ConstValue, Operator, SymType};

/// Counting, interning construction
pub use crate::expression::{BuildStats, ExpressionBuilder};

// ================================================================================================
// Calls and Frames
// ================================================================================================

/// Calling contexts
pub use crate::call::{FieldRef, Frame, FrameArena, FrameId, LocalSlot};

/// Call targets and call nodes
pub use crate::call::{CallKind, Function, FunctionCall, ProcessedFunctionCall};

// ================================================================================================
// Traversal
// ================================================================================================

/// Post-order traversal and materialization
pub use crate::visitor::{ExpressionVisitor, Resolver};
