use thiserror::Error;

use crate::{
    call::FrameId,
    expression::{Operator, SymType},
};

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Construction errors are raised while an expression is being built and mean the
/// translator produced an ill-typed or ill-formed node for the current path. They
/// are returned immediately and never recovered from inside this crate.
///
/// # Error Categories
///
/// ## Construction Errors
/// - [`Error::ArityMismatch`] - Wrong number of operands
/// - [`Error::TypeDomainViolation`] - Operand type outside the operator's input domain
/// - [`Error::TypeUnification`] - Operand types that cannot be made equal
/// - [`Error::UnknownOperatorSymbol`] - Operator lookup by an unknown symbol
/// - [`Error::MissingTypeHint`] - Result type required from the caller but not given
///
/// ## Context Errors
/// - [`Error::UnknownFrame`] - Frame handle not present in the arena
/// - [`Error::StackUnderflow`] - Pop from an empty operand stack
/// - [`Error::InvalidHeap`] - Non-heap expression installed as a frame heap
///
/// ## Traversal Errors
/// - [`Error::RecursionLimit`] - Maximum traversal depth exceeded
///
/// # Examples
///
/// ```rust
/// use symexpr::{Error, expression::{Expression, Operator, SymType}};
///
/// let flag = Expression::constant(true, SymType::Boolean);
/// match Expression::operation(Operator::Neg, vec![flag]) {
///     Err(Error::TypeDomainViolation { operator, index, found }) => {
///         assert_eq!(operator, Operator::Neg);
///         assert_eq!(index, 0);
///         assert_eq!(found, SymType::Boolean);
///     }
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Construction errors
    /// The number of operands does not match the operator's arity.
    ///
    /// # Fields
    ///
    /// * `operator` - Operator being constructed
    /// * `expected` - The operator's arity
    /// * `found` - Number of operands supplied
    #[error("Operator '{operator}' expects {expected} operands, found {found}")]
    ArityMismatch {
        /// Operator being constructed
        operator: Operator,
        /// The operator's arity
        expected: usize,
        /// Number of operands supplied
        found: usize,
    },

    /// An operand's type is not in the operator's input domain.
    ///
    /// Only the first offending operand is reported.
    #[error("Operand {index} of '{operator}' has type {found}, outside the operator's domain")]
    TypeDomainViolation {
        /// Operator being constructed
        operator: Operator,
        /// Position of the offending operand
        index: usize,
        /// Type of the offending operand
        found: SymType,
    },

    /// Two types that must agree are both concrete and differ.
    ///
    /// Also raised for heap operators whose heap operand is not `Heap` or whose
    /// address is neither `Reference` nor `Undef`, and for `ite` conditions that
    /// are neither `boolean` nor `Undef`.
    #[error("Cannot unify types for '{operator}': expected {expected}, found {found}")]
    TypeUnification {
        /// Operator being constructed
        operator: Operator,
        /// Type required by the operator or the sibling operand
        expected: SymType,
        /// Type actually carried by the operand
        found: SymType,
    },

    /// No operator has the given symbol.
    #[error("Unknown operator symbol - {0}")]
    UnknownOperatorSymbol(String),

    /// The operator's result type cannot be inferred and no hint was given.
    ///
    /// Heap loads always need a hint: the loaded value's type is not recoverable
    /// from the heap and address operands.
    #[error("Operator '{operator}' requires a result type hint")]
    MissingTypeHint {
        /// Operator being constructed
        operator: Operator,
    },

    // Context errors
    /// A frame handle does not belong to the arena it was used with.
    #[error("Frame not found - {0}")]
    UnknownFrame(FrameId),

    /// Popped an empty operand stack.
    #[error("Operand stack underflow")]
    StackUnderflow,

    /// An expression that is not of type `Heap` was installed as a frame heap.
    #[error("Expected a Heap expression, found {0}")]
    InvalidHeap(SymType),

    // Traversal errors
    /// Exceeded the maximum allowed traversal depth.
    ///
    /// Guards against stack overflow on degenerate trees and on frames whose
    /// stack holds a call resolved against that same frame.
    ///
    /// The associated value is the configured maximum depth.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),
}
