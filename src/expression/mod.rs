//! Typed symbolic expressions.
//!
//! This module holds the value side of the representation: the closed type
//! universe, the operator catalogue, leaves, validated operations and the
//! [`Expression`] sum type tying them together with the call nodes from
//! [`crate::call`].
//!
//! # Architecture
//!
//! - `types` - The type universe ([`SymType`])
//! - `ops` - The operator catalogue ([`Operator`])
//! - `value` - Literal payloads ([`ConstValue`])
//! - `leaf` - [`Constant`] and [`Variable`]
//! - `operation` - [`OperationExpression`] and its type inference
//! - `expr` - The [`Expression`] sum type and tree queries
//! - `builder` - [`ExpressionBuilder`], counting and interning construction
//! - `stats` - [`BuildStats`] counters
//!
//! # Construction
//!
//! Expressions are built bottom-up. Leaves may carry [`SymType::Undef`] until a
//! parent operation constrains them; the parent then stores narrowed copies of
//! those leaves and the originals stay untouched.
//!
//! ```rust
//! use symexpr::expression::{ConstValue, Expression, Operator, SymType};
//!
//! let heap = Expression::constant(ConstValue::empty_heap(), SymType::Heap);
//! let addr = Expression::variable("x", SymType::Undef);
//! let value = Expression::constant(5, SymType::Int);
//!
//! let store = Expression::operation(Operator::Put, vec![heap, addr.clone(), value])?;
//! assert_eq!(store.ty(), SymType::Heap);
//! assert_eq!(store.children()[1].ty(), SymType::Reference);
//! assert_eq!(addr.ty(), SymType::Undef);
//! # Ok::<(), symexpr::Error>(())
//! ```

mod builder;
mod expr;
mod leaf;
mod operation;
mod ops;
mod stats;
mod types;
mod value;

pub use builder::ExpressionBuilder;
pub use expr::Expression;
pub use leaf::{Constant, Variable};
pub use operation::OperationExpression;
pub use ops::Operator;
pub use stats::BuildStats;
pub use types::{SymType, ALL, NUMERIC};
pub use value::ConstValue;
