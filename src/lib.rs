// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # symexpr
//!
//! The typed expression core of a bytecode symbolic-execution engine.
//!
//! A translator walking JVM-style bytecode along one execution path describes
//! every computed value as an [`expression::Expression`]: constants, named
//! symbolic variables, operations over them, reads and writes of a symbolic
//! heap, and calls into other functions. Each node carries a type from a small
//! closed universe, and every operation is validated and typed the moment it
//! is built, so an ill-typed path is rejected before it ever reaches a solver.
//!
//! ## Features
//!
//! - **Closed type universe** - Primitive, reference, heap and runtime types, plus `Undef` for not-yet-known types
//! - **Validated construction** - Arity, input domain and type unification checked per operator
//! - **Lazy calls** - Call parameters resolved against the calling frame only when needed
//! - **Thread-safe sharing** - Immutable `Arc` nodes, atomic statistics, concurrent leaf interning
//! - **Parallel resolution** - Batch materialization of many paths with `rayon`
//!
//! ## Quick Start
//!
//! ```rust
//! use symexpr::prelude::*;
//!
//! let builder = ExpressionBuilder::new();
//!
//! let x = builder.variable("x", SymType::Undef);
//! let bound = builder.constant(10, SymType::Int);
//! let check = builder.operation(Operator::Less, vec![x, bound])?;
//!
//! assert_eq!(check.ty(), SymType::Boolean);
//! assert_eq!(check.children()[0].ty(), SymType::Int);
//! assert_eq!(check.to_string(), "(< x 10)");
//! # Ok::<(), symexpr::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`expression`] - Types, operators, leaves, operations and the [`expression::ExpressionBuilder`]
//! - [`call`] - Frames, call targets, lazy and processed calls
//! - [`visitor`] - Post-order traversal and call materialization
//! - [`config`] - Construction and resolution settings
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`Result`]. Construction errors signal a
//! defect in the translator for the path at hand and are never recovered from
//! inside this crate.

pub(crate) mod error;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use symexpr::prelude::*;
///
/// let heap = Expression::variable("heap", SymType::Heap);
/// let addr = Expression::constant(ConstValue::Address(0x10), SymType::Reference);
/// let load = Expression::operation_with_hint(Operator::Get, vec![heap, addr], SymType::Long)?;
/// assert_eq!(load.ty(), SymType::Long);
/// # Ok::<(), symexpr::Error>(())
/// ```
pub mod prelude;

pub mod call;
pub mod config;
pub mod expression;
pub mod visitor;

pub use error::Error;

/// The generic `Result` type of this crate.
pub type Result<T> = std::result::Result<T, Error>;
