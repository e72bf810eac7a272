//! Expression shorthands for unit tests.

use crate::expression::{ConstValue, Expression, SymType};

/// `int` constant.
pub fn int(value: i64) -> Expression {
    Expression::constant(value, SymType::Int)
}

/// `long` constant.
pub fn long(value: i64) -> Expression {
    Expression::constant(value, SymType::Long)
}

/// `boolean` constant.
pub fn boolean(value: bool) -> Expression {
    Expression::constant(value, SymType::Boolean)
}

/// Concrete reference to `address`.
pub fn reference(address: u64) -> Expression {
    Expression::constant(ConstValue::Address(address), SymType::Reference)
}

/// Empty heap literal.
pub fn empty_heap() -> Expression {
    Expression::constant(ConstValue::empty_heap(), SymType::Heap)
}

/// Variable whose type is not yet known.
pub fn undef(name: &str) -> Expression {
    Expression::variable(name, SymType::Undef)
}
