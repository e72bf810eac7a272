//! Literal payloads of constant expressions.
//!
//! [`ConstValue`] is the untyped half of a [`Constant`](crate::expression::Constant):
//! the same literal `5` may be paired with `int` or `long`, and the two constants
//! are distinct. Floating point literals compare and hash by their bit pattern so
//! that constants can be used as keys in interning caches.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use crate::expression::Expression;

/// A literal value carried by a constant expression.
#[derive(Debug, Clone)]
pub enum ConstValue {
    /// An integral literal, interpreted according to the constant's type.
    Integer(i64),
    /// A floating point literal.
    Float(f64),
    /// A boolean literal.
    Boolean(bool),
    /// A concrete address into the symbolic heap.
    Address(u64),
    /// The null reference.
    Null,
    /// A runtime type literal, e.g. `java/lang/String`.
    TypeName(String),
    /// A symbolic heap given as the ordered sequence of its cells.
    Heap(Vec<Expression>),
}

impl ConstValue {
    /// Creates an empty heap literal.
    #[must_use]
    pub const fn empty_heap() -> Self {
        Self::Heap(Vec::new())
    }

    /// Returns the integral payload, if any.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the boolean payload, if any.
    #[must_use]
    pub const fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the heap cells, if this is a heap literal.
    #[must_use]
    pub fn as_heap(&self) -> Option<&[Expression]> {
        match self {
            Self::Heap(cells) => Some(cells),
            _ => None,
        }
    }
}

impl PartialEq for ConstValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Address(a), Self::Address(b)) => a == b,
            (Self::Null, Self::Null) => true,
            (Self::TypeName(a), Self::TypeName(b)) => a == b,
            (Self::Heap(a), Self::Heap(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ConstValue {}

impl Hash for ConstValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Integer(v) => v.hash(state),
            Self::Float(v) => v.to_bits().hash(state),
            Self::Boolean(v) => v.hash(state),
            Self::Address(v) => v.hash(state),
            Self::Null => {}
            Self::TypeName(name) => name.hash(state),
            Self::Heap(cells) => cells.hash(state),
        }
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Address(v) => write!(f, "@{v:#x}"),
            Self::Null => f.write_str("null"),
            Self::TypeName(name) => f.write_str(name),
            Self::Heap(cells) => {
                f.write_str("[")?;
                for (i, cell) in cells.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{cell}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<i64> for ConstValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ConstValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for ConstValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ConstValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}
