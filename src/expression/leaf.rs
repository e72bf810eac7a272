//! Leaf expressions: constants and variables.
//!
//! Leaves never resolve anything and have no children. They are immutable once
//! created; narrowing an `Undef` leaf to a concrete type produces a new leaf via
//! [`Constant::with_type`] or [`Variable::with_type`].

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use crate::expression::{types::SymType, value::ConstValue};

/// A typed literal.
///
/// Equality and hashing cover both the value and the type, so `5: int` and
/// `5: long` are different constants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constant {
    value: ConstValue,
    ty: SymType,
}

impl Constant {
    /// Creates a new constant.
    #[must_use]
    pub fn new(value: impl Into<ConstValue>, ty: SymType) -> Self {
        Self {
            value: value.into(),
            ty,
        }
    }

    /// Returns the literal payload.
    #[must_use]
    pub const fn value(&self) -> &ConstValue {
        &self.value
    }

    /// Returns the type of this constant.
    #[must_use]
    pub const fn ty(&self) -> SymType {
        self.ty
    }

    /// Returns a copy of this constant carrying `ty`.
    #[must_use]
    pub fn with_type(&self, ty: SymType) -> Self {
        Self {
            value: self.value.clone(),
            ty,
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A named symbolic value.
///
/// Variables live in one namespace shared by every explored function, so names
/// produced for function-local values are prefixed with the owning function's
/// short name (see [`Variable::scoped`]).
///
/// Equality and hashing use the name only: two variables with the same name
/// but different types compare equal.
#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    ty: SymType,
}

impl Variable {
    /// Creates a new variable.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: SymType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Creates a variable namespaced by an owning function's short name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use symexpr::expression::{SymType, Variable};
    ///
    /// let v = Variable::scoped("f3", "x", SymType::Int);
    /// assert_eq!(v.name(), "f3_x");
    /// ```
    #[must_use]
    pub fn scoped(owner: &str, name: &str, ty: SymType) -> Self {
        Self::new(format!("{owner}_{name}"), ty)
    }

    /// Returns the variable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the type of this variable.
    #[must_use]
    pub const fn ty(&self) -> SymType {
        self.ty
    }

    /// Returns a copy of this variable carrying `ty`.
    #[must_use]
    pub fn with_type(&self, ty: SymType) -> Self {
        Self {
            name: self.name.clone(),
            ty,
        }
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
