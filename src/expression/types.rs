//! The type universe of symbolic expressions.
//!
//! Every [`Expression`](crate::expression::Expression) carries exactly one
//! [`SymType`]. The set is closed: JVM primitive types, three purely symbolic
//! marker types and the [`SymType::Undef`] wildcard. The tags double as the
//! type vocabulary shared with the solver backend, so their textual names are
//! fixed.
//!
//! # Type Categories
//!
//! - **Primitives**: `byte`, `char`, `short`, `int`, `long`, `float`, `double`, `boolean`
//! - **Symbolic markers**: `Reference`, `Heap`, `RuntimeType`
//! - **Wildcard**: `Undef`, only present while an operation is being built

use std::fmt;

use strum::{EnumCount, EnumIter};

/// Type tag of a symbolic expression.
///
/// # Examples
///
/// ```rust
/// use symexpr::expression::SymType;
///
/// assert!(SymType::Int.is_numeric());
/// assert!(SymType::Heap.is_symbolic());
/// assert_eq!(SymType::Reference.to_string(), "Reference");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCount)]
pub enum SymType {
    // ========== Primitives ==========
    /// Signed 8-bit integer.
    Byte,
    /// Unsigned 16-bit character.
    Char,
    /// Signed 32-bit integer.
    Int,
    /// Signed 16-bit integer.
    Short,
    /// Signed 64-bit integer.
    Long,
    /// 32-bit IEEE 754 float.
    Float,
    /// 64-bit IEEE 754 float.
    Double,
    /// Boolean truth value.
    Boolean,

    // ========== Symbolic Markers ==========
    /// Pointer-like value addressing the symbolic heap.
    Reference,
    /// The symbolic heap itself.
    Heap,
    /// Runtime type tag of an object.
    RuntimeType,

    // ========== Wildcard ==========
    /// Not yet known; unified away when a parent operation is built.
    Undef,
}

impl SymType {
    /// Returns `true` for the seven numeric primitives.
    ///
    /// `boolean` is not numeric.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Char | Self::Short | Self::Int | Self::Long | Self::Float | Self::Double
        )
    }

    /// Returns `true` for the integral numeric primitives.
    #[must_use]
    pub const fn is_integral(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Char | Self::Short | Self::Int | Self::Long
        )
    }

    /// Returns `true` for the floating point primitives.
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    /// Returns `true` for `Reference`, `Heap` and `RuntimeType`.
    #[must_use]
    pub const fn is_symbolic(self) -> bool {
        matches!(self, Self::Reference | Self::Heap | Self::RuntimeType)
    }

    /// Returns `true` for the [`SymType::Undef`] wildcard.
    #[must_use]
    pub const fn is_undef(self) -> bool {
        matches!(self, Self::Undef)
    }

    /// Returns the canonical textual name of this type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Int => "int",
            Self::Short => "short",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Reference => "Reference",
            Self::Heap => "Heap",
            Self::RuntimeType => "RuntimeType",
            Self::Undef => "Undef",
        }
    }
}

impl fmt::Display for SymType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The numeric primitives.
pub const NUMERIC: &[SymType] = &[
    SymType::Byte,
    SymType::Char,
    SymType::Short,
    SymType::Int,
    SymType::Long,
    SymType::Float,
    SymType::Double,
];

/// Every tag of the universe, `Undef` included.
pub const ALL: &[SymType] = &[
    SymType::Byte,
    SymType::Char,
    SymType::Int,
    SymType::Short,
    SymType::Long,
    SymType::Float,
    SymType::Double,
    SymType::Boolean,
    SymType::Reference,
    SymType::Heap,
    SymType::RuntimeType,
    SymType::Undef,
];

#[cfg(test)]
mod tests {
    use strum::{EnumCount, IntoEnumIterator};

    use super::*;

    #[test]
    fn test_universe_is_closed() {
        assert_eq!(SymType::COUNT, 12);
        assert_eq!(ALL.len(), SymType::COUNT);
        for ty in SymType::iter() {
            assert!(ALL.contains(&ty), "{ty} missing from ALL");
        }
    }

    #[test]
    fn test_categories() {
        assert!(SymType::Char.is_numeric());
        assert!(!SymType::Boolean.is_numeric());
        assert!(!SymType::Reference.is_numeric());
        assert!(SymType::Long.is_integral());
        assert!(!SymType::Double.is_integral());
        assert!(SymType::Float.is_float());
        assert!(SymType::RuntimeType.is_symbolic());
        assert!(!SymType::Undef.is_symbolic());
        assert!(SymType::Undef.is_undef());
        assert_eq!(
            SymType::iter().filter(|ty| ty.is_numeric()).count(),
            NUMERIC.len()
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(SymType::Int.to_string(), "int");
        assert_eq!(SymType::Boolean.to_string(), "boolean");
        assert_eq!(SymType::Heap.to_string(), "Heap");
        assert_eq!(SymType::RuntimeType.to_string(), "RuntimeType");
        assert_eq!(SymType::Undef.to_string(), "Undef");
    }
}
