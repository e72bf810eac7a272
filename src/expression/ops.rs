//! The operator catalogue.
//!
//! This module defines [`Operator`], the fixed set of operations that can appear
//! in an [`OperationExpression`](crate::expression::OperationExpression). Each
//! operator carries a display symbol, a fixed arity, an ordered input type
//! domain and an output type domain.
//!
//! The symbols are the textual form handed to solver backends, so the table is
//! a stable contract: symbols, arities and domains must not drift.
//!
//! Operators are categorized as:
//! - **Arithmetic**: `+ - * / rem`, plus `neg`
//! - **Comparison**: `> >= < <= = !=`, plus the three-way `cmp`
//! - **Bitwise**: `bvor bvand bvxor bvshl bvshr`
//! - **Boolean**: `not and or`
//! - **Conversion**: `toByte toChar toShort toInt toLong toFloat toDouble toBoolean`
//! - **Control**: `ite`
//! - **Heap**: `put get`

use std::{fmt, str::FromStr};

use strum::{EnumCount, EnumIter, IntoEnumIterator};

use crate::{
    expression::types::{SymType, ALL, NUMERIC},
    Error, Result,
};

use crate::expression::types::SymType::{
    Boolean, Byte, Char, Double, Float, Heap, Int, Long, Reference, Short, Undef,
};

const ARITHMETIC: &[SymType] = &[Byte, Char, Short, Int, Long, Float, Double, Reference, Undef];
const ORDERED: &[SymType] = &[Byte, Char, Short, Int, Long, Float, Double, Undef];
const SHIFTABLE: &[SymType] = &[Int, Long, Undef];
const BOOLEAN: &[SymType] = &[Boolean];
const INT: &[SymType] = &[Int];
const HEAP: &[SymType] = &[Heap];

const FROM_NOT_BYTE: &[SymType] = &[Char, Short, Int, Long, Float, Double];
const FROM_NOT_CHAR: &[SymType] = &[Byte, Short, Int, Long, Float, Double];
const FROM_NOT_SHORT: &[SymType] = &[Byte, Char, Int, Long, Float, Double];
const FROM_NOT_INT: &[SymType] = &[Byte, Char, Short, Long, Float, Double];
const FROM_NOT_LONG: &[SymType] = &[Byte, Char, Short, Int, Float, Double];
const FROM_NOT_FLOAT: &[SymType] = &[Byte, Char, Short, Int, Long, Double];
const FROM_NOT_DOUBLE: &[SymType] = &[Byte, Char, Short, Int, Long, Float];

const TO_BYTE: &[SymType] = &[Byte];
const TO_CHAR: &[SymType] = &[Char];
const TO_SHORT: &[SymType] = &[Short];
const TO_LONG: &[SymType] = &[Long];
const TO_FLOAT: &[SymType] = &[Float];
const TO_DOUBLE: &[SymType] = &[Double];

/// An operation of the symbolic expression language.
///
/// # Examples
///
/// ```rust
/// use symexpr::expression::{Operator, SymType};
///
/// let op = Operator::from_symbol("bvxor")?;
/// assert_eq!(op, Operator::Xor);
/// assert_eq!(op.arity(), 2);
/// assert!(op.accepts(SymType::Long));
/// assert!(!op.accepts(SymType::Boolean));
/// # Ok::<(), symexpr::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCount)]
pub enum Operator {
    // Arithmetic
    /// Addition, including `Reference + int` pointer arithmetic.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
    /// Remainder.
    Rem,

    /// If-then-else over a boolean condition.
    Ite,

    // Comparisons
    /// Greater than.
    Greater,
    /// Greater than or equal.
    GreaterEqual,
    /// Less than.
    Less,
    /// Less than or equal.
    LessEqual,
    /// Equality over any two operands of the same type.
    Equal,
    /// Inequality over any two operands of the same type.
    NotEqual,
    /// Three-way comparison producing `-1`, `0` or `1`.
    Compare,

    // Bitwise
    /// Bitwise OR.
    Or,
    /// Bitwise AND.
    And,
    /// Bitwise XOR.
    Xor,
    /// Shift left.
    Shl,
    /// Shift right.
    Shr,
    /// Arithmetic negation.
    Neg,

    // Boolean
    /// Logical negation.
    Not,
    /// Logical conjunction.
    BoolAnd,
    /// Logical disjunction.
    BoolOr,

    // Conversions
    /// Narrowing to `byte`.
    ToByte,
    /// Narrowing to `char`.
    ToChar,
    /// Narrowing to `short`.
    ToShort,
    /// Conversion to `int`.
    ToInt,
    /// Conversion to `long`.
    ToLong,
    /// Conversion to `float`.
    ToFloat,
    /// Conversion to `double`.
    ToDouble,
    /// Conversion to `boolean`.
    ToBoolean,

    // Heap
    /// Heap store: `put(heap, reference, value)` yields the updated heap.
    Put,
    /// Heap load: `get(heap, reference)` yields the stored value.
    Get,
}

impl Operator {
    /// Looks an operator up by its symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The textual symbol, e.g. `"+"` or `"bvshl"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownOperatorSymbol`] if no operator uses `symbol`.
    pub fn from_symbol(symbol: &str) -> Result<Self> {
        Self::iter()
            .find(|op| op.symbol() == symbol)
            .ok_or_else(|| Error::UnknownOperatorSymbol(symbol.to_string()))
    }

    /// Returns the textual symbol of this operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "rem",
            Self::Ite => "ite",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Compare => "cmp",
            Self::Or => "bvor",
            Self::And => "bvand",
            Self::Xor => "bvxor",
            Self::Shl => "bvshl",
            Self::Shr => "bvshr",
            Self::Neg => "neg",
            Self::Not => "not",
            Self::BoolAnd => "and",
            Self::BoolOr => "or",
            Self::ToByte => "toByte",
            Self::ToChar => "toChar",
            Self::ToShort => "toShort",
            Self::ToInt => "toInt",
            Self::ToLong => "toLong",
            Self::ToFloat => "toFloat",
            Self::ToDouble => "toDouble",
            Self::ToBoolean => "toBoolean",
            Self::Put => "put",
            Self::Get => "get",
        }
    }

    /// Returns the number of operands this operator takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Shl
            | Self::Shr
            | Self::Neg
            | Self::Not
            | Self::ToByte
            | Self::ToChar
            | Self::ToShort
            | Self::ToInt
            | Self::ToLong
            | Self::ToFloat
            | Self::ToDouble
            | Self::ToBoolean => 1,
            Self::Ite | Self::Put => 3,
            _ => 2,
        }
    }

    /// Returns the types every operand must be drawn from.
    #[must_use]
    pub const fn input_domain(self) -> &'static [SymType] {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Rem => ARITHMETIC,
            Self::Greater | Self::GreaterEqual | Self::Less | Self::LessEqual => ORDERED,
            Self::Ite | Self::Equal | Self::NotEqual | Self::Put | Self::Get => ALL,
            Self::Compare | Self::Or | Self::And | Self::Xor | Self::Neg | Self::ToBoolean => {
                NUMERIC
            }
            Self::Shl | Self::Shr => SHIFTABLE,
            Self::Not | Self::BoolAnd | Self::BoolOr => BOOLEAN,
            Self::ToByte => FROM_NOT_BYTE,
            Self::ToChar => FROM_NOT_CHAR,
            Self::ToShort => FROM_NOT_SHORT,
            Self::ToInt => FROM_NOT_INT,
            Self::ToLong => FROM_NOT_LONG,
            Self::ToFloat => FROM_NOT_FLOAT,
            Self::ToDouble => FROM_NOT_DOUBLE,
        }
    }

    /// Returns the types this operator can produce.
    ///
    /// When the output domain equals the input domain the operator mirrors the
    /// type of its operands; otherwise the domain holds the single result type.
    #[must_use]
    pub const fn output_domain(self) -> &'static [SymType] {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Rem => ARITHMETIC,
            Self::Ite | Self::Get => ALL,
            Self::Greater
            | Self::GreaterEqual
            | Self::Less
            | Self::LessEqual
            | Self::Equal
            | Self::NotEqual
            | Self::Not
            | Self::BoolAnd
            | Self::BoolOr
            | Self::ToBoolean => BOOLEAN,
            Self::Compare | Self::ToInt => INT,
            Self::Or | Self::And | Self::Xor | Self::Neg => NUMERIC,
            Self::Shl | Self::Shr => SHIFTABLE,
            Self::ToByte => TO_BYTE,
            Self::ToChar => TO_CHAR,
            Self::ToShort => TO_SHORT,
            Self::ToLong => TO_LONG,
            Self::ToFloat => TO_FLOAT,
            Self::ToDouble => TO_DOUBLE,
            Self::Put => HEAP,
        }
    }

    /// Returns `true` if an operand of type `ty` is admissible.
    #[must_use]
    pub fn accepts(self, ty: SymType) -> bool {
        self.input_domain().contains(&ty)
    }

    /// Returns `true` if the result type mirrors the operand types.
    #[must_use]
    pub fn preserves_type(self) -> bool {
        self.input_domain() == self.output_domain()
    }

    /// Checks if this is one of the eight widening/narrowing conversions.
    #[must_use]
    pub const fn is_type_cast(self) -> bool {
        matches!(
            self,
            Self::ToByte
                | Self::ToChar
                | Self::ToShort
                | Self::ToInt
                | Self::ToLong
                | Self::ToFloat
                | Self::ToDouble
                | Self::ToBoolean
        )
    }

    /// Checks if this operation produces a `boolean` from two operands.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Greater
                | Self::GreaterEqual
                | Self::Less
                | Self::LessEqual
                | Self::Equal
                | Self::NotEqual
        )
    }

    /// Checks if this operation reads or writes the symbolic heap.
    #[must_use]
    pub const fn is_heap_access(self) -> bool {
        matches!(self, Self::Put | Self::Get)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_symbol(s)
    }
}
