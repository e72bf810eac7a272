//! Composite expressions and their type inference.
//!
//! An [`OperationExpression`] only exists in a validated state: construction
//! runs the whole check and inference pipeline and either yields a fully typed
//! node or an error. There is no way to obtain an unchecked operation.
//!
//! # Inference Pipeline
//!
//! 1. **Arity**: the operand count must equal [`Operator::arity`].
//! 2. **Domain**: every operand type must be in [`Operator::input_domain`].
//! 3. **Heap access**: `put(heap, ref, value)` and `get(heap, ref)` require a
//!    `Heap` first operand and a `Reference` (or `Undef`, narrowed to
//!    `Reference`) second operand. `put` yields `Heap`; `get` yields the
//!    caller-supplied type hint, since a heap load cannot be typed from its
//!    operands.
//! 4. **Binary**: `Reference + int` in either order yields `Reference`.
//!    Otherwise both operand types must agree; a single `Undef` side is
//!    narrowed to the other side's type.
//! 5. **Ternary** (`ite`): the condition must be `boolean` (an `Undef`
//!    condition is narrowed). Branches of differing types yield the type hint,
//!    or `Undef` if none was given.
//! 6. **Result**: operators whose output domain equals their input domain
//!    take the type of their last operand; all others produce their single
//!    declared output type.
//!
//! Narrowing never touches the caller's nodes. The operation stores retyped
//! copies of the affected operands instead.

use std::fmt;

use crate::{
    expression::{expr::Expression, ops::Operator, types::SymType},
    Error, Result,
};

/// A validated operator application.
///
/// # Examples
///
/// ```rust
/// use symexpr::expression::{Expression, OperationExpression, Operator, SymType};
///
/// let heap = Expression::variable("heap", SymType::Heap);
/// let addr = Expression::variable("p", SymType::Undef);
/// let load = OperationExpression::with_hint(
///     Operator::Get,
///     vec![heap, addr],
///     Some(SymType::Double),
/// )?;
/// assert_eq!(load.ty(), SymType::Double);
/// assert_eq!(load.children()[1].ty(), SymType::Reference);
/// # Ok::<(), symexpr::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationExpression {
    operator: Operator,
    children: Vec<Expression>,
    ty: SymType,
    hint: Option<SymType>,
}

impl OperationExpression {
    /// Builds an operation without a type hint.
    ///
    /// # Arguments
    ///
    /// * `operator` - The operator to apply.
    /// * `children` - The operands, in order.
    ///
    /// # Errors
    ///
    /// See [`with_hint`](Self::with_hint).
    pub fn new(operator: Operator, children: Vec<Expression>) -> Result<Self> {
        Self::with_hint(operator, children, None)
    }

    /// Builds an operation, running arity, domain and type inference checks.
    ///
    /// # Arguments
    ///
    /// * `operator` - The operator to apply.
    /// * `children` - The operands, in order.
    /// * `hint` - Result type for operations that cannot be typed from their
    ///   operands (`get`, and `ite` with differently typed branches).
    ///
    /// # Errors
    ///
    /// - [`Error::ArityMismatch`] if the operand count is wrong.
    /// - [`Error::TypeDomainViolation`] if an operand type is outside the
    ///   operator's input domain.
    /// - [`Error::TypeUnification`] if two concrete types must agree but don't.
    /// - [`Error::MissingTypeHint`] if `get` is built without a hint.
    pub fn with_hint(
        operator: Operator,
        mut children: Vec<Expression>,
        hint: Option<SymType>,
    ) -> Result<Self> {
        if children.len() != operator.arity() {
            return Err(Error::ArityMismatch {
                operator,
                expected: operator.arity(),
                found: children.len(),
            });
        }

        if let Some((index, child)) = children
            .iter()
            .enumerate()
            .find(|(_, child)| !operator.accepts(child.ty()))
        {
            return Err(Error::TypeDomainViolation {
                operator,
                index,
                found: child.ty(),
            });
        }

        let ty = match operator {
            Operator::Put => {
                narrow_heap_operands(operator, &mut children)?;
                SymType::Heap
            }
            Operator::Get => {
                narrow_heap_operands(operator, &mut children)?;
                hint.ok_or(Error::MissingTypeHint { operator })?
            }
            _ => match children.as_mut_slice() {
                [left, right] => infer_binary(operator, left, right)?,
                [condition, then, otherwise] => {
                    infer_ternary(operator, condition, then, otherwise, hint)?
                }
                others => result_type(operator, others),
            },
        };

        Ok(Self {
            operator,
            children,
            ty,
            hint,
        })
    }

    /// Rebuilds this operation over replacement operands of identical types.
    ///
    /// Used when a pass swaps operands for equivalent nodes (for example an
    /// unresolved call for its processed form) and the inferred type must be
    /// kept as is.
    pub(crate) fn with_children(&self, children: Vec<Expression>) -> Self {
        debug_assert_eq!(children.len(), self.children.len());
        Self {
            operator: self.operator,
            children,
            ty: self.ty,
            hint: self.hint,
        }
    }

    /// Returns a copy of this operation recording `ty` as its result type.
    #[must_use]
    pub fn with_type(&self, ty: SymType) -> Self {
        Self {
            operator: self.operator,
            children: self.children.clone(),
            ty,
            hint: Some(ty),
        }
    }

    /// Returns the operator.
    #[must_use]
    pub const fn operator(&self) -> Operator {
        self.operator
    }

    /// Returns the operands after narrowing.
    #[must_use]
    pub fn children(&self) -> &[Expression] {
        &self.children
    }

    /// Returns the inferred result type.
    #[must_use]
    pub const fn ty(&self) -> SymType {
        self.ty
    }

    /// Returns the type hint supplied at construction, if any.
    #[must_use]
    pub const fn hint(&self) -> Option<SymType> {
        self.hint
    }
}

impl fmt::Display for OperationExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.operator)?;
        for child in &self.children {
            write!(f, " {child}")?;
        }
        f.write_str(")")
    }
}

/// Checks `heap` and `reference` operands of `put`/`get`, narrowing an `Undef` address.
fn narrow_heap_operands(operator: Operator, children: &mut [Expression]) -> Result<()> {
    expect_type(operator, &children[0], SymType::Heap)?;
    narrow_to(operator, &mut children[1], SymType::Reference)
}

fn infer_binary(
    operator: Operator,
    left: &mut Expression,
    right: &mut Expression,
) -> Result<SymType> {
    let pointer_arithmetic = matches!(
        (left.ty(), right.ty()),
        (SymType::Reference, SymType::Int) | (SymType::Int, SymType::Reference)
    );
    if operator == Operator::Add && pointer_arithmetic {
        return Ok(SymType::Reference);
    }

    // Two Undef operands stay Undef; the result still takes a fixed output type.
    match (left.ty(), right.ty()) {
        (l, r) if l == r => {}
        (SymType::Undef, r) => *left = left.with_type(r),
        (l, SymType::Undef) => *right = right.with_type(l),
        (l, r) => {
            return Err(Error::TypeUnification {
                operator,
                expected: l,
                found: r,
            })
        }
    }

    Ok(result_type(operator, std::slice::from_ref(&*right)))
}

fn infer_ternary(
    operator: Operator,
    condition: &mut Expression,
    then: &Expression,
    otherwise: &Expression,
    hint: Option<SymType>,
) -> Result<SymType> {
    narrow_to(operator, condition, SymType::Boolean)?;

    if then.ty() == otherwise.ty() {
        Ok(then.ty())
    } else {
        Ok(hint.unwrap_or(SymType::Undef))
    }
}

/// Picks the result type once operands are validated.
fn result_type(operator: Operator, children: &[Expression]) -> SymType {
    if operator.preserves_type() {
        children.last().map_or(SymType::Undef, Expression::ty)
    } else {
        operator.output_domain()[0]
    }
}

fn expect_type(operator: Operator, child: &Expression, expected: SymType) -> Result<()> {
    if child.ty() == expected {
        Ok(())
    } else {
        Err(Error::TypeUnification {
            operator,
            expected,
            found: child.ty(),
        })
    }
}

/// Requires `expected`, replacing an `Undef` child with a retyped copy.
fn narrow_to(operator: Operator, child: &mut Expression, expected: SymType) -> Result<()> {
    if child.ty().is_undef() {
        *child = child.with_type(expected);
        return Ok(());
    }
    expect_type(operator, child, expected)
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::test::{boolean, empty_heap, int, long, reference, undef};

    fn operands(ty: SymType, count: usize) -> Vec<Expression> {
        (0..count)
            .map(|i| Expression::variable(format!("v{i}"), ty))
            .collect()
    }

    #[test]
    fn test_arity_mismatch_for_every_operator() {
        for op in Operator::iter() {
            let too_many = operands(SymType::Int, op.arity() + 1);
            match OperationExpression::new(op, too_many) {
                Err(Error::ArityMismatch {
                    operator,
                    expected,
                    found,
                }) => {
                    assert_eq!(operator, op);
                    assert_eq!(expected, op.arity());
                    assert_eq!(found, op.arity() + 1);
                }
                other => panic!("{op}: unexpected result {other:?}"),
            }

            let too_few = operands(SymType::Int, op.arity() - 1);
            assert!(matches!(
                OperationExpression::new(op, too_few),
                Err(Error::ArityMismatch { .. })
            ));
        }
    }

    #[test]
    fn test_domain_violation_for_every_operator() {
        for op in Operator::iter() {
            for ty in SymType::iter().filter(|ty| !ty.is_undef() && !op.accepts(*ty)) {
                let result = OperationExpression::with_hint(op, operands(ty, op.arity()), Some(ty));
                match result {
                    Err(Error::TypeDomainViolation {
                        operator,
                        index,
                        found,
                    }) => {
                        assert_eq!(operator, op);
                        assert_eq!(index, 0);
                        assert_eq!(found, ty);
                    }
                    other => panic!("{op} with {ty}: unexpected result {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_pointer_arithmetic() -> Result<()> {
        let left = OperationExpression::new(Operator::Add, vec![reference(8), int(1)])?;
        let right = OperationExpression::new(Operator::Add, vec![int(1), reference(8)])?;
        assert_eq!(left.ty(), SymType::Reference);
        assert_eq!(right.ty(), SymType::Reference);

        // Only addition gets the exemption.
        assert!(matches!(
            OperationExpression::new(Operator::Sub, vec![reference(8), int(1)]),
            Err(Error::TypeUnification { .. })
        ));
        assert!(matches!(
            OperationExpression::new(Operator::Add, vec![reference(8), long(1)]),
            Err(Error::TypeUnification { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_binary_unification() -> Result<()> {
        let op = OperationExpression::new(Operator::Mul, vec![undef("a"), long(3)])?;
        assert_eq!(op.ty(), SymType::Long);
        assert_eq!(op.children()[0].ty(), SymType::Long);

        let op = OperationExpression::new(Operator::Sub, vec![long(3), undef("b")])?;
        assert_eq!(op.children()[1].ty(), SymType::Long);

        let cmp = OperationExpression::new(Operator::GreaterEqual, vec![undef("c"), int(0)])?;
        assert_eq!(cmp.ty(), SymType::Boolean);
        assert_eq!(cmp.children()[0].ty(), SymType::Int);

        match OperationExpression::new(Operator::Div, vec![int(1), long(1)]) {
            Err(Error::TypeUnification {
                operator,
                expected,
                found,
            }) => {
                assert_eq!(operator, Operator::Div);
                assert_eq!(expected, SymType::Int);
                assert_eq!(found, SymType::Long);
            }
            other => panic!("unexpected result {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_both_undef_stays_undef() -> Result<()> {
        let op = OperationExpression::new(Operator::Add, vec![undef("a"), undef("b")])?;
        assert_eq!(op.ty(), SymType::Undef);
        Ok(())
    }

    #[test]
    fn test_comparisons_over_undef_operands() -> Result<()> {
        for operator in [Operator::Less, Operator::Equal, Operator::NotEqual] {
            let op = OperationExpression::new(operator, vec![undef("a"), undef("b")])?;
            assert_eq!(op.ty(), SymType::Boolean);
            assert!(op.children().iter().all(|child| child.ty() == SymType::Undef));
        }

        let cmp = OperationExpression::new(Operator::Compare, vec![undef("a"), undef("b")])?;
        assert_eq!(cmp.ty(), SymType::Int);
        assert!(cmp.children().iter().all(|child| child.ty() == SymType::Undef));
        Ok(())
    }

    #[test]
    fn test_equality_over_symbolic_types() -> Result<()> {
        let eq = OperationExpression::new(Operator::Equal, vec![reference(1), reference(2)])?;
        assert_eq!(eq.ty(), SymType::Boolean);
        assert!(OperationExpression::new(Operator::NotEqual, vec![reference(1), int(2)]).is_err());
        Ok(())
    }

    #[test]
    fn test_put_narrows_reference() -> Result<()> {
        let x = undef("x");
        let put = OperationExpression::new(Operator::Put, vec![empty_heap(), x.clone(), int(5)])?;
        assert_eq!(put.ty(), SymType::Heap);
        assert_eq!(put.children()[1].ty(), SymType::Reference);
        assert_eq!(put.children()[1], x);
        assert_eq!(x.ty(), SymType::Undef);
        Ok(())
    }

    #[test]
    fn test_heap_operand_checks() {
        assert!(matches!(
            OperationExpression::new(Operator::Put, vec![int(0), reference(1), int(5)]),
            Err(Error::TypeUnification {
                expected: SymType::Heap,
                found: SymType::Int,
                ..
            })
        ));
        assert!(matches!(
            OperationExpression::with_hint(
                Operator::Get,
                vec![empty_heap(), int(1)],
                Some(SymType::Int)
            ),
            Err(Error::TypeUnification {
                expected: SymType::Reference,
                found: SymType::Int,
                ..
            })
        ));
    }

    #[test]
    fn test_get_uses_hint() -> Result<()> {
        let as_double = OperationExpression::with_hint(
            Operator::Get,
            vec![empty_heap(), reference(4)],
            Some(SymType::Double),
        )?;
        let as_boolean = OperationExpression::with_hint(
            Operator::Get,
            vec![empty_heap(), reference(4)],
            Some(SymType::Boolean),
        )?;
        assert_eq!(as_double.ty(), SymType::Double);
        assert_eq!(as_boolean.ty(), SymType::Boolean);

        assert!(matches!(
            OperationExpression::new(Operator::Get, vec![empty_heap(), reference(4)]),
            Err(Error::MissingTypeHint {
                operator: Operator::Get
            })
        ));
        Ok(())
    }

    #[test]
    fn test_ite() -> Result<()> {
        let same = OperationExpression::new(Operator::Ite, vec![boolean(true), int(1), int(2)])?;
        assert_eq!(same.ty(), SymType::Int);

        let mixed = OperationExpression::with_hint(
            Operator::Ite,
            vec![boolean(true), int(1), reference(3)],
            Some(SymType::Reference),
        )?;
        assert_eq!(mixed.ty(), SymType::Reference);

        let open = OperationExpression::new(Operator::Ite, vec![boolean(true), int(1), undef("z")])?;
        assert_eq!(open.ty(), SymType::Undef);

        let narrowed = OperationExpression::new(Operator::Ite, vec![undef("c"), int(1), int(2)])?;
        assert_eq!(narrowed.children()[0].ty(), SymType::Boolean);

        assert!(matches!(
            OperationExpression::new(Operator::Ite, vec![int(1), int(1), int(2)]),
            Err(Error::TypeUnification {
                expected: SymType::Boolean,
                ..
            })
        ));
        Ok(())
    }

    #[test]
    fn test_unary_and_casts() -> Result<()> {
        let neg = OperationExpression::new(Operator::Neg, vec![long(4)])?;
        assert_eq!(neg.ty(), SymType::Long);

        let shl = OperationExpression::new(Operator::Shl, vec![undef("s")])?;
        assert_eq!(shl.ty(), SymType::Undef);

        let not = OperationExpression::new(Operator::Not, vec![boolean(false)])?;
        assert_eq!(not.ty(), SymType::Boolean);

        let widen = OperationExpression::new(Operator::ToLong, vec![int(4)])?;
        assert_eq!(widen.ty(), SymType::Long);

        let narrow = OperationExpression::new(Operator::ToByte, vec![int(300)])?;
        assert_eq!(narrow.ty(), SymType::Byte);

        let cmp = OperationExpression::new(Operator::Compare, vec![long(1), long(2)])?;
        assert_eq!(cmp.ty(), SymType::Int);
        Ok(())
    }

    #[test]
    fn test_display() -> Result<()> {
        let put = OperationExpression::new(Operator::Put, vec![empty_heap(), reference(16), int(5)])?;
        assert_eq!(put.to_string(), "(put [] @0x10 5)");
        Ok(())
    }
}
