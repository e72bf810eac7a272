//! The expression sum type.
//!
//! [`Expression`] is the single handle the rest of the crate passes around. Each
//! variant wraps its node in an [`Arc`], so cloning an expression is cheap and
//! the same leaf may be reachable from many parents (and from many explored
//! paths) at once. Nodes are never mutated after construction.

use std::{collections::BTreeSet, fmt, sync::Arc};

use crate::{
    call::{FunctionCall, ProcessedFunctionCall},
    expression::{
        leaf::{Constant, Variable},
        operation::OperationExpression,
        ops::Operator,
        types::SymType,
        value::ConstValue,
    },
    Result,
};

/// A typed node of the symbolic representation.
///
/// # Examples
///
/// ```rust
/// use symexpr::expression::{Expression, Operator, SymType};
///
/// let sum = Expression::operation(
///     Operator::Add,
///     vec![
///         Expression::variable("x", SymType::Undef),
///         Expression::constant(1, SymType::Long),
///     ],
/// )?;
/// assert_eq!(sum.ty(), SymType::Long);
/// assert_eq!(sum.to_string(), "(+ x 1)");
/// # Ok::<(), symexpr::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    /// A typed literal.
    Constant(Arc<Constant>),
    /// A named symbolic value.
    Variable(Arc<Variable>),
    /// A validated operator application.
    Operation(Arc<OperationExpression>),
    /// A call whose parameters are still computed from its calling context.
    Call(Arc<FunctionCall>),
    /// A call whose parameters have been fixed.
    Processed(Arc<ProcessedFunctionCall>),
}

impl Expression {
    /// Creates a constant expression.
    #[must_use]
    pub fn constant(value: impl Into<ConstValue>, ty: SymType) -> Self {
        Self::Constant(Arc::new(Constant::new(value, ty)))
    }

    /// Creates a variable expression.
    #[must_use]
    pub fn variable(name: impl Into<String>, ty: SymType) -> Self {
        Self::Variable(Arc::new(Variable::new(name, ty)))
    }

    /// Builds and validates an operation without a result type hint.
    ///
    /// # Errors
    ///
    /// See [`OperationExpression::new`].
    pub fn operation(operator: Operator, children: Vec<Expression>) -> Result<Self> {
        OperationExpression::new(operator, children).map(Self::from)
    }

    /// Builds and validates an operation with a result type hint.
    ///
    /// # Errors
    ///
    /// See [`OperationExpression::with_hint`].
    pub fn operation_with_hint(
        operator: Operator,
        children: Vec<Expression>,
        hint: SymType,
    ) -> Result<Self> {
        OperationExpression::with_hint(operator, children, Some(hint)).map(Self::from)
    }

    /// Returns the type of this expression.
    #[must_use]
    pub fn ty(&self) -> SymType {
        match self {
            Self::Constant(c) => c.ty(),
            Self::Variable(v) => v.ty(),
            Self::Operation(op) => op.ty(),
            Self::Call(call) => call.ty(),
            Self::Processed(call) => call.ty(),
        }
    }

    /// Returns a copy of this expression carrying `ty`.
    ///
    /// The receiver is left untouched; this is how `Undef` operands are narrowed
    /// while their parent operation is being built.
    #[must_use]
    pub fn with_type(&self, ty: SymType) -> Self {
        if self.ty() == ty {
            return self.clone();
        }
        match self {
            Self::Constant(c) => Self::Constant(Arc::new(c.with_type(ty))),
            Self::Variable(v) => Self::Variable(Arc::new(v.with_type(ty))),
            Self::Operation(op) => Self::Operation(Arc::new(op.with_type(ty))),
            Self::Call(call) => Self::Call(Arc::new(call.with_type(ty))),
            Self::Processed(call) => Self::Processed(Arc::new(call.with_type(ty))),
        }
    }

    /// Returns the direct children of this expression.
    ///
    /// Operations yield their operands and processed calls their parameters.
    /// Leaves and unresolved calls have no stored children.
    #[must_use]
    pub fn children(&self) -> &[Expression] {
        match self {
            Self::Operation(op) => op.children(),
            Self::Processed(call) => call.parameters(),
            Self::Constant(_) | Self::Variable(_) | Self::Call(_) => &[],
        }
    }

    /// Collects every unresolved [`FunctionCall`] reachable from this node.
    ///
    /// Calls are returned in left-to-right order. An unresolved call yields
    /// itself; leaves and processed calls yield nothing.
    #[must_use]
    pub fn function_calls(&self) -> Vec<&FunctionCall> {
        let mut calls = Vec::new();
        self.collect_function_calls(&mut calls);
        calls
    }

    fn collect_function_calls<'a>(&'a self, calls: &mut Vec<&'a FunctionCall>) {
        match self {
            Self::Constant(_) | Self::Variable(_) | Self::Processed(_) => {}
            Self::Call(call) => calls.push(call.as_ref()),
            Self::Operation(op) => {
                for child in op.children() {
                    child.collect_function_calls(calls);
                }
            }
        }
    }

    /// Returns `true` if no unresolved call is reachable from this node.
    ///
    /// Unlike [`function_calls`](Self::function_calls), this looks through the
    /// parameters of processed calls, which may still hold calls taken from a
    /// frame's stack or locals.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        match self {
            Self::Constant(_) | Self::Variable(_) => true,
            Self::Call(_) => false,
            Self::Operation(op) => op.children().iter().all(Self::is_resolved),
            Self::Processed(call) => call.parameters().iter().all(Self::is_resolved),
        }
    }

    /// Returns the distinct names of all variables reachable from this node.
    #[must_use]
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        if let Self::Variable(v) = self {
            names.insert(v.name());
        }
        for child in self.children() {
            child.collect_variables(names);
        }
    }

    /// Returns the height of the tree rooted at this node (leaves have depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Self::depth).max().unwrap_or(0)
    }

    /// Returns `true` if both handles point at the same node instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Constant(a), Self::Constant(b)) => Arc::ptr_eq(a, b),
            (Self::Variable(a), Self::Variable(b)) => Arc::ptr_eq(a, b),
            (Self::Operation(a), Self::Operation(b)) => Arc::ptr_eq(a, b),
            (Self::Call(a), Self::Call(b)) => Arc::ptr_eq(a, b),
            (Self::Processed(a), Self::Processed(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Checks if this expression is a constant or a variable.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Constant(_) | Self::Variable(_))
    }

    /// Returns the constant node, if this is one.
    #[must_use]
    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Self::Constant(c) => Some(c.as_ref()),
            _ => None,
        }
    }

    /// Returns the variable node, if this is one.
    #[must_use]
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Variable(v) => Some(v.as_ref()),
            _ => None,
        }
    }

    /// Returns the operation node, if this is one.
    #[must_use]
    pub fn as_operation(&self) -> Option<&OperationExpression> {
        match self {
            Self::Operation(op) => Some(op.as_ref()),
            _ => None,
        }
    }

    /// Returns the unresolved call node, if this is one.
    #[must_use]
    pub fn as_function_call(&self) -> Option<&FunctionCall> {
        match self {
            Self::Call(call) => Some(call.as_ref()),
            _ => None,
        }
    }

    /// Returns the processed call node, if this is one.
    #[must_use]
    pub fn as_processed_call(&self) -> Option<&ProcessedFunctionCall> {
        match self {
            Self::Processed(call) => Some(call.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(c) => write!(f, "{c}"),
            Self::Variable(v) => write!(f, "{v}"),
            Self::Operation(op) => write!(f, "{op}"),
            Self::Call(call) => write!(f, "{call}"),
            Self::Processed(call) => write!(f, "{call}"),
        }
    }
}

impl From<Constant> for Expression {
    fn from(value: Constant) -> Self {
        Self::Constant(Arc::new(value))
    }
}

impl From<Variable> for Expression {
    fn from(value: Variable) -> Self {
        Self::Variable(Arc::new(value))
    }
}

impl From<OperationExpression> for Expression {
    fn from(value: OperationExpression) -> Self {
        Self::Operation(Arc::new(value))
    }
}

impl From<FunctionCall> for Expression {
    fn from(value: FunctionCall) -> Self {
        Self::Call(Arc::new(value))
    }
}

impl From<ProcessedFunctionCall> for Expression {
    fn from(value: ProcessedFunctionCall) -> Self {
        Self::Processed(Arc::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{boolean, empty_heap, int, reference};

    #[test]
    fn test_leaf_queries() {
        let c = int(5);
        assert!(c.is_leaf());
        assert!(c.is_resolved());
        assert!(c.function_calls().is_empty());
        assert!(c.children().is_empty());
        assert_eq!(c.depth(), 1);
        assert!(c.as_constant().is_some());
        assert!(c.as_variable().is_none());

        let v = Expression::variable("x", SymType::Int);
        assert!(v.function_calls().is_empty());
        assert_eq!(v.variables().into_iter().collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    fn test_with_type_shares_when_unchanged() {
        let c = int(5);
        assert!(c.with_type(SymType::Int).ptr_eq(&c));
        let widened = c.with_type(SymType::Long);
        assert!(!widened.ptr_eq(&c));
        assert_eq!(widened.ty(), SymType::Long);
        assert_eq!(c.ty(), SymType::Int);
    }

    #[test]
    fn test_composite_queries() -> Result<()> {
        let x = Expression::variable("x", SymType::Int);
        let y = Expression::variable("y", SymType::Int);
        let sum = Expression::operation(Operator::Add, vec![x.clone(), y])?;
        let cmp = Expression::operation(Operator::Less, vec![sum.clone(), x])?;
        let ite = Expression::operation(Operator::Ite, vec![cmp, int(1), int(2)])?;

        assert_eq!(ite.depth(), 4);
        assert_eq!(ite.children().len(), 3);
        assert_eq!(
            ite.variables().into_iter().collect::<Vec<_>>(),
            vec!["x", "y"]
        );
        assert!(ite.is_resolved());
        assert_eq!(ite.to_string(), "(ite (< (+ x y) x) 1 2)");
        Ok(())
    }

    #[test]
    fn test_structural_sharing() -> Result<()> {
        let shared = reference(0x10);
        let load = Expression::operation_with_hint(
            Operator::Get,
            vec![empty_heap(), shared.clone()],
            SymType::Int,
        )?;
        let cond = Expression::operation(Operator::Equal, vec![load, int(0)])?;
        let sel = Expression::operation(Operator::Ite, vec![cond, boolean(true), boolean(false)])?;

        let get = &sel.children()[0].children()[0];
        assert!(get.children()[1].ptr_eq(&shared));
        Ok(())
    }
}
