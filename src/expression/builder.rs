//! The constructing component for expressions.
//!
//! [`ExpressionBuilder`] is what a bytecode translator holds while it walks a
//! method: it builds validated operations, counts them in an injected
//! [`BuildStats`], and (when enabled) interns leaves so that equal constants
//! and identically typed variables share one node across all explored paths.
//!
//! The leaf caches are [`DashMap`]s, so a single builder can be shared by
//! threads exploring different paths.

use std::sync::Arc;

use dashmap::DashMap;

use crate::{
    call::Function,
    config::ExpressionConfig,
    expression::{
        expr::Expression,
        leaf::{Constant, Variable},
        operation::OperationExpression,
        ops::Operator,
        stats::BuildStats,
        types::SymType,
        value::ConstValue,
    },
    Result,
};

/// Builds, counts and interns expressions.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use symexpr::expression::{BuildStats, ExpressionBuilder, Operator, SymType};
///
/// let stats = Arc::new(BuildStats::new());
/// let builder = ExpressionBuilder::new().with_stats(Arc::clone(&stats));
///
/// let x = builder.variable("x", SymType::Int);
/// let one = builder.constant(1, SymType::Int);
/// let sum = builder.operation(Operator::Add, vec![x, one])?;
///
/// assert_eq!(sum.ty(), SymType::Int);
/// assert_eq!(stats.operations(), 1);
/// # Ok::<(), symexpr::Error>(())
/// ```
#[derive(Debug)]
pub struct ExpressionBuilder {
    config: ExpressionConfig,
    stats: Arc<BuildStats>,
    constants: DashMap<Constant, Expression>,
    variables: DashMap<(String, SymType), Expression>,
}

impl ExpressionBuilder {
    /// Creates a builder with default configuration and private statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ExpressionConfig::default())
    }

    /// Creates a builder with the given configuration.
    #[must_use]
    pub fn with_config(config: ExpressionConfig) -> Self {
        Self {
            config,
            stats: Arc::new(BuildStats::new()),
            constants: DashMap::new(),
            variables: DashMap::new(),
        }
    }

    /// Replaces the statistics sink, e.g. to share one across builders.
    #[must_use]
    pub fn with_stats(mut self, stats: Arc<BuildStats>) -> Self {
        self.stats = stats;
        self
    }

    /// Returns the statistics this builder reports into.
    #[must_use]
    pub fn stats(&self) -> &Arc<BuildStats> {
        &self.stats
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &ExpressionConfig {
        &self.config
    }

    /// Returns a constant expression, shared with earlier equal constants when interning.
    pub fn constant(&self, value: impl Into<ConstValue>, ty: SymType) -> Expression {
        let constant = Constant::new(value, ty);
        if !self.config.intern_leaves {
            return Expression::from(constant);
        }

        if let Some(existing) = self.constants.get(&constant) {
            self.stats.record_leaf_hit();
            log::trace!("constant cache hit: {constant}: {ty}");
            return existing.value().clone();
        }
        self.constants
            .entry(constant.clone())
            .or_insert_with(|| Expression::from(constant))
            .value()
            .clone()
    }

    /// Returns a variable expression, shared with earlier variables of the same name and type.
    pub fn variable(&self, name: impl Into<String>, ty: SymType) -> Expression {
        let name = name.into();
        if !self.config.intern_leaves {
            return Expression::variable(name, ty);
        }

        let key = (name, ty);
        if let Some(existing) = self.variables.get(&key) {
            self.stats.record_leaf_hit();
            log::trace!("variable cache hit: {}: {ty}", key.0);
            return existing.value().clone();
        }
        let variable = Expression::variable(key.0.clone(), ty);
        self.variables
            .entry(key)
            .or_insert(variable)
            .value()
            .clone()
    }

    /// Returns a variable namespaced by `owner`'s short name.
    pub fn scoped_variable(&self, owner: &Function, name: &str, ty: SymType) -> Expression {
        let scoped = Variable::scoped(owner.short_name(), name, ty);
        self.variable(scoped.name(), ty)
    }

    /// Builds and counts an operation without a type hint.
    ///
    /// # Errors
    ///
    /// See [`OperationExpression::with_hint`].
    pub fn operation(&self, operator: Operator, children: Vec<Expression>) -> Result<Expression> {
        self.build(operator, children, None)
    }

    /// Builds and counts an operation with a result type hint.
    ///
    /// # Errors
    ///
    /// See [`OperationExpression::with_hint`].
    pub fn operation_with_hint(
        &self,
        operator: Operator,
        children: Vec<Expression>,
        hint: SymType,
    ) -> Result<Expression> {
        self.build(operator, children, Some(hint))
    }

    /// Builds and counts an operation named by its symbol.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownOperatorSymbol`](crate::Error::UnknownOperatorSymbol)
    /// for an unknown symbol, otherwise see [`OperationExpression::with_hint`].
    pub fn operation_by_symbol(
        &self,
        symbol: &str,
        children: Vec<Expression>,
        hint: Option<SymType>,
    ) -> Result<Expression> {
        let operator = Operator::from_symbol(symbol)?;
        self.build(operator, children, hint)
    }

    fn build(
        &self,
        operator: Operator,
        children: Vec<Expression>,
        hint: Option<SymType>,
    ) -> Result<Expression> {
        match OperationExpression::with_hint(operator, children, hint) {
            Ok(operation) => {
                self.stats.record_operation();
                log::trace!("built {operation}: {}", operation.ty());
                Ok(Expression::from(operation))
            }
            Err(error) => {
                self.stats.record_rejection();
                log::debug!("rejected '{operator}' operation: {error}");
                Err(error)
            }
        }
    }

    /// Drops all interned leaves.
    pub fn clear_cache(&self) {
        self.constants.clear();
        self.variables.clear();
    }

    /// Number of interned leaves.
    #[must_use]
    pub fn cached_leaves(&self) -> usize {
        self.constants.len() + self.variables.len()
    }
}

impl Default for ExpressionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_interning_shares_leaves() {
        let builder = ExpressionBuilder::new();
        let a = builder.constant(5, SymType::Int);
        let b = builder.constant(5, SymType::Int);
        let c = builder.constant(5, SymType::Long);
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));

        let x = builder.variable("x", SymType::Int);
        let y = builder.variable("x", SymType::Int);
        let z = builder.variable("x", SymType::Boolean);
        assert!(x.ptr_eq(&y));
        assert!(!x.ptr_eq(&z));
        assert_eq!(z.ty(), SymType::Boolean);

        assert_eq!(builder.cached_leaves(), 4);
        assert_eq!(builder.stats().leaf_hits(), 2);

        builder.clear_cache();
        assert_eq!(builder.cached_leaves(), 0);
    }

    #[test]
    fn test_interning_disabled() {
        let builder =
            ExpressionBuilder::with_config(ExpressionConfig::default().with_intern_leaves(false));
        let a = builder.constant(5, SymType::Int);
        let b = builder.constant(5, SymType::Int);
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
        assert_eq!(builder.cached_leaves(), 0);
    }

    #[test]
    fn test_counts_operations() -> Result<()> {
        let stats = Arc::new(BuildStats::new());
        let first = ExpressionBuilder::new().with_stats(Arc::clone(&stats));
        let second = ExpressionBuilder::new().with_stats(Arc::clone(&stats));

        let x = first.variable("x", SymType::Int);
        let sum = first.operation(Operator::Add, vec![x.clone(), first.constant(1, SymType::Int)])?;
        second.operation(Operator::Less, vec![sum, x])?;
        assert!(second
            .operation(Operator::Not, vec![second.constant(1, SymType::Int)])
            .is_err());

        assert_eq!(stats.operations(), 2);
        assert_eq!(stats.rejected(), 1);
        Ok(())
    }

    #[test]
    fn test_by_symbol() -> Result<()> {
        let builder = ExpressionBuilder::new();
        let heap = builder.variable("heap", SymType::Heap);
        let addr = builder.constant(ConstValue::Address(8), SymType::Reference);
        let load = builder.operation_by_symbol("get", vec![heap, addr], Some(SymType::Char))?;
        assert_eq!(load.ty(), SymType::Char);

        assert!(matches!(
            builder.operation_by_symbol("¬valid¬", vec![], None),
            Err(Error::UnknownOperatorSymbol(_))
        ));
        Ok(())
    }

    #[test]
    fn test_scoped_variable() {
        let builder = ExpressionBuilder::new();
        let owner = Function::builder("com/acme/Foo.bar(I)I")
            .short_name("f7")
            .build();
        let v = builder.scoped_variable(&owner, "i", SymType::Int);
        assert_eq!(v.to_string(), "f7_i");
        assert!(v.ptr_eq(&builder.variable("f7_i", SymType::Int)));
    }
}
