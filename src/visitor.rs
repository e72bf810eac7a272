//! Traversal and call resolution.
//!
//! [`Resolver`] walks expression trees in post-order: children first, then the
//! node's own hook on the supplied [`ExpressionVisitor`]. Unresolved calls are
//! the one exception. They are first turned into a [`ProcessedFunctionCall`]
//! by [`ExpressionVisitor::visit_function_call`] against the current frames,
//! and traversal continues on the processed node.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use symexpr::prelude::*;
//!
//! #[derive(Default)]
//! struct CallCounter(usize);
//!
//! impl ExpressionVisitor for CallCounter {
//!     fn visit_processed_call(&mut self, _call: &ProcessedFunctionCall) -> Result<()> {
//!         self.0 += 1;
//!         Ok(())
//!     }
//! }
//!
//! let mut frames = FrameArena::new();
//! let frame = frames.root();
//! let target = Arc::new(Function::builder("rand").returns(SymType::Int).build());
//! let call = Expression::from(FunctionCall::plain(target, frame));
//! let sum = Expression::operation(Operator::Add, vec![call, Expression::constant(1, SymType::Int)])?;
//!
//! let mut counter = CallCounter::default();
//! Resolver::new(&frames).walk(&sum, &mut counter)?;
//! assert_eq!(counter.0, 1);
//!
//! let resolved = Resolver::new(&frames).materialize(&sum)?;
//! assert!(resolved.is_resolved());
//! assert_eq!(resolved.to_string(), "(+ (rand heap heap_size) 1)");
//! # Ok::<(), symexpr::Error>(())
//! ```

use rayon::prelude::*;

use crate::{
    call::{FrameArena, FunctionCall, ProcessedFunctionCall},
    config::ExpressionConfig,
    expression::{Constant, Expression, OperationExpression, Variable},
    Error, Result,
};

/// Per-variant hooks invoked by [`Resolver::walk`].
///
/// Every hook defaults to doing nothing, except
/// [`visit_function_call`](Self::visit_function_call) which materializes the
/// call so traversal can continue into its parameters.
pub trait ExpressionVisitor {
    /// Called for every constant leaf.
    ///
    /// # Errors
    ///
    /// Any error aborts the walk and is returned from [`Resolver::walk`].
    fn visit_constant(&mut self, _constant: &Constant) -> Result<()> {
        Ok(())
    }

    /// Called for every variable leaf.
    ///
    /// # Errors
    ///
    /// Any error aborts the walk and is returned from [`Resolver::walk`].
    fn visit_variable(&mut self, _variable: &Variable) -> Result<()> {
        Ok(())
    }

    /// Called for every operation, after all of its children.
    ///
    /// # Errors
    ///
    /// Any error aborts the walk and is returned from [`Resolver::walk`].
    fn visit_operation(&mut self, _operation: &OperationExpression) -> Result<()> {
        Ok(())
    }

    /// Called for every unresolved call, before anything below it.
    ///
    /// Returning `Ok(None)` skips the call: neither its parameters nor
    /// [`visit_processed_call`](Self::visit_processed_call) are visited.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFrame`] if the call's frame is not in `frames`.
    fn visit_function_call(
        &mut self,
        call: &FunctionCall,
        frames: &FrameArena,
    ) -> Result<Option<ProcessedFunctionCall>> {
        call.materialize(frames).map(Some)
    }

    /// Called for every processed call, after all of its parameters.
    ///
    /// # Errors
    ///
    /// Any error aborts the walk and is returned from [`Resolver::walk`].
    fn visit_processed_call(&mut self, _call: &ProcessedFunctionCall) -> Result<()> {
        Ok(())
    }
}

/// Walks and materializes expression trees against a set of frames.
#[derive(Debug, Clone)]
pub struct Resolver<'a> {
    frames: &'a FrameArena,
    config: ExpressionConfig,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver with default configuration.
    #[must_use]
    pub fn new(frames: &'a FrameArena) -> Self {
        Self::with_config(frames, ExpressionConfig::default())
    }

    /// Creates a resolver with the given configuration.
    #[must_use]
    pub fn with_config(frames: &'a FrameArena, config: ExpressionConfig) -> Self {
        Self { frames, config }
    }

    /// The frames calls are resolved against.
    #[must_use]
    pub fn frames(&self) -> &'a FrameArena {
        self.frames
    }

    /// Visits `root` and everything reachable from it in post-order.
    ///
    /// # Arguments
    ///
    /// * `root` - Tree to traverse
    /// * `visitor` - Hooks invoked per node
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecursionLimit`] if the tree, including materialized
    /// call parameters, is deeper than the configured `max_depth`, or the first
    /// error returned by a hook.
    pub fn walk<V>(&self, root: &Expression, visitor: &mut V) -> Result<()>
    where
        V: ExpressionVisitor + ?Sized,
    {
        self.walk_at(root, visitor, 0)
    }

    fn walk_at<V>(&self, node: &Expression, visitor: &mut V, depth: usize) -> Result<()>
    where
        V: ExpressionVisitor + ?Sized,
    {
        self.check_depth(depth)?;

        match node {
            Expression::Constant(constant) => visitor.visit_constant(constant),
            Expression::Variable(variable) => visitor.visit_variable(variable),
            Expression::Operation(operation) => {
                for child in operation.children() {
                    self.walk_at(child, visitor, depth + 1)?;
                }
                visitor.visit_operation(operation)
            }
            Expression::Call(call) => match visitor.visit_function_call(call, self.frames)? {
                Some(processed) => self.walk_processed(&processed, visitor, depth),
                None => Ok(()),
            },
            Expression::Processed(call) => self.walk_processed(call, visitor, depth),
        }
    }

    fn walk_processed<V>(
        &self,
        call: &ProcessedFunctionCall,
        visitor: &mut V,
        depth: usize,
    ) -> Result<()>
    where
        V: ExpressionVisitor + ?Sized,
    {
        for parameter in call.parameters() {
            self.walk_at(parameter, visitor, depth + 1)?;
        }
        visitor.visit_processed_call(call)
    }

    /// Returns a copy of `root` with every unresolved call replaced by its processed form.
    ///
    /// Parameters of materialized calls are materialized as well. Subtrees
    /// without calls are shared with `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFrame`] if a call names a frame outside the
    /// arena, or [`Error::RecursionLimit`] if the result would be deeper than
    /// the configured `max_depth`.
    pub fn materialize(&self, root: &Expression) -> Result<Expression> {
        self.materialize_at(root, 0)
    }

    fn materialize_at(&self, node: &Expression, depth: usize) -> Result<Expression> {
        self.check_depth(depth)?;

        match node {
            Expression::Constant(_) | Expression::Variable(_) => Ok(node.clone()),
            Expression::Operation(operation) => {
                match self.materialize_children(operation.children(), depth)? {
                    Some(children) => Ok(Expression::from(operation.with_children(children))),
                    None => Ok(node.clone()),
                }
            }
            Expression::Call(call) => {
                let processed = call.materialize(self.frames)?;
                match self.materialize_children(processed.parameters(), depth)? {
                    Some(parameters) => Ok(Expression::from(processed.with_parameters(parameters))),
                    None => Ok(Expression::from(processed)),
                }
            }
            Expression::Processed(call) => {
                match self.materialize_children(call.parameters(), depth)? {
                    Some(parameters) => Ok(Expression::from(call.with_parameters(parameters))),
                    None => Ok(node.clone()),
                }
            }
        }
    }

    /// Materializes `children`, returning `None` if none of them changed.
    fn materialize_children(
        &self,
        children: &[Expression],
        depth: usize,
    ) -> Result<Option<Vec<Expression>>> {
        let materialized = children
            .iter()
            .map(|child| self.materialize_at(child, depth + 1))
            .collect::<Result<Vec<_>>>()?;

        let unchanged = materialized
            .iter()
            .zip(children)
            .all(|(new, old)| new.ptr_eq(old));
        Ok(if unchanged { None } else { Some(materialized) })
    }

    /// Materializes many roots, in parallel once there are enough of them.
    ///
    /// Results are returned in the order of `roots`.
    ///
    /// # Errors
    ///
    /// Returns the error of a failing root, see [`Resolver::materialize`].
    pub fn materialize_all(&self, roots: &[Expression]) -> Result<Vec<Expression>> {
        log::debug!("materializing {} expressions", roots.len());

        if roots.len() >= self.config.parallel_threshold {
            roots
                .par_iter()
                .map(|root| self.materialize(root))
                .collect()
        } else {
            roots.iter().map(|root| self.materialize(root)).collect()
        }
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.config.max_depth {
            return Err(Error::RecursionLimit(self.config.max_depth));
        }
        Ok(())
    }
}
