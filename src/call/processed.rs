//! Resolved calls.

use std::{fmt, sync::Arc};

use crate::{
    call::function::Function,
    expression::{Expression, SymType},
};

/// A call with a fixed parameter list.
///
/// This is the terminal form of a [`FunctionCall`](crate::call::FunctionCall):
/// nothing reachable through the call node itself is left to resolve, although
/// its parameters may still contain unresolved calls until they are materialized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessedFunctionCall {
    target: Arc<Function>,
    parameters: Vec<Expression>,
    ty: SymType,
}

impl ProcessedFunctionCall {
    /// Creates a resolved call.
    #[must_use]
    pub fn new(target: Arc<Function>, parameters: Vec<Expression>, ty: SymType) -> Self {
        Self {
            target,
            parameters,
            ty,
        }
    }

    /// The called function.
    #[must_use]
    pub fn target(&self) -> &Arc<Function> {
        &self.target
    }

    /// The fixed parameters.
    #[must_use]
    pub fn parameters(&self) -> &[Expression] {
        &self.parameters
    }

    /// Type of the call's result.
    #[must_use]
    pub const fn ty(&self) -> SymType {
        self.ty
    }

    /// Returns a copy of this call with a different result type.
    #[must_use]
    pub fn with_type(&self, ty: SymType) -> Self {
        Self {
            ty,
            ..self.clone()
        }
    }

    /// Returns a copy of this call with replaced parameters.
    #[must_use]
    pub(crate) fn with_parameters(&self, parameters: Vec<Expression>) -> Self {
        Self {
            target: Arc::clone(&self.target),
            parameters,
            ty: self.ty,
        }
    }
}

impl fmt::Display for ProcessedFunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.target.name())?;
        for parameter in &self.parameters {
            write!(f, " {parameter}")?;
        }
        write!(f, ")")
    }
}
