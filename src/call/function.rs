//! Descriptors of call targets.
//!
//! A [`Function`] is what the translator knows about a callee when it emits a
//! call: its name, the number of operand-stack values it consumes, and the
//! default expressions for the local slots and static fields it reads.

use std::{
    collections::BTreeMap,
    fmt,
    hash::{Hash, Hasher},
};

use crate::{
    call::frame::FrameId,
    expression::{Expression, SymType},
};

/// Identity of a static field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldRef {
    owner: String,
    name: String,
}

impl FieldRef {
    /// Creates a field reference from its declaring type and field name.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Declaring type of the field.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.name)
    }
}

/// A local slot read by a callee, qualified by the frame that defined it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalSlot {
    /// Slot index in the frame's local array.
    pub index: usize,
    /// Frame in which the slot's value was defined.
    pub frame: FrameId,
}

impl LocalSlot {
    /// Creates a slot reference.
    #[must_use]
    pub const fn new(index: usize, frame: FrameId) -> Self {
        Self { index, frame }
    }
}

/// A call target as seen by the expression layer.
///
/// Two functions are equal when their names are equal.
///
/// # Examples
///
/// ```rust
/// use symexpr::call::{FieldRef, FrameArena, Function};
/// use symexpr::expression::{Expression, SymType};
///
/// let mut frames = FrameArena::new();
/// let caller = frames.root();
///
/// let target = Function::builder("com/acme/Math.clamp(III)I")
///     .short_name("clamp")
///     .returns(SymType::Int)
///     .stack_params(3)
///     .local_param(0, caller, Expression::variable("clamp_lo", SymType::Int))
///     .static_param(FieldRef::new("com/acme/Math", "MAX"), Expression::constant(255, SymType::Int))
///     .build();
///
/// assert_eq!(target.stack_param_count(), 3);
/// assert_eq!(target.local_params().count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Function {
    name: String,
    short_name: String,
    return_type: SymType,
    stack_params: usize,
    local_params: BTreeMap<LocalSlot, Expression>,
    static_params: BTreeMap<FieldRef, Expression>,
}

impl Function {
    /// Starts describing a function with the given fully qualified name.
    pub fn builder(name: impl Into<String>) -> FunctionBuilder {
        FunctionBuilder::new(name)
    }

    /// Fully qualified name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short name used to namespace the function's variables.
    #[must_use]
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Declared return type, [`SymType::Undef`] for functions returning nothing.
    #[must_use]
    pub const fn return_type(&self) -> SymType {
        self.return_type
    }

    /// Number of operand-stack values the function consumes.
    #[must_use]
    pub const fn stack_param_count(&self) -> usize {
        self.stack_params
    }

    /// Local-slot parameters with their defaults, ordered by slot.
    pub fn local_params(&self) -> impl Iterator<Item = (&LocalSlot, &Expression)> {
        self.local_params.iter()
    }

    /// Static-field parameters with their defaults, ordered by field.
    pub fn static_params(&self) -> impl Iterator<Item = (&FieldRef, &Expression)> {
        self.static_params.iter()
    }

    /// Total parameter count of a call to this function, heap and heap size included.
    ///
    /// A return carrying a value through a function without stack parameters
    /// yields one more.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.stack_params + self.local_params.len() + self.static_params.len() + 2
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Function {}

impl Hash for Function {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Builder for [`Function`].
#[derive(Debug, Clone)]
pub struct FunctionBuilder {
    function: Function,
}

impl FunctionBuilder {
    fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            function: Function {
                short_name: name.clone(),
                name,
                return_type: SymType::Undef,
                stack_params: 0,
                local_params: BTreeMap::new(),
                static_params: BTreeMap::new(),
            },
        }
    }

    /// Sets the short name. Defaults to the full name.
    #[must_use]
    pub fn short_name(mut self, short_name: impl Into<String>) -> Self {
        self.function.short_name = short_name.into();
        self
    }

    /// Sets the return type.
    #[must_use]
    pub fn returns(mut self, ty: SymType) -> Self {
        self.function.return_type = ty;
        self
    }

    /// Sets the number of consumed operand-stack values.
    #[must_use]
    pub fn stack_params(mut self, count: usize) -> Self {
        self.function.stack_params = count;
        self
    }

    /// Declares a local-slot parameter and its default.
    #[must_use]
    pub fn local_param(mut self, index: usize, frame: FrameId, default: Expression) -> Self {
        self.function
            .local_params
            .insert(LocalSlot::new(index, frame), default);
        self
    }

    /// Declares a static-field parameter and its default.
    #[must_use]
    pub fn static_param(mut self, field: FieldRef, default: Expression) -> Self {
        self.function.static_params.insert(field, default);
        self
    }

    /// Finishes the description.
    #[must_use]
    pub fn build(self) -> Function {
        self.function
    }
}
