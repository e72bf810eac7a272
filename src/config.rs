//! Tunables for construction and resolution.

/// Configuration shared by [`ExpressionBuilder`](crate::expression::ExpressionBuilder)
/// and [`Resolver`](crate::visitor::Resolver).
///
/// # Builder Pattern
///
/// ```rust
/// use symexpr::config::ExpressionConfig;
///
/// let config = ExpressionConfig::new()
///     .with_intern_leaves(false)
///     .with_max_depth(256)
///     .with_parallel_threshold(32);
/// assert_eq!(config.max_depth, 256);
/// ```
///
/// # Default Values
///
/// | Setting | Default Value |
/// |---------|---------------|
/// | `intern_leaves` | true |
/// | `max_depth` | 512 |
/// | `parallel_threshold` | 8 |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpressionConfig {
    /// Share one node between equal constants and between variables of equal name and type.
    pub intern_leaves: bool,

    /// Maximum nesting depth a traversal may reach.
    ///
    /// Traversal is recursive, so the default stays well within a 2 MB thread
    /// stack, which is also the size of `rayon` worker stacks.
    ///
    /// Deeper traversals fail with [`Error::RecursionLimit`](crate::Error::RecursionLimit).
    pub max_depth: usize,

    /// Minimum number of roots for batch materialization to run in parallel.
    pub parallel_threshold: usize,
}

impl Default for ExpressionConfig {
    /// Creates the default configuration.
    ///
    /// See the struct documentation for default values.
    fn default() -> Self {
        Self {
            intern_leaves: true,
            max_depth: 512,
            parallel_threshold: 8,
        }
    }
}

impl ExpressionConfig {
    /// Creates a configuration with default values.
    ///
    /// Equivalent to [`ExpressionConfig::default()`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables leaf interning.
    ///
    /// # Returns
    ///
    /// Returns `self` for method chaining.
    #[must_use]
    pub fn with_intern_leaves(mut self, enabled: bool) -> Self {
        self.intern_leaves = enabled;
        self
    }

    /// Sets the maximum traversal depth.
    ///
    /// # Arguments
    ///
    /// * `max` - Deepest level a traversal may visit, the root being level 0
    ///
    /// # Returns
    ///
    /// Returns `self` for method chaining.
    #[must_use]
    pub fn with_max_depth(mut self, max: usize) -> Self {
        self.max_depth = max;
        self
    }

    /// Sets the batch size from which materialization runs in parallel.
    ///
    /// # Returns
    ///
    /// Returns `self` for method chaining.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}
