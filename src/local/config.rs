//! Local search configuration.

/// Configuration for [`LocalSearchRunner`](super::LocalSearchRunner).
///
/// # Examples
///
/// ```
/// use u_antenna::local::LocalSearchConfig;
///
/// let config = LocalSearchConfig::default()
///     .with_max_iterations(200)
///     .with_max_no_improve(25)
///     .with_merge_distance(250);
/// assert_eq!(config.max_iterations, 200);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct LocalSearchConfig {
    /// Maximum number of improvement steps.
    pub max_iterations: usize,

    /// Stop after this many consecutive non-improving steps. 0 = no limit.
    pub max_no_improve: usize,

    /// Antennas further apart than this are never merged.
    pub merge_distance: i64,

    /// Removal candidates tried per step.
    pub remove_attempts: usize,

    /// Check the state against the scorer every this many steps.
    pub validate_every: usize,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            max_no_improve: 0,
            merge_distance: 200,
            remove_attempts: 10,
            validate_every: 10,
        }
    }
}

impl LocalSearchConfig {
    /// Sets the maximum number of improvement steps.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the stagnation limit (0 disables it).
    pub fn with_max_no_improve(mut self, n: usize) -> Self {
        self.max_no_improve = n;
        self
    }

    /// Sets the maximum distance between two antennas considered for a merge.
    pub fn with_merge_distance(mut self, d: i64) -> Self {
        self.merge_distance = d;
        self
    }

    /// Sets how many removal candidates are tried per step.
    pub fn with_remove_attempts(mut self, n: usize) -> Self {
        self.remove_attempts = n;
        self
    }

    /// Sets the period, in steps, of the scorer cross-check.
    pub fn with_validate_every(mut self, n: usize) -> Self {
        self.validate_every = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.merge_distance < 0 {
            return Err(format!(
                "merge_distance must be non-negative, got {}",
                self.merge_distance
            ));
        }
        if self.remove_attempts == 0 {
            return Err("remove_attempts must be positive".into());
        }
        if self.validate_every == 0 {
            return Err("validate_every must be positive".into());
        }
        Ok(())
    }
}
