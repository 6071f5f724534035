//! Constructive generator configuration.

use crate::model::AntennaType;

/// Configuration for [`GreedyConstructor`](super::GreedyConstructor).
///
/// # Examples
///
/// ```
/// use u_antenna::construct::GreedyConfig;
///
/// let config = GreedyConfig::default()
///     .with_sample_size(30)
///     .with_centroid_min_uncovered(8);
/// assert_eq!(config.sample_size, 30);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GreedyConfig {
    /// Uncovered buildings sampled per round as on-building candidates.
    pub sample_size: usize,

    /// Minimum number of uncovered buildings before the centroid of the
    /// uncovered set is also tried.
    pub centroid_min_uncovered: usize,

    /// Types tried at the centroid.
    pub centroid_types: Vec<AntennaType>,
}

impl Default for GreedyConfig {
    fn default() -> Self {
        Self {
            sample_size: 20,
            centroid_min_uncovered: 5,
            centroid_types: vec![AntennaType::Spot, AntennaType::Density, AntennaType::MaxRange],
        }
    }
}

impl GreedyConfig {
    /// Sets the number of uncovered buildings sampled per round.
    pub fn with_sample_size(mut self, n: usize) -> Self {
        self.sample_size = n;
        self
    }

    /// Sets the uncovered-set size from which the centroid is also tried.
    pub fn with_centroid_min_uncovered(mut self, n: usize) -> Self {
        self.centroid_min_uncovered = n;
        self
    }

    /// Sets the antenna types tried at the centroid.
    pub fn with_centroid_types(mut self, types: Vec<AntennaType>) -> Self {
        self.centroid_types = types;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_size == 0 {
            return Err("sample_size must be positive".into());
        }
        Ok(())
    }
}
