//! Configuration for segment mesh generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`CurveMeshGenerator`](crate::CurveMeshGenerator).
///
/// # Example
///
/// ```
/// use track_mesh::MeshConfig;
///
/// let config = MeshConfig::default().double_sided().with_parallel(true);
/// assert!(config.double_sided_ribbon);
/// assert!(config.parallel);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MeshConfig {
    /// Close the two-vertex ribbon ring into a loop so both faces render.
    ///
    /// Doubles the visual index count from `6(n-1)` to `12(n-1)`.
    pub double_sided_ribbon: bool,

    /// Whether to sample frames in parallel (via rayon).
    pub parallel: bool,

    /// Minimum sample count before parallel sampling kicks in.
    pub parallel_threshold: usize,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            double_sided_ribbon: false,
            parallel: false,
            parallel_threshold: 256,
        }
    }
}

impl MeshConfig {
    /// Render the visual ribbon from both sides.
    #[must_use]
    pub fn double_sided(mut self) -> Self {
        self.double_sided_ribbon = true;
        self
    }

    /// Enable or disable parallel frame sampling.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the sample count at which parallel sampling starts.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Whether a segment with `samples` samples should be sampled in parallel.
    #[must_use]
    pub fn samples_in_parallel(&self, samples: usize) -> bool {
        self.parallel && samples >= self.parallel_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_config_default() {
        let config = MeshConfig::default();
        assert!(!config.double_sided_ribbon);
        assert!(!config.parallel);
        assert_eq!(config.parallel_threshold, 256);
    }

    #[test]
    fn mesh_config_builders() {
        let config = MeshConfig::default()
            .double_sided()
            .with_parallel(true)
            .with_parallel_threshold(8);

        assert!(config.double_sided_ribbon);
        assert!(config.parallel);
        assert_eq!(config.parallel_threshold, 8);
    }

    #[test]
    fn parallel_requires_flag_and_threshold() {
        let config = MeshConfig::default().with_parallel_threshold(4);
        assert!(!config.samples_in_parallel(100));

        let config = config.with_parallel(true);
        assert!(!config.samples_in_parallel(3));
        assert!(config.samples_in_parallel(4));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_fields_use_defaults() {
        let config: Option<MeshConfig> =
            serde_json::from_str(r#"{"double_sided_ribbon": true}"#).ok();
        assert_eq!(config, Some(MeshConfig::default().double_sided()));
    }
}
