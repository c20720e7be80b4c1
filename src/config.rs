//! Configuration types for the cloth simulation.

use crate::float::Float;
use crate::vec::{Vec, Vec3};
use crate::grid::GridConfig;
use crate::error::ClothError;
use crate::timestep::FIXED_TIMESTEP;

/// Parameters that can be changed while the simulation runs.
///
/// New values take effect on the next fixed step; no reset is needed.
#[derive(Clone, Debug, PartialEq)]
pub struct SimParams<F: Float> {
    /// Vertical acceleration (negative pulls down). Default: -9.81.
    pub gravity: F,
    /// Fraction of velocity carried into the next step. Default: 0.99.
    pub damping: F,
    /// Wind speed; zero disables the wind model. Default: 0.
    pub wind_strength: F,
    /// Unit wind direction. Default: normalize(1, 0, 0.5).
    pub wind_direction: Vec3<F>,
    /// A spring tears once longer than `rest_length * tear_threshold`. Default: 2.0.
    pub tear_threshold: F,
}

impl<F: Float> Default for SimParams<F> {
    fn default() -> Self {
        SimParams {
            gravity: F::from_f32(-9.81),
            damping: F::from_f32(0.99),
            wind_strength: F::zero(),
            wind_direction: Vec3::from_f32([1.0, 0.0, 0.5]).normalize(),
            tear_threshold: F::from_f32(2.0),
        }
    }
}

impl<F: Float> SimParams<F> {
    pub fn validate(&self) -> Result<(), ClothError> {
        if !self.tear_threshold.is_finite() || self.tear_threshold <= F::one() {
            return Err(ClothError::InvalidTearThreshold);
        }
        if !(self.damping >= F::zero() && self.damping <= F::one()) {
            return Err(ClothError::InvalidDamping);
        }
        Ok(())
    }
}

/// Full construction-time configuration for a [`ClothSystem`](crate::ClothSystem).
///
/// # Builder Pattern
/// ```
/// use tearcloth::config::ClothConfig;
///
/// let config: ClothConfig<f32> = ClothConfig::new()
///     .with_grid(30, 20)
///     .with_extent(4.0, 3.0)
///     .with_gravity(-9.81)
///     .with_tear_threshold(2.5)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ClothConfig<F: Float> {
    pub grid: GridConfig<F>,
    pub params: SimParams<F>,
    /// Seed for the wind turbulence generator. Default: 0x5eed.
    pub seed: u64,
    /// Upper bound applied to each frame delta before it is accumulated.
    /// Default: one fixed step. `None` leaves deltas untouched.
    pub max_frame_delta: Option<F>,
}

impl<F: Float> ClothConfig<F> {
    /// Create a new config with default values (25x25 particles over 4x4 units).
    pub fn new() -> Self {
        ClothConfig {
            grid: GridConfig::default(),
            params: SimParams::default(),
            seed: 0x5eed,
            max_frame_delta: Some(F::from_f32(FIXED_TIMESTEP)),
        }
    }

    /// Set the particle counts per row and column.
    pub fn with_grid(mut self, width: usize, height: usize) -> Self {
        self.grid.width = width;
        self.grid.height = height;
        self
    }

    /// Set the physical size of the cloth.
    pub fn with_extent(mut self, cloth_width: F, cloth_height: F) -> Self {
        self.grid.cloth_width = cloth_width;
        self.grid.cloth_height = cloth_height;
        self
    }

    pub fn with_particle_mass(mut self, mass: F) -> Self {
        self.grid.particle_mass = mass;
        self
    }

    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.params.gravity = gravity;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.params.damping = damping;
        self
    }

    /// Set wind strength and direction (normalized here).
    pub fn with_wind(mut self, strength: F, direction: Vec3<F>) -> Self {
        self.params.wind_strength = strength;
        self.params.wind_direction = direction.normalize_or(self.params.wind_direction);
        self
    }

    pub fn with_tear_threshold(mut self, threshold: F) -> Self {
        self.params.tear_threshold = threshold;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Clamp every incoming frame delta to `max`.
    pub fn with_max_frame_delta(mut self, max: Option<F>) -> Self {
        self.max_frame_delta = max;
        self
    }

    pub fn validate(&self) -> Result<(), ClothError> {
        self.grid.validate()?;
        self.params.validate()
    }
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config: ClothConfig<f32> = ClothConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid.width, 25);
        assert_eq!(config.params.tear_threshold, 2.0);
        assert!((config.params.wind_direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_weak_tear_threshold() {
        let config: ClothConfig<f32> = ClothConfig::new().with_tear_threshold(0.9);
        assert_eq!(config.validate(), Err(ClothError::InvalidTearThreshold));
    }

    #[test]
    fn rejects_small_grid() {
        let config: ClothConfig<f64> = ClothConfig::new().with_grid(2, 1);
        assert_eq!(
            config.validate(),
            Err(ClothError::InvalidGridDimensions { width: 2, height: 1 })
        );
    }

    #[test]
    fn zero_wind_direction_keeps_previous() {
        let config: ClothConfig<f32> = ClothConfig::new().with_wind(3.0, Vec3::zero());
        assert_eq!(config.params.wind_direction, SimParams::default().wind_direction);
        assert_eq!(config.params.wind_strength, 3.0);
    }
}
