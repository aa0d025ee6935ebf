use serde::{Deserialize, Serialize};

use crate::error::{FractalError, FractalResult};
use crate::seeder::Displacement;

pub const DEFAULT_GRID_SIZE: usize = 513; // 2^9 + 1
pub const DEFAULT_AMPLITUDE: f32 = 1.0;
// Heights stay within 3 * amplitude, so four-term sums stay below 12 * amplitude.
pub const MAX_AMPLITUDE: f32 = f32::MAX / 16.0;

// Parameters for one fractal engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalConfig {
    pub grid_size: usize, // must be 2^k + 1 with k >= 1
    pub amplitude: f32,   // initial roughness, halved every level
    pub seed: Option<u64>, // None = seeded from OS entropy
    pub displacement: Displacement,
}

impl Default for FractalConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            amplitude: DEFAULT_AMPLITUDE,
            seed: None,
            displacement: Displacement::Uniform,
        }
    }
}

impl FractalConfig {
    pub fn new(grid_size: usize, amplitude: f32) -> Self {
        Self {
            grid_size,
            amplitude,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_displacement(mut self, displacement: Displacement) -> Self {
        self.displacement = displacement;
        self
    }

    // Parse a JSON document; missing fields fall back to the defaults.
    pub fn from_json(text: &str) -> FractalResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FractalResult<()> {
        validate_grid_size(self.grid_size)?;
        validate_amplitude(self.amplitude)
    }
}

pub(crate) fn validate_grid_size(size: usize) -> FractalResult<()> {
    if size < 3 || !(size - 1).is_power_of_two() {
        return Err(FractalError::invalid(format!(
            "grid size {} is not of the form 2^k + 1 (k >= 1)",
            size
        )));
    }
    Ok(())
}

pub(crate) fn validate_amplitude(amplitude: f32) -> FractalResult<()> {
    if !amplitude.is_finite() || amplitude < 0.0 {
        return Err(FractalError::invalid(format!(
            "amplitude must be finite and non-negative, got {}",
            amplitude
        )));
    }
    if amplitude > MAX_AMPLITUDE {
        return Err(FractalError::invalid(format!(
            "amplitude {} exceeds the largest supported value {}",
            amplitude, MAX_AMPLITUDE
        )));
    }
    Ok(())
}
