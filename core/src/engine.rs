use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::config::{FractalConfig, validate_amplitude, validate_grid_size};
use crate::error::{FractalError, FractalResult};
use crate::grid::HeightGrid;
use crate::range::RangeTracker;
use crate::seeder::{Displacement, seed_corners};
use crate::subdivide::{Square, Subdivider};

// Diamond–square fractal generator.
//
// Owns one N×N grid that every `generate()` call overwrites in full.
// Callers that display a result while the next one is generated keep a
// `snapshot()` and never read the engine mid-pass.
pub struct FractalEngine<R: Rng = Pcg64> {
    grid: HeightGrid,
    range: RangeTracker,
    rng: R,
    amplitude: f32,
    displacement: Displacement,
    generations: u64,
}

impl FractalEngine<Pcg64> {
    // Engine seeded from OS entropy.
    pub fn new(grid_size: usize, amplitude: f32) -> FractalResult<Self> {
        Self::with_rng(grid_size, amplitude, Pcg64::from_entropy())
    }

    // Reproducible engine: the same seed gives the same sequence of grids.
    pub fn with_seed(grid_size: usize, amplitude: f32, seed: u64) -> FractalResult<Self> {
        Self::with_rng(grid_size, amplitude, Pcg64::seed_from_u64(seed))
    }

    pub fn from_config(config: &FractalConfig) -> FractalResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_entropy(),
        };
        Ok(Self::with_rng(config.grid_size, config.amplitude, rng)?
            .with_displacement(config.displacement))
    }
}

impl<R: Rng> FractalEngine<R> {
    // Engine drawing from a caller-supplied random stream.
    // Fails before allocating anything when the parameters are invalid.
    pub fn with_rng(grid_size: usize, amplitude: f32, rng: R) -> FractalResult<Self> {
        validate_grid_size(grid_size)?;
        validate_amplitude(amplitude)?;

        Ok(Self {
            grid: HeightGrid::new(grid_size),
            range: RangeTracker::new(),
            rng,
            amplitude,
            displacement: Displacement::default(),
            generations: 0,
        })
    }

    pub fn with_displacement(mut self, displacement: Displacement) -> Self {
        self.displacement = displacement;
        self
    }

    // Reset, seed the corners, subdivide the full square.
    pub fn generate(&mut self) {
        let start = Instant::now();
        let size = self.grid.size();

        self.grid.reset();
        self.range.reset();

        let corners = seed_corners(
            &mut self.grid,
            &mut self.range,
            &mut self.rng,
            self.displacement,
            self.amplitude,
        );
        tracing::trace!(
            target: "fractal_core::engine",
            ?corners,
            "fractal.seed"
        );

        Subdivider::new(
            &mut self.grid,
            &mut self.range,
            &mut self.rng,
            self.displacement,
        )
        .subdivide(Square::full(size), self.amplitude);
        debug_assert!(self.grid.is_complete());

        self.generations += 1;
        tracing::debug!(
            target: "fractal_core::engine",
            size,
            amplitude = self.amplitude,
            min = self.range.min(),
            max = self.range.max(),
            range = self.range.range(),
            elapsed = ?start.elapsed(),
            generation = self.generations,
            "fractal.generate"
        );
    }

    // Completed grid; all cells uncomputed before the first `generate()`.
    pub fn data(&self) -> &HeightGrid {
        &self.grid
    }

    // Owned copy to publish while this engine keeps generating.
    pub fn snapshot(&self) -> HeightGrid {
        self.grid.clone()
    }

    pub fn grid_size(&self) -> usize {
        self.grid.size()
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn displacement(&self) -> Displacement {
        self.displacement
    }

    // Number of completed `generate()` calls.
    pub fn generations(&self) -> u64 {
        self.generations
    }

    pub fn min_height(&self) -> Option<f32> {
        self.range.min()
    }

    pub fn max_height(&self) -> Option<f32> {
        self.range.max()
    }

    pub fn range(&self) -> Option<f32> {
        self.range.range()
    }

    pub fn height(&self, x: usize, y: usize) -> FractalResult<f32> {
        self.grid.get(x, y)
    }

    // (height - min) / range in [0, 1]; 0 when the fractal is flat.
    pub fn percentage_height(&self, x: usize, y: usize) -> FractalResult<f32> {
        let value = self.grid.get(x, y)?;
        let (min, range) = self.extrema()?;
        Ok(normalize(value, min, range))
    }

    // Every cell's percentage height, row-major.
    pub fn percentage_heights(&self) -> FractalResult<Vec<f32>> {
        let (min, range) = self.extrema()?;
        Ok(self
            .grid
            .as_slice()
            .iter()
            .map(|&v| normalize(v, min, range))
            .collect())
    }

    // Row-major text rendering, one line per row.
    pub fn dump(&self) -> String {
        self.grid.to_string()
    }

    fn extrema(&self) -> FractalResult<(f32, f32)> {
        match (self.range.min(), self.range.range()) {
            (Some(min), Some(range)) if self.generations > 0 => Ok((min, range)),
            _ => Err(FractalError::NotGenerated),
        }
    }
}

#[inline]
fn normalize(value: f32, min: f32, range: f32) -> f32 {
    if range == 0.0 {
        0.0
    } else {
        (value - min) / range
    }
}
