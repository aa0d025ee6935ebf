use std::fmt;

use crate::error::{FractalError, FractalResult};
use crate::utils::HeightMap2D;

// N×N height buffer with a parallel "computed" mask.
// Stored row-major in a single Vec: index = y * size + x.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid {
    size: usize,
    values: Vec<f32>,
    computed: Vec<bool>,
}

impl HeightGrid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            values: vec![0.0; size * size],
            computed: vec![false; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    // Mark every cell uncomputed. The dimension never changes.
    pub fn reset(&mut self) {
        self.values.fill(0.0);
        self.computed.fill(false);
    }

    // Checked read of the stored value at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> FractalResult<f32> {
        let i = self.index(x, y)?;
        Ok(self.values[i])
    }

    // Checked write; the cell becomes computed.
    pub fn set(&mut self, x: usize, y: usize, value: f32) -> FractalResult<()> {
        let i = self.index(x, y)?;
        self.values[i] = value;
        self.computed[i] = true;
        Ok(())
    }

    pub fn is_computed(&self, x: usize, y: usize) -> FractalResult<bool> {
        let i = self.index(x, y)?;
        Ok(self.computed[i])
    }

    pub fn computed_count(&self) -> usize {
        self.computed.iter().filter(|&&c| c).count()
    }

    pub fn is_complete(&self) -> bool {
        self.computed.iter().all(|&c| c)
    }

    // Row-major flat view of the heights.
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        self.values.chunks_exact(self.size)
    }

    // Copy into the nested `map[y][x]` form.
    pub fn to_nested(&self) -> HeightMap2D {
        self.rows().map(|row| row.to_vec()).collect()
    }

    // Unchecked accessors for the generator. Callers keep coordinates in bounds.
    #[inline]
    pub(crate) fn value(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.size + x]
    }

    #[inline]
    pub(crate) fn put(&mut self, x: usize, y: usize, value: f32) {
        let i = y * self.size + x;
        debug_assert!(!self.computed[i], "cell ({}, {}) written twice", x, y);
        self.values[i] = value;
        self.computed[i] = true;
    }

    // Value at (x, y) if it lies on the grid and was computed this pass.
    #[inline]
    pub(crate) fn computed_value(&self, x: isize, y: isize) -> Option<f32> {
        if x < 0 || y < 0 || x as usize >= self.size || y as usize >= self.size {
            return None;
        }
        let i = y as usize * self.size + x as usize;
        self.computed[i].then(|| self.values[i])
    }

    #[inline]
    pub(crate) fn is_set(&self, x: usize, y: usize) -> bool {
        self.computed[y * self.size + x]
    }

    fn index(&self, x: usize, y: usize) -> FractalResult<usize> {
        if x >= self.size || y >= self.size {
            return Err(FractalError::OutOfRange {
                x,
                y,
                size: self.size,
            });
        }
        Ok(y * self.size + x)
    }
}

// Debug dump: one line per row, values separated by a single space.
impl fmt::Display for HeightGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for (i, v) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
