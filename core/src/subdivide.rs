use rand::Rng;

use crate::grid::HeightGrid;
use crate::range::RangeTracker;
use crate::seeder::Displacement;

// Grid coordinate as (x, y): x is the column, y the row.
pub type Point = (usize, usize);

// Square region with power-of-two side, y growing downwards.
// The corner names follow the order the recursion hands them on; the full grid
// is entered with its right-hand column ends as (bottom_right, top_right) =
// ((N-1, 0), (N-1, N-1)), and sub-squares on that side inherit the labelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    pub top_left: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
    pub top_right: Point,
}

impl Square {
    // The full grid of side `size` (2^k + 1 points).
    pub fn full(size: usize) -> Self {
        let last = size - 1;
        Self {
            top_left: (0, 0),
            bottom_left: (0, last),
            bottom_right: (last, 0),
            top_right: (last, last),
        }
    }

    pub fn midpoint(&self) -> Point {
        (
            (self.top_left.0 + self.top_right.0) / 2,
            (self.top_left.1 + self.bottom_left.1) / 2,
        )
    }
}

// Recursive diamond-square pass over one grid.
pub struct Subdivider<'a, R: Rng> {
    grid: &'a mut HeightGrid,
    range: &'a mut RangeTracker,
    rng: &'a mut R,
    displacement: Displacement,
}

impl<'a, R: Rng> Subdivider<'a, R> {
    pub fn new(
        grid: &'a mut HeightGrid,
        range: &'a mut RangeTracker,
        rng: &'a mut R,
        displacement: Displacement,
    ) -> Self {
        Self {
            grid,
            range,
            rng,
            displacement,
        }
    }

    // Fill every lattice point on or inside `square`. Its four corners must already be computed.
    pub fn subdivide(&mut self, square: Square, amplitude: f32) {
        let Square {
            top_left,
            bottom_left,
            bottom_right,
            top_right,
        } = square;

        let mid = square.midpoint();
        // Side length 1: adjacent cells, nothing left inside.
        if mid == top_left {
            return;
        }

        // Diamond step
        let tl = self.height(top_left);
        let bl = self.height(bottom_left);
        let br = self.height(bottom_right);
        let tr = self.height(top_right);
        let center = (tl + bl + br + tr) / 4.0 + self.offset(amplitude);
        self.write(mid, center);

        // Square step. Each edge midpoint looks for the point mirrored across it from the center.
        let top_mid = (mid.0, top_left.1);
        let mid_left = (top_left.0, mid.1);
        let bottom_mid = ((bottom_left.0 + bottom_right.0) / 2, bottom_left.1);
        let mid_right = (top_right.0, (top_right.1 + bottom_right.1) / 2);

        let up = (mid.1 - top_mid.1) as isize;
        let left = (mid.0 - mid_left.0) as isize;
        let down = (bottom_mid.1 - mid.1) as isize;
        let right = (mid_right.0 - mid.0) as isize;

        self.edge(top_mid, [tl, center, tr], (0, -up), amplitude);
        self.edge(mid_left, [tl, center, bl], (-left, 0), amplitude);
        self.edge(bottom_mid, [bl, center, br], (0, down), amplitude);
        self.edge(mid_right, [tr, center, br], (right, 0), amplitude);

        let amplitude = amplitude / 2.0;
        self.subdivide(
            Square {
                top_left,
                bottom_left: mid_left,
                bottom_right: mid,
                top_right: top_mid,
            },
            amplitude,
        );
        self.subdivide(
            Square {
                top_left: mid_left,
                bottom_left,
                bottom_right: bottom_mid,
                top_right: mid,
            },
            amplitude,
        );
        self.subdivide(
            Square {
                top_left: mid,
                bottom_left: bottom_mid,
                bottom_right,
                top_right: mid_right,
            },
            amplitude,
        );
        self.subdivide(
            Square {
                top_left: top_mid,
                bottom_left: mid,
                bottom_right: mid_right,
                top_right,
            },
            amplitude,
        );
    }

    // Edge midpoint: average of its two corners, the center and, when it exists yet,
    // the companion point `away` from the edge. Points already written are left alone.
    fn edge(&mut self, at: Point, terms: [f32; 3], away: (isize, isize), amplitude: f32) {
        if self.grid.is_set(at.0, at.1) {
            return;
        }
        let companion = self
            .grid
            .computed_value(at.0 as isize + away.0, at.1 as isize + away.1);
        let sum = terms[0] + terms[1] + terms[2];
        let avg = match companion {
            Some(c) => (sum + c) / 4.0,
            None => sum / 3.0,
        };
        let value = avg + self.offset(amplitude);
        self.write(at, value);
    }

    #[inline]
    fn height(&self, p: Point) -> f32 {
        self.grid.value(p.0, p.1)
    }

    #[inline]
    fn offset(&mut self, amplitude: f32) -> f32 {
        self.displacement.offset(&mut *self.rng, amplitude)
    }

    #[inline]
    fn write(&mut self, p: Point, value: f32) {
        self.grid.put(p.0, p.1, value);
        self.range.observe(value);
    }
}

#[cfg(test)]
mod tests {
    use super::{Square, Subdivider};
    use crate::grid::HeightGrid;
    use crate::range::RangeTracker;
    use crate::seeder::Displacement;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn seeded_grid(size: usize, corners: [f32; 4]) -> (HeightGrid, RangeTracker) {
        let mut grid = HeightGrid::new(size);
        let mut range = RangeTracker::new();
        let last = size - 1;
        for (&(x, y), &v) in [(0, 0), (0, last), (last, 0), (last, last)]
            .iter()
            .zip(corners.iter())
        {
            grid.put(x, y, v);
            range.observe(v);
        }
        (grid, range)
    }

    #[test]
    fn midpoint_of_full_square() {
        let sq = Square::full(9);
        assert_eq!(sq.midpoint(), (4, 4));
        assert_eq!(sq.bottom_right, (8, 0));
        assert_eq!(sq.top_right, (8, 8));
    }

    #[test]
    fn unit_square_is_left_untouched() {
        let (mut grid, mut range) = seeded_grid(3, [1.0, 2.0, 3.0, 4.0]);
        let mut rng = Pcg64::seed_from_u64(0);
        let unit = Square {
            top_left: (0, 0),
            bottom_left: (0, 1),
            bottom_right: (1, 1),
            top_right: (1, 0),
        };
        Subdivider::new(&mut grid, &mut range, &mut rng, Displacement::Uniform)
            .subdivide(unit, 1.0);
        assert_eq!(grid.computed_count(), 4);
    }

    #[test]
    fn zero_amplitude_gives_plain_averages() {
        // 3×3 with corners (0,0)=0, (0,2)=4, (2,0)=8, (2,2)=12.
        // Top and bottom edges average across the right column's ends as labelled.
        let (mut grid, mut range) = seeded_grid(3, [0.0, 4.0, 8.0, 12.0]);
        let mut rng = Pcg64::seed_from_u64(0);
        Subdivider::new(&mut grid, &mut range, &mut rng, Displacement::Uniform)
            .subdivide(Square::full(3), 0.0);

        assert!(grid.is_complete());
        assert_relative_eq!(grid.value(1, 1), 6.0);
        // top: top_left 0, center 6, top_right (2,2)=12
        assert_relative_eq!(grid.value(1, 0), 6.0);
        // left: top_left 0, center 6, bottom_left 4
        assert_relative_eq!(grid.value(0, 1), (0.0 + 6.0 + 4.0) / 3.0);
        // bottom: bottom_left 4, center 6, bottom_right (2,0)=8
        assert_relative_eq!(grid.value(1, 2), 6.0);
        // right: top_right 12, center 6, bottom_right 8
        assert_relative_eq!(grid.value(2, 1), (12.0 + 6.0 + 8.0) / 3.0);
    }

    #[test]
    fn computed_companion_joins_the_average() {
        // Top-left 2×2 square of a 5×5 grid, with (1,3) already known below its bottom edge.
        let mut grid = HeightGrid::new(5);
        let mut range = RangeTracker::new();
        for &(x, y, v) in &[(0, 0, 1.0), (0, 2, 3.0), (2, 2, 5.0), (2, 0, 7.0), (1, 3, 20.0)] {
            grid.set(x, y, v).unwrap();
        }
        let square = Square {
            top_left: (0, 0),
            bottom_left: (0, 2),
            bottom_right: (2, 2),
            top_right: (2, 0),
        };
        let mut rng = Pcg64::seed_from_u64(0);
        Subdivider::new(&mut grid, &mut range, &mut rng, Displacement::Uniform)
            .subdivide(square, 0.0);

        let center = grid.value(1, 1);
        assert_relative_eq!(center, 4.0);
        // bottom edge: bottom_left, center, bottom_right and the companion at (1,3)
        assert_relative_eq!(grid.value(1, 2), (3.0 + 4.0 + 5.0 + 20.0) / 4.0);
        // right edge: (3,1) is not computed, so three terms
        assert_relative_eq!(grid.value(2, 1), (7.0 + 4.0 + 5.0) / 3.0);
        // top and left companions fall off the grid
        assert_relative_eq!(grid.value(1, 0), (1.0 + 4.0 + 7.0) / 3.0);
        assert_relative_eq!(grid.value(0, 1), (1.0 + 4.0 + 3.0) / 3.0);
    }

    #[test]
    fn flat_grid_stays_flat() {
        // On a 5×5 flat grid with no noise, every point stays flat.
        let (mut grid, mut range) = seeded_grid(5, [2.0; 4]);
        let mut rng = Pcg64::seed_from_u64(0);
        Subdivider::new(&mut grid, &mut range, &mut rng, Displacement::Uniform)
            .subdivide(Square::full(5), 0.0);
        assert!(grid.is_complete());
        assert!(grid.as_slice().iter().all(|&v| v == 2.0));
        assert_eq!(range.range(), Some(0.0));
    }

    #[test]
    fn fills_every_point_for_all_sizes() {
        for k in 1..=7 {
            let size = (1usize << k) + 1;
            let (mut grid, mut range) = seeded_grid(size, [0.3, -0.2, 0.9, -0.7]);
            let mut rng = Pcg64::seed_from_u64(k as u64);
            Subdivider::new(&mut grid, &mut range, &mut rng, Displacement::Modulo)
                .subdivide(Square::full(size), 1.0);
            assert!(grid.is_complete(), "size {} left gaps", size);
        }
    }
}
