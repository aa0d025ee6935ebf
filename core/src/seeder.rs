use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::HeightGrid;
use crate::range::RangeTracker;

// How a random displacement bounded by the current amplitude is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Displacement {
    // One unbiased draw from [-amplitude, amplitude)
    #[default]
    Uniform,
    // (uniform[0,1) % amplitude) with a coin-flip sign.
    // Small magnitudes are overrepresented when amplitude < 1.
    Modulo,
}

impl Displacement {
    // Random offset with magnitude bounded by `amplitude`.
    // A zero amplitude returns 0 and draws nothing from `rng`.
    pub fn offset<R: Rng>(self, rng: &mut R, amplitude: f32) -> f32 {
        if amplitude == 0.0 {
            return 0.0;
        }
        match self {
            Displacement::Uniform => rng.gen_range(-amplitude..amplitude),
            Displacement::Modulo => {
                let magnitude = rng.r#gen::<f32>() % amplitude;
                if rng.r#gen::<bool>() {
                    magnitude
                } else {
                    -magnitude
                }
            }
        }
    }
}

// Assigns the four grid corners and reports them to the tracker.
// Order: (0,0), (0,N-1), (N-1,0), (N-1,N-1) as (x, y).
pub fn seed_corners<R: Rng>(
    grid: &mut HeightGrid,
    range: &mut RangeTracker,
    rng: &mut R,
    displacement: Displacement,
    amplitude: f32,
) -> [f32; 4] {
    let last = grid.size() - 1;
    let corners = [(0, 0), (0, last), (last, 0), (last, last)];
    let mut seeded = [0.0f32; 4];

    for (slot, &(x, y)) in seeded.iter_mut().zip(corners.iter()) {
        let value = displacement.offset(rng, amplitude);
        grid.put(x, y, value);
        range.observe(value);
        *slot = value;
    }
    seeded
}
