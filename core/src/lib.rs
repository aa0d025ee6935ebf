// core holds the diamond–square fractal engine and its grid bookkeeping
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod range;
pub mod seeder;
pub mod subdivide;
pub mod utils;

pub use config::FractalConfig;
pub use engine::FractalEngine;
pub use error::{FractalError, FractalResult};
pub use grid::HeightGrid;
pub use range::RangeTracker;
pub use seeder::Displacement;
pub use subdivide::{Point, Square, Subdivider};
pub use utils::{HeightMap2D, flatten2};
