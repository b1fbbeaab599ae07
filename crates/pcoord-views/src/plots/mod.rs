//! Plot view implementations

pub mod parallel_coordinates;
pub mod utils;

pub use parallel_coordinates::{ParallelCoordinatesOptions, ParallelCoordinatesPlot};
