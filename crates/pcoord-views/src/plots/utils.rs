//! Utilities for plot views

pub mod stats;

pub use stats::{column_means, mean, min_max};
