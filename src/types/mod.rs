//! Core value types shared by the pipeline stages.

mod colour;
mod options;

pub use colour::Colour;
pub(crate) use colour::{distance_sq, tolerance_sq};
pub use options::{
    default_size_policy, ProcessingOptions, SizePolicy, DEFAULT_FRINGE_PASSES,
    DEFAULT_FRINGE_TOLERANCE, DEFAULT_PADDING, DEFAULT_TOLERANCE,
};
