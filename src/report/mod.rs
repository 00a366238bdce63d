//! Report rendering.

pub mod generator;
pub mod text;

pub use generator::*;
