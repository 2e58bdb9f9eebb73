//! Command implementations for each file format

pub mod cmp;
pub mod style;
