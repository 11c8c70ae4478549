//! Merge algorithms
//!
//! - `split_point`: closest common ancestor of two branch heads
//! - `resolution`: per-file three-way decisions against that ancestor

pub mod resolution;
pub mod split_point;
