//! Working tree status inspection
//!
//! This module analyzes the state of the working directory by comparing it
//! against the staging area and the head commit.
//!
//! ## Components
//!
//! - `file_change`: how a working file differs from what would be committed
//! - `inspector`: per-file comparisons against the working tree
//! - `status_info`: the sections `status` prints

pub mod file_change;
pub mod inspector;
pub mod status_info;
