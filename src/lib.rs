//! gitlet: a small local version-control system
//!
//! The crate is split the same way a repository is:
//!
//! - `areas`: the stateful parts of a repository (object store, staging area,
//!   branch table, storage backends, working tree)
//! - `artifacts`: data structures and algorithms (objects, staging codec,
//!   checkout planning, split point search, merge resolution, status, log)
//! - `commands`: user-facing commands, implemented on [`areas::repository::Repository`]
//! - `errors`: the user-facing failure taxonomy

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
