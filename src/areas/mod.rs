//! Stateful repository areas
//!
//! - `database`: object store holding every commit and blob
//! - `index`: staging area for the next commit
//! - `refs`: branch table, current branch and head
//! - `repository`: handle tying the areas together for one command
//! - `storage`: persistence of the areas between invocations
//! - `workspace`: working directory access

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod storage;
pub mod workspace;
