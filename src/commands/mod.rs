//! Command implementations
//!
//! Every user-facing command is a method on
//! [`Repository`](crate::areas::repository::Repository), defined in its own
//! file under `porcelain`.

pub mod porcelain;
