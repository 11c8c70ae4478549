//! gitlet data structures and algorithms
//!
//! - `branch`: Branch name validation
//! - `checkout`: Checkout planning and untracked-file conflict detection
//! - `core`: Shared output utilities (pager wrapper)
//! - `index`: Staging file format
//! - `log`: Commit history traversal
//! - `merge`: Split point search and three-way resolution
//! - `objects`: Content objects (blob, commit) and their ids
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
