//! Commit history traversal for `log`
//!
//! - `rev_list`: walk from a commit back to the root along primary parents

pub mod rev_list;
