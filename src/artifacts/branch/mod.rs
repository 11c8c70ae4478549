//! Branch names
//!
//! The branch table is persisted as line-oriented text, so names are
//! validated up front with git's own rules for ref names.

pub mod branch_name;

/// Name the repository's first branch gets on `init`
pub const DEFAULT_BRANCH: &str = "master";

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
