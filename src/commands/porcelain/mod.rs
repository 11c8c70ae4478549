//! Porcelain commands (user-facing gitlet operations)
//!
//! Each command validates all of its preconditions against the in-memory
//! areas before mutating any of them, so a failed command leaves nothing
//! behind to persist.
//!
//! ## Commands
//!
//! - `init`: Create a repository with the initial commit
//! - `add`, `rm`: Stage files for addition or removal
//! - `commit`: Record the staged changes on top of the head
//! - `log`, `global-log`: Show commit history
//! - `find`: Look commits up by message
//! - `status`: Show branches, staging and working tree state
//! - `checkout`: Restore files or switch branches
//! - `branch`, `rm-branch`: Create or delete branch pointers
//! - `reset`: Move the current branch to any commit
//! - `merge`: Merge another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;

#[cfg(test)]
pub(crate) mod fixtures;
