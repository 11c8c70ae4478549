//! User-facing failures
//!
//! Every variant renders as the exact single-line message printed to the user.
//! Infrastructure failures (I/O, corrupt state) stay as plain `anyhow` errors
//! with context attached; commands return `anyhow::Result` and the binary
//! downcasts to [`GitletError`] to tell the two apart.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GitletError {
    // usage
    #[error("Please enter a command.")]
    NoCommand,
    #[error("No command with that name exists.")]
    UnknownCommand,
    #[error("Incorrect operands.")]
    IncorrectOperands,

    // preconditions
    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,
    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,
    #[error("File does not exist.")]
    FileNotFound,
    #[error("Please enter a commit message.")]
    EmptyMessage,
    #[error("No changes added to the commit.")]
    NoChanges,
    #[error("No reason to remove the file.")]
    NothingToRemove,
    #[error("Found no commit with that message.")]
    NoCommitWithMessage,
    #[error("No commit with that id exists.")]
    NoSuchCommit,
    #[error("Commit id prefix {0} is ambiguous.")]
    AmbiguousId(String),
    #[error("File does not exist in that commit.")]
    FileNotInCommit,
    /// Checkout wording
    #[error("No such branch exists.")]
    NoSuchBranch,
    /// Branch removal and merge wording
    #[error("A branch with that name does not exist.")]
    BranchNotFound,
    #[error("No need to checkout the current branch.")]
    AlreadyCurrent,
    #[error("A branch with that name already exists.")]
    BranchExists,
    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),
    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrent,
    #[error("You have uncommitted changes.")]
    UncommittedChanges,
    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    // working tree
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileWouldBeOverwritten,
}
