//! Checkout operations and conflict handling
//!
//! This module handles replacing the working tree with another commit by:
//! - Computing the file actions between the head commit and the target
//! - Detecting untracked files the checkout would clobber
//! - Executing the file system changes and clearing the staging area
//!
//! Checkout operations are designed to be safe, detecting all conflicts
//! before making any changes to the working directory.

pub mod conflict;
pub mod migration;
