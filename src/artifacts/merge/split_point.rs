//! Split point finder for merge operations
//!
//! The split point of two branch heads is the common ancestor a three-way merge
//! compares both heads against. Commits can have two parents (merge commits),
//! so the history is a DAG and two heads may share several common ancestors.
//!
//! ## Algorithm Overview
//!
//! 1. A breadth-first traversal from each head, following *both* parent edges,
//!    records the distance (in edges) from that head to every ancestor
//! 2. A commit visited from both heads is a common ancestor
//! 3. The split point is the common ancestor with the smallest combined
//!    distance; ties go to the one closer to the current head, then to the
//!    lexicographically smallest id, so the result is deterministic
//!
//! ## Usage
//!
//! ```rust,ignore
//! let finder = SplitPointFinder::new(|commit_id| database.slim_commit(commit_id));
//!
//! let split_point = finder.find_split_point(&current_head, &given_head);
//! ```
//!
//! ## Debug Logging
//!
//! The traversal emits `trace` events for every visited commit and a `debug`
//! event with the chosen split point. Building with the `debug_merge` feature
//! turns the `trace` level on for this module by default.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, VecDeque};
use std::fmt;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_CURRENT = 0b01;
        const VISITED_FROM_GIVEN = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_CURRENT.bits() | Self::VISITED_FROM_GIVEN.bits();
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_CURRENT) {
            flags.push("CURRENT");
        }
        if self.contains(VisitState::VISITED_FROM_GIVEN) {
            flags.push("GIVEN");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

/// Shortest distances from both heads to one ancestor
#[derive(Debug, Clone, Copy)]
struct AncestorState {
    visits: VisitState,
    from_current: usize,
    from_given: usize,
}

impl AncestorState {
    fn unvisited() -> Self {
        Self {
            visits: VisitState::NONE,
            from_current: 0,
            from_given: 0,
        }
    }

    fn record(&mut self, side: VisitState, distance: usize) {
        self.visits |= side;
        if side == VisitState::VISITED_FROM_CURRENT {
            self.from_current = distance;
        } else {
            self.from_given = distance;
        }
    }

    /// Ordering key: combined distance, then distance from the current head
    fn rank(&self) -> (usize, usize) {
        (self.from_current + self.from_given, self.from_current)
    }
}

/// Finds the split point of two commits
///
/// # Type Parameters
///
/// * `CommitLoaderFn` - Loads the parent links of a commit. Returning `None`
///   for an unknown id makes the traversal treat that commit as a root.
#[derive(Debug, Clone)]
pub struct SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> Option<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> Option<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Finds the split point between the current head and the given head
    ///
    /// # Returns
    ///
    /// - `Some(ObjectId)` - the closest common ancestor (a head itself when one
    ///   head is an ancestor of the other)
    /// - `None` - the two histories share no commit
    pub fn find_split_point(&self, current: &ObjectId, given: &ObjectId) -> Option<ObjectId> {
        let mut ancestors = HashMap::<ObjectId, AncestorState>::new();

        self.walk(current, VisitState::VISITED_FROM_CURRENT, &mut ancestors);
        self.walk(given, VisitState::VISITED_FROM_GIVEN, &mut ancestors);

        let split_point = ancestors
            .into_iter()
            .filter(|(_, state)| state.visits.contains(VisitState::VISITED_FROM_BOTH))
            .min_by(|(left_oid, left), (right_oid, right)| {
                left.rank()
                    .cmp(&right.rank())
                    .then_with(|| left_oid.cmp(right_oid))
            });

        match split_point {
            Some((oid, state)) => {
                tracing::debug!(
                    %current,
                    %given,
                    split_point = %oid,
                    from_current = state.from_current,
                    from_given = state.from_given,
                    "split point found"
                );
                Some(oid)
            }
            None => {
                tracing::debug!(%current, %given, "no common ancestor");
                None
            }
        }
    }

    /// Breadth-first traversal over both parent edges
    ///
    /// The queue is FIFO, so the first visit of a commit from `side` carries
    /// its shortest distance from the starting head.
    fn walk(
        &self,
        start: &ObjectId,
        side: VisitState,
        ancestors: &mut HashMap<ObjectId, AncestorState>,
    ) {
        let mut queue = VecDeque::from([(start.clone(), 0usize)]);

        while let Some((oid, distance)) = queue.pop_front() {
            let state = ancestors
                .entry(oid.clone())
                .or_insert_with(AncestorState::unvisited);
            if state.visits.contains(side) {
                continue;
            }
            state.record(side, distance);

            tracing::trace!(commit = %oid, distance, visits = ?state.visits, "visiting");

            match (self.commit_loader)(&oid) {
                Some(commit) => queue.extend(
                    commit
                        .parents
                        .into_iter()
                        .map(|parent| (parent, distance + 1)),
                ),
                None => tracing::warn!(commit = %oid, "commit missing from history"),
            }
        }
    }
}
