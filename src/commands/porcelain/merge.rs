use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::merge::resolution::{MergeAction, MergePlan, conflict_content};
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use bytes::Bytes;

const ANCESTOR_NOTICE: &str = "Given branch is an ancestor of the current branch.";
const FAST_FORWARD_NOTICE: &str = "Current branch fast-forwarded.";
const CONFLICT_NOTICE: &str = "Encountered a merge conflict.";

impl Repository {
    /// Merge the head of branch `given` into the current branch
    pub async fn merge(&mut self, given: &str) -> anyhow::Result<()> {
        let index = self.index();

        if !index.lock().await.is_empty() {
            return Err(GitletError::UncommittedChanges.into());
        }

        let (given_branch, given_oid) = self
            .refs()
            .find_branch(given)
            .ok_or(GitletError::BranchNotFound)?;
        if self.refs().is_current_branch(&given_branch) {
            return Err(GitletError::SelfMerge.into());
        }

        let current_oid = self.refs().read_head().clone();
        let split_oid = self.find_split_point(&current_oid, &given_oid)?;

        if split_oid == given_oid {
            writeln!(self.writer(), "{}", ANCESTOR_NOTICE)?;
            return Ok(());
        }

        if split_oid == current_oid {
            self.checkout_commit(&given_oid).await?;
            self.refs_mut().update_head(given_oid.clone());
            tracing::debug!(oid = %given_oid, "fast-forward");
            writeln!(self.writer(), "{}", FAST_FORWARD_NOTICE)?;
            return Ok(());
        }

        let mut index = index.lock().await;

        let plan = {
            let split = self.database().get(&split_oid)?;
            let current = self.head_commit()?;
            let given = self.database().get(&given_oid)?;

            MergePlan::verify_untracked(self.workspace(), current.files(), given.files())?;
            MergePlan::new(split.files(), current.files(), given.files())
        };

        self.apply_merge_plan(&plan, &mut index)?;
        tracing::debug!(conflicts = plan.conflicts(), "merge plan applied");

        let message = format!(
            "Merged {} into {}.",
            given_branch,
            self.refs().current_branch()
        );
        self.write_commit(&mut index, &message, Some(given_oid))?;

        Ok(())
    }

    fn find_split_point(&self, current: &ObjectId, given: &ObjectId) -> anyhow::Result<ObjectId> {
        let database = self.database();
        let finder = SplitPointFinder::new(|oid: &ObjectId| database.slim_commit(oid));

        finder.find_split_point(current, given).ok_or_else(|| {
            anyhow::anyhow!("No common ancestor between {} and {}", current, given)
        })
    }

    fn apply_merge_plan(&self, plan: &MergePlan, index: &mut Index) -> anyhow::Result<()> {
        let head = self.head_commit()?;

        for (name, action) in plan.actions() {
            match action {
                MergeAction::TakeGiven(blob_id) => {
                    let blob = self.database().blob(blob_id)?;
                    self.workspace().write_file(name, blob.content())?;
                    index.stage_add(name, blob.clone());
                }
                MergeAction::Remove => {
                    if let Some(blob_id) = head.blob_id(name) {
                        let blob = self.database().blob(blob_id)?;
                        index.stage_remove(name, blob.clone());
                    }
                    self.workspace().delete_file(name)?;
                }
                MergeAction::Conflict {
                    current: ours,
                    given: theirs,
                } => {
                    let ours = ours.as_ref().map(|oid| self.database().blob(oid)).transpose()?;
                    let theirs = theirs
                        .as_ref()
                        .map(|oid| self.database().blob(oid))
                        .transpose()?;

                    let content = conflict_content(
                        ours.map(|blob| blob.content().as_ref()),
                        theirs.map(|blob| blob.content().as_ref()),
                    );
                    self.workspace().write_file(name, &content)?;
                    index.stage_add(name, Blob::new(Bytes::from(content)));

                    writeln!(self.writer(), "{}", CONFLICT_NOTICE)?;
                }
                MergeAction::Keep => {}
            }
        }

        Ok(())
    }
}
