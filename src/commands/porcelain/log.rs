use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// History of the head commit along primary parents
    pub fn log(&self) -> anyhow::Result<()> {
        let head = self.refs().read_head().clone();

        for entry in RevList::new(self.database(), head) {
            let (commit_oid, commit) = entry?;
            self.show_commit(&commit_oid, commit)?;
        }

        Ok(())
    }

    /// Every commit ever made, newest first
    pub fn global_log(&self) -> anyhow::Result<()> {
        let mut commits = self.database().commits().collect::<Vec<_>>();
        commits.sort_by(|(a_oid, a), (b_oid, b)| {
            b.timestamp()
                .cmp(&a.timestamp())
                .then_with(|| a_oid.cmp(b_oid))
        });

        for (commit_oid, commit) in commits {
            self.show_commit(commit_oid, commit)?;
        }

        Ok(())
    }

    fn show_commit(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {}", commit_oid)?;
        if let (Some(parent), Some(merge_parent)) = (commit.parent(), commit.merge_parent()) {
            writeln!(
                writer,
                "Merge: {} {}",
                parent.to_short_oid(),
                merge_parent.to_short_oid()
            )?;
        }
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
