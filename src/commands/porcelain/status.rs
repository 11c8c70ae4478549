use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::{Status, StatusInfo};
use colored::Colorize;

impl Repository {
    pub async fn status(&self) -> anyhow::Result<()> {
        let index = self.index();
        let index = index.lock().await;

        let status_info = Status::new(self).initialize(&index)?;

        self.print_branches(&status_info)?;
        self.print_section(
            "Staged Files",
            status_info.staged_files.iter().map(String::to_string),
        )?;
        self.print_section(
            "Removed Files",
            status_info.removed_files.iter().map(String::to_string),
        )?;
        self.print_section(
            "Modifications Not Staged For Commit",
            status_info
                .workspace_changeset
                .iter()
                .map(|(name, change)| format!("{}{}", name, change)),
        )?;
        self.print_section(
            "Untracked Files",
            status_info.untracked_files.iter().map(String::to_string),
        )?;

        Ok(())
    }

    fn print_branches(&self, status_info: &StatusInfo) -> anyhow::Result<()> {
        let branches = status_info.branches.iter().map(|branch| {
            if branch == &status_info.current_branch {
                format!("*{}", branch).green().to_string()
            } else {
                branch.to_string()
            }
        });

        self.print_section("Branches", branches)
    }

    fn print_section(
        &self,
        title: &str,
        lines: impl Iterator<Item = String>,
    ) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "=== {} ===", title)?;
        for line in lines {
            writeln!(writer, "{}", line)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
