use crate::common::command::{init_repository_dir, run_gitlet_command, stdout_of};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn deleted_branch_disappears_from_status(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "feature"]).assert().success();

    run_gitlet_command(dir, &["rm-branch", "feature"])
        .assert()
        .success()
        .stdout("");

    let status = stdout_of(run_gitlet_command(dir, &["status"]));
    assert!(status.starts_with("=== Branches ===\n*master\n\n"));
}

#[rstest]
#[case("master", "Cannot remove the current branch.\n")]
#[case("ghost", "A branch with that name does not exist.\n")]
fn undeletable_branches(init_repository_dir: TempDir, #[case] name: &str, #[case] expected: &str) {
    run_gitlet_command(init_repository_dir.path(), &["rm-branch", name])
        .assert()
        .success()
        .stdout(expected.to_string());
}
