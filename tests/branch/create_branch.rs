use crate::common::command::{
    commit_files, get_head_commit_id, repository_with_files, run_gitlet_command, stdout_of,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn new_branch_starts_at_head_without_switching(repository_with_files: TempDir) {
    let dir = repository_with_files.path();
    let head = get_head_commit_id(dir);

    run_gitlet_command(dir, &["branch", "cool-beans"])
        .assert()
        .success()
        .stdout("");

    let status = stdout_of(run_gitlet_command(dir, &["status"]));
    assert!(status.starts_with("=== Branches ===\ncool-beans\n*master\n\n"));

    commit_files(dir, &[("wug.txt", "moved on\n")], "master only");
    run_gitlet_command(dir, &["checkout", "cool-beans"])
        .assert()
        .success();
    assert_eq!(get_head_commit_id(dir), head);
}

#[rstest]
#[case("master", "A branch with that name already exists.\n")]
#[case("two words", "Invalid branch name: two words\n")]
fn invalid_branches_are_refused(
    repository_with_files: TempDir,
    #[case] name: &str,
    #[case] expected: &str,
) {
    run_gitlet_command(repository_with_files.path(), &["branch", name])
        .assert()
        .success()
        .stdout(expected.to_string());
}
