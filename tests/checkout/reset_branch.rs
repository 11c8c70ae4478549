use crate::common::command::{
    commit_files, get_head_commit_id, repository_with_files, run_gitlet_command, stdout_of,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn reset_moves_the_current_branch_back(repository_with_files: TempDir) {
    let dir = repository_with_files.path();
    let first = get_head_commit_id(dir);
    commit_files(dir, &[("wug.txt", "v2\n"), ("extra.txt", "e\n")], "second");

    run_gitlet_command(dir, &["reset", &first])
        .assert()
        .success()
        .stdout("");

    assert_eq!(get_head_commit_id(dir), first);
    assert_eq!(read_file(&dir.join("wug.txt")).as_deref(), Some("This is a wug.\n"));
    assert_eq!(read_file(&dir.join("extra.txt")), None);

    // the abandoned commit is still reachable through global-log
    let global_log = stdout_of(run_gitlet_command(dir, &["global-log"]));
    assert!(global_log.contains("second"));
}

#[rstest]
fn reset_to_an_unknown_commit_is_refused(repository_with_files: TempDir) {
    run_gitlet_command(repository_with_files.path(), &["reset", "fedcba9876"])
        .assert()
        .success()
        .stdout("No commit with that id exists.\n");
}
