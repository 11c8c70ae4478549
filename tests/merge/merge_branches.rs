use crate::common::command::{
    commit_files, get_head_commit_id, init_repository_dir, run_gitlet_command, stdout_of,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use std::path::Path;

/// `master` and `other` both start from a commit holding f.txt, g.txt, h.txt
#[fixture]
fn forked_repository_dir(init_repository_dir: TempDir) -> TempDir {
    commit_files(
        init_repository_dir.path(),
        &[("f.txt", "base f\n"), ("g.txt", "base g\n"), ("h.txt", "base h\n")],
        "base",
    );
    run_gitlet_command(init_repository_dir.path(), &["branch", "other"])
        .assert()
        .success();

    init_repository_dir
}

fn switch(dir: &Path, branch: &str) {
    run_gitlet_command(dir, &["checkout", branch])
        .assert()
        .success()
        .stdout("");
}

#[rstest]
fn clean_three_way_merge_creates_a_merge_commit(forked_repository_dir: TempDir) {
    let dir = forked_repository_dir.path();
    commit_files(dir, &[("g.txt", "master g\n")], "master work");
    switch(dir, "other");
    run_gitlet_command(dir, &["rm", "h.txt"]).assert().success();
    commit_files(dir, &[("f.txt", "other f\n"), ("k.txt", "new k\n")], "other work");
    switch(dir, "master");

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("f.txt")).as_deref(), Some("other f\n"));
    assert_eq!(read_file(&dir.join("g.txt")).as_deref(), Some("master g\n"));
    assert_eq!(read_file(&dir.join("h.txt")), None);
    assert_eq!(read_file(&dir.join("k.txt")).as_deref(), Some("new k\n"));

    let log = stdout_of(run_gitlet_command(dir, &["log"]));
    assert!(log.starts_with("===\ncommit "));
    assert!(log.contains("Merged other into master.\n"));

    let status = stdout_of(run_gitlet_command(dir, &["status"]));
    assert!(status.contains("=== Staged Files ===\n\n=== Removed Files ===\n\n"));
}

#[rstest]
fn conflicting_changes_get_markers(forked_repository_dir: TempDir) {
    let dir = forked_repository_dir.path();
    commit_files(dir, &[("f.txt", "master f\n")], "master work");
    switch(dir, "other");
    commit_files(dir, &[("f.txt", "other f\n")], "other work");
    switch(dir, "master");

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(&dir.join("f.txt")).as_deref(),
        Some("<<<<<<< HEAD\nmaster f\n=======\nother f\n>>>>>>>\n")
    );
    let log = stdout_of(run_gitlet_command(dir, &["log"]));
    assert!(log.contains("Merged other into master.\n"));
    assert!(log.contains("Merge: "));
}

#[rstest]
fn descendant_branch_is_fast_forwarded(forked_repository_dir: TempDir) {
    let dir = forked_repository_dir.path();
    switch(dir, "other");
    commit_files(dir, &[("f.txt", "other f\n")], "other work");
    let other = get_head_commit_id(dir);
    switch(dir, "master");

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");

    assert_eq!(get_head_commit_id(dir), other);
    assert_eq!(read_file(&dir.join("f.txt")).as_deref(), Some("other f\n"));
    let status = stdout_of(run_gitlet_command(dir, &["status"]));
    assert!(status.contains("*master\n"));
}

#[rstest]
fn ancestor_branch_is_left_alone(forked_repository_dir: TempDir) {
    let dir = forked_repository_dir.path();
    commit_files(dir, &[("f.txt", "master f\n")], "master work");
    let head = get_head_commit_id(dir);

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("Given branch is an ancestor of the current branch.\n");

    assert_eq!(get_head_commit_id(dir), head);
}
