use crate::common::command::{commit_files, init_repository_dir, run_gitlet_command};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_preconditions_are_checked(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    commit_files(dir, &[("f.txt", "f\n")], "base");
    run_gitlet_command(dir, &["branch", "other"]).assert().success();

    run_gitlet_command(dir, &["merge", "master"])
        .assert()
        .success()
        .stdout("Cannot merge a branch with itself.\n");
    run_gitlet_command(dir, &["merge", "ghost"])
        .assert()
        .success()
        .stdout("A branch with that name does not exist.\n");

    write_file(FileSpec::new(dir.join("g.txt"), "g\n".to_string()));
    run_gitlet_command(dir, &["add", "g.txt"]).assert().success();
    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("You have uncommitted changes.\n");
}

#[rstest]
fn untracked_file_in_the_way_aborts_the_merge(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    commit_files(dir, &[("f.txt", "base\n")], "base");
    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    commit_files(dir, &[("f.txt", "master\n")], "master work");
    run_gitlet_command(dir, &["checkout", "other"]).assert().success();
    commit_files(dir, &[("new.txt", "other\n")], "other work");
    run_gitlet_command(dir, &["checkout", "master"]).assert().success();
    write_file(FileSpec::new(dir.join("new.txt"), "precious\n".to_string()));

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it, or add and commit it first.\n");

    assert_eq!(read_file(&dir.join("new.txt")).as_deref(), Some("precious\n"));
    assert_eq!(read_file(&dir.join("f.txt")).as_deref(), Some("master\n"));
}
