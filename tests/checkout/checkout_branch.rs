use crate::common::command::{
    commit_files, get_head_commit_id, repository_with_files, run_gitlet_command, stdout_of,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn switching_branches_swaps_tracked_files(repository_with_files: TempDir) {
    let dir = repository_with_files.path();
    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    commit_files(dir, &[("wug.txt", "master wug\n"), ("master.txt", "m\n")], "master work");
    let master = get_head_commit_id(dir);

    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("wug.txt")).as_deref(), Some("This is a wug.\n"));
    assert_eq!(read_file(&dir.join("master.txt")), None);
    assert!(stdout_of(run_gitlet_command(dir, &["status"])).starts_with("=== Branches ===\nmaster\n*other\n"));

    run_gitlet_command(dir, &["checkout", "master"]).assert().success();
    assert_eq!(get_head_commit_id(dir), master);
    assert_eq!(read_file(&dir.join("master.txt")).as_deref(), Some("m\n"));
}

#[rstest]
fn untracked_file_in_the_way_aborts_the_switch(repository_with_files: TempDir) {
    let dir = repository_with_files.path();
    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    commit_files(dir, &[("master.txt", "m\n")], "master work");
    run_gitlet_command(dir, &["checkout", "other"]).assert().success();
    write_file(FileSpec::new(dir.join("master.txt"), "precious\n".to_string()));
    write_file(FileSpec::new(dir.join("wug.txt"), "edited\n".to_string()));

    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it, or add and commit it first.\n");

    // nothing was touched
    assert_eq!(read_file(&dir.join("master.txt")).as_deref(), Some("precious\n"));
    assert_eq!(read_file(&dir.join("wug.txt")).as_deref(), Some("edited\n"));
    assert!(stdout_of(run_gitlet_command(dir, &["status"])).contains("*other\n"));
}
