use crate::common::command::{
    get_head_commit_id, gitlet_commit, init_repository_dir, repository_with_files,
    run_gitlet_command, stdout_of,
};
use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn added_files_are_committed(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let files = write_generated_files(dir, 3);

    for file in &files {
        let name = file.path.file_name().unwrap().to_str().unwrap();
        run_gitlet_command(dir, &["add", name]).assert().success().stdout("");
    }
    let initial = get_head_commit_id(dir);

    gitlet_commit(dir, "three files").assert().success().stdout("");

    let log = stdout_of(run_gitlet_command(dir, &["log"]));
    let ids = crate::common::commit_ids(&log);
    assert_eq!(ids.len(), 2);
    assert_eq!(ids[1], initial);
    assert!(log.contains("three files"));
}

#[rstest]
fn missing_file_cannot_be_added(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["add", "ghost.txt"])
        .assert()
        .success()
        .stdout("File does not exist.\n");
}

#[rstest]
fn commit_without_changes_is_refused(repository_with_files: TempDir) {
    let dir = repository_with_files.path();
    let head = get_head_commit_id(dir);

    gitlet_commit(dir, "nothing")
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");

    // re-adding unchanged content stages nothing either
    run_gitlet_command(dir, &["add", "wug.txt"]).assert().success();
    gitlet_commit(dir, "still nothing")
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");

    assert_eq!(get_head_commit_id(dir), head);
}

#[rstest]
fn commit_needs_a_message(repository_with_files: TempDir) {
    let dir = repository_with_files.path();
    write_file(FileSpec::new(dir.join("wug.txt"), "changed\n".to_string()));
    run_gitlet_command(dir, &["add", "wug.txt"]).assert().success();

    gitlet_commit(dir, "")
        .assert()
        .success()
        .stdout("Please enter a commit message.\n");
}

#[rstest]
fn state_survives_between_invocations(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("f.txt"), "f\n".to_string()));
    run_gitlet_command(dir, &["add", "f.txt"]).assert().success();

    let status = stdout_of(run_gitlet_command(dir, &["status"]));
    assert!(status.contains("=== Staged Files ===\nf.txt\n"));

    gitlet_commit(dir, "add f").assert().success().stdout("");
    let status = stdout_of(run_gitlet_command(dir, &["status"]));
    assert!(status.contains("=== Staged Files ===\n\n"));
}
