use crate::common::command::{
    commit_files, get_head_commit_id, repository_with_files, run_gitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn file_is_restored_from_head(repository_with_files: TempDir) {
    let dir = repository_with_files.path();
    write_file(FileSpec::new(dir.join("wug.txt"), "scribbles\n".to_string()));

    run_gitlet_command(dir, &["checkout", "--", "wug.txt"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("wug.txt")).as_deref(), Some("This is a wug.\n"));
}

#[rstest]
fn file_is_restored_from_an_abbreviated_commit(repository_with_files: TempDir) {
    let dir = repository_with_files.path();
    let first = get_head_commit_id(dir);
    commit_files(dir, &[("wug.txt", "version two\n")], "v2");

    run_gitlet_command(dir, &["checkout", &first[..6], "--", "wug.txt"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("wug.txt")).as_deref(), Some("This is a wug.\n"));
}

#[rstest]
#[case(&["checkout", "0123456789", "--", "wug.txt"], "No commit with that id exists.\n")]
#[case(&["checkout", "--", "absent.txt"], "File does not exist in that commit.\n")]
#[case(&["checkout", "nowhere"], "No such branch exists.\n")]
#[case(&["checkout", "master"], "No need to checkout the current branch.\n")]
#[case(&["checkout", "master", "wug.txt"], "Incorrect operands.\n")]
fn checkout_errors(repository_with_files: TempDir, #[case] args: &[&str], #[case] expected: &str) {
    run_gitlet_command(repository_with_files.path(), args)
        .assert()
        .success()
        .stdout(expected.to_string());
}
