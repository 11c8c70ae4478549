use crate::common::command::{repository_dir, run_gitlet_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
#[case(&[], "Please enter a command.\n")]
#[case(&["hello"], "No command with that name exists.\n")]
#[case(&["add"], "Incorrect operands.\n")]
#[case(&["commit", "one", "two"], "Incorrect operands.\n")]
#[case(&["log", "extra"], "Incorrect operands.\n")]
#[case(&["checkout"], "Incorrect operands.\n")]
#[case(&["checkout", "--", "a.txt", "b.txt"], "Incorrect operands.\n")]
fn usage_errors_print_one_line(
    repository_dir: TempDir,
    #[case] args: &[&str],
    #[case] expected: &str,
) {
    run_gitlet_command(repository_dir.path(), args)
        .assert()
        .success()
        .stdout(expected.to_string());
}

#[rstest]
fn help_is_printed_by_clap(repository_dir: TempDir) {
    run_gitlet_command(repository_dir.path(), &["--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("merge"));
}
