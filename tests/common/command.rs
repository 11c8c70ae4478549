use crate::common::COMMIT_DATE;
use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout("");

    repository_dir
}

/// Repository whose master holds `wug.txt` and `notwug.txt` in one commit
#[fixture]
pub fn repository_with_files(init_repository_dir: TempDir) -> TempDir {
    commit_files(
        init_repository_dir.path(),
        &[("wug.txt", "This is a wug.\n"), ("notwug.txt", "This is not a wug.\n")],
        "two files",
    );

    init_repository_dir
}

pub fn run_gitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("GITLET_COMMIT_DATE", COMMIT_DATE)]);
    cmd.env_remove("GITLET_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn gitlet_commit(dir: &Path, message: &str) -> Command {
    run_gitlet_command(dir, &["commit", message])
}

/// Write, add and commit `files`
pub fn commit_files(dir: &Path, files: &[(&str, &str)], message: &str) {
    for (name, content) in files {
        write_file(FileSpec::new(dir.join(name), content.to_string()));
        run_gitlet_command(dir, &["add", name])
            .assert()
            .success()
            .stdout("");
    }

    gitlet_commit(dir, message).assert().success().stdout("");
}

pub fn stdout_of(mut cmd: Command) -> String {
    let output = cmd.output().expect("Failed to run gitlet");
    assert!(output.status.success(), "gitlet exited with {}", output.status);

    String::from_utf8(output.stdout).expect("gitlet printed invalid UTF-8")
}

/// Id of the head commit, read from the first entry of `log`
pub fn get_head_commit_id(dir: &Path) -> String {
    let log = stdout_of(run_gitlet_command(dir, &["log"]));

    crate::common::commit_ids(&log)
        .into_iter()
        .next()
        .expect("log printed no commit")
}
