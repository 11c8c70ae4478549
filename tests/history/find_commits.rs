use crate::common::command::{
    commit_files, get_head_commit_id, init_repository_dir, run_gitlet_command, stdout_of,
};
use crate::common::commit_ids;
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn find_prints_matching_commit_ids(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    commit_files(dir, &[("f.txt", "f\n")], "add f");
    let head = get_head_commit_id(dir);

    run_gitlet_command(dir, &["find", "add f"])
        .assert()
        .success()
        .stdout(format!("{}\n", head));

    let initial = commit_ids(&stdout_of(run_gitlet_command(dir, &["log"])))
        .pop()
        .unwrap();
    run_gitlet_command(dir, &["find", "initial commit"])
        .assert()
        .success()
        .stdout(format!("{}\n", initial));
}

#[rstest]
fn find_reports_unknown_messages(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["find", "never written"])
        .assert()
        .success()
        .stdout("Found no commit with that message.\n");
}
