use crate::common::command::{init_repository_dir, repository_with_files, run_gitlet_command};
use crate::common::file::{FileSpec, delete_file, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn fresh_repository_has_empty_sections(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(
            "=== Branches ===\n*master\n\n\
             === Staged Files ===\n\n\
             === Removed Files ===\n\n\
             === Modifications Not Staged For Commit ===\n\n\
             === Untracked Files ===\n\n",
        );
}

#[rstest]
fn every_kind_of_change_is_reported(repository_with_files: TempDir) {
    let dir = repository_with_files.path();
    run_gitlet_command(dir, &["branch", "other-branch"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.join("goodbye.txt"), "bye\n".to_string()));
    run_gitlet_command(dir, &["add", "goodbye.txt"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("goodbye.txt"), "changed after add\n".to_string()));
    run_gitlet_command(dir, &["rm", "notwug.txt"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("wug.txt"), "edited\n".to_string()));
    write_file(FileSpec::new(dir.join("random.stuff"), "?\n".to_string()));

    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(
            "=== Branches ===\n*master\nother-branch\n\n\
             === Staged Files ===\ngoodbye.txt\n\n\
             === Removed Files ===\nnotwug.txt\n\n\
             === Modifications Not Staged For Commit ===\ngoodbye.txt (modified)\nwug.txt (modified)\n\n\
             === Untracked Files ===\nrandom.stuff\n\n",
        );
}

#[rstest]
fn deleted_files_are_reported(repository_with_files: TempDir) {
    let dir = repository_with_files.path();
    delete_file(&dir.join("wug.txt"));

    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicates::str::contains(
            "=== Modifications Not Staged For Commit ===\nwug.txt (deleted)\n\n",
        ));
}
