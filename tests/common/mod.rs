#![allow(dead_code)]

pub mod command;
pub mod file;

/// Fixed date for commits made by the tests
pub const COMMIT_DATE: &str = "2024-03-01 12:00:00 +0000";

/// Lines of `text` that start with `commit `, with the prefix stripped
pub fn commit_ids(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .collect()
}
