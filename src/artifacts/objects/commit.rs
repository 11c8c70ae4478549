//! Commit object
//!
//! A commit is an immutable snapshot: the full mapping from file name to blob
//! id, a message, a timestamp and up to two parent links (the primary parent
//! and, for merge commits, the merged-in branch head). Its id is the SHA-1 of
//! the serialized form below, so every field participates in the identity.
//!
//! ## Format
//!
//! ```text
//! commit <size>\0
//! parent <parent-sha>        (absent on the initial commit)
//! merge <merge-parent-sha>   (merge commits only)
//! date <unix-seconds> <+hhmm>
//! file <blob-sha> <name>     (one per tracked file, sorted by name)
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable, with_header};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::BTreeMap;
use std::io::BufRead;

/// Message of the commit every repository starts from
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Environment variable pinning the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "GITLET_COMMIT_DATE";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// File name to blob id mapping of a commit
pub type Snapshot = BTreeMap<String, ObjectId>;

/// Slim representation of a commit
///
/// Contains only what the split point search needs: the commit id and the
/// ids of both parents.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    /// The commit's object ID
    pub oid: ObjectId,
    /// The commit's parent object IDs (primary first)
    pub parents: Vec<ObjectId>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    parent: Option<ObjectId>,
    merge_parent: Option<ObjectId>,
    timestamp: DateTime<FixedOffset>,
    files: Snapshot,
    message: String,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        merge_parent: Option<ObjectId>,
        timestamp: DateTime<FixedOffset>,
        files: Snapshot,
        message: String,
    ) -> Self {
        Commit {
            parent,
            merge_parent,
            timestamp,
            files,
            message,
        }
    }

    /// The root commit: no parents, no files, dated at the Unix epoch
    ///
    /// Every repository gets the same initial commit, hence the same id.
    pub fn initial() -> Self {
        Commit::new(
            None,
            None,
            DateTime::<Utc>::UNIX_EPOCH.fixed_offset(),
            Snapshot::new(),
            INITIAL_COMMIT_MESSAGE.to_string(),
        )
    }

    /// A commit on top of `parent`, dated now (or at `GITLET_COMMIT_DATE`)
    pub fn child(
        parent: ObjectId,
        merge_parent: Option<ObjectId>,
        files: Snapshot,
        message: String,
    ) -> Self {
        Commit::new(
            Some(parent),
            merge_parent,
            Self::timestamp_from_env(),
            files,
            message,
        )
    }

    /// Timestamp for a new commit
    ///
    /// Reads `GITLET_COMMIT_DATE` (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`) and falls
    /// back to the current local time.
    pub fn timestamp_from_env() -> DateTime<FixedOffset> {
        std::env::var(COMMIT_DATE_ENV)
            .ok()
            .and_then(|date_str| {
                DateTime::parse_from_rfc2822(&date_str)
                    .or_else(|_| DateTime::parse_from_str(&date_str, DATE_FORMAT))
                    .ok()
            })
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn merge_parent(&self) -> Option<&ObjectId> {
        self.merge_parent.as_ref()
    }

    pub fn parents(&self) -> Vec<ObjectId> {
        self.parent
            .iter()
            .chain(self.merge_parent.iter())
            .cloned()
            .collect()
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn files(&self) -> &Snapshot {
        &self.files
    }

    pub fn blob_id(&self, name: &str) -> Option<&ObjectId> {
        self.files.get(name)
    }

    pub fn tracks(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    /// Format timestamp the way `log` prints it
    ///
    /// # Returns
    ///
    /// String like "Thu Jan 01 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format("%a %b %d %H:%M:%S %Y %z").to_string()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        if let Some(parent) = &self.parent {
            object_content.push(format!("parent {}", parent));
        }
        if let Some(merge_parent) = &self.merge_parent {
            object_content.push(format!("merge {}", merge_parent));
        }
        object_content.push(format!(
            "date {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (name, blob_id) in &self.files {
            object_content.push(format!("file {} {}", blob_id, name));
        }
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        let object_content = object_content.join("\n");

        Ok(with_header(self.object_type(), object_content.as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (headers, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parent = None;
        let mut merge_parent = None;
        let mut timestamp = None;
        let mut files = Snapshot::new();

        for line in headers.lines() {
            let (field, value) = line
                .split_once(' ')
                .with_context(|| format!("Invalid commit object: malformed line {line:?}"))?;

            match field {
                "parent" => parent = Some(ObjectId::try_parse(value.to_string())?),
                "merge" => merge_parent = Some(ObjectId::try_parse(value.to_string())?),
                "date" => {
                    timestamp = Some(
                        DateTime::parse_from_str(value, "%s %z")
                            .context("Invalid commit object: invalid date line")?,
                    )
                }
                "file" => {
                    let (blob_id, name) = value
                        .split_once(' ')
                        .context("Invalid commit object: invalid file line")?;
                    files.insert(name.to_string(), ObjectId::try_parse(blob_id.to_string())?);
                }
                _ => anyhow::bail!("Invalid commit object: unknown field {field}"),
            }
        }

        let timestamp = timestamp.context("Invalid commit object: missing date line")?;

        Ok(Self::new(
            parent,
            merge_parent,
            timestamp,
            files,
            message.to_string(),
        ))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
