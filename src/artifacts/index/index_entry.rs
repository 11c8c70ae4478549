//! Staging entry representation
//!
//! An entry pairs a working file name with the blob captured for it.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use byteorder::{ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

/// Size of the name length prefix
pub const NAME_LENGTH_SIZE: usize = 2;

/// Size of the packed blob length prefix
pub const BLOB_LENGTH_SIZE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    pub name: String,
    pub blob: Blob,
}

impl Packable for IndexEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let name_length = u16::try_from(self.name.len())
            .with_context(|| format!("File name too long to stage: {}", self.name))?;
        let blob_bytes = self.blob.serialize()?;
        let blob_length = u32::try_from(blob_bytes.len())
            .with_context(|| format!("File too large to stage: {}", self.name))?;

        let mut entry_bytes = Vec::new();
        entry_bytes.write_u16::<byteorder::NetworkEndian>(name_length)?;
        entry_bytes.write_all(self.name.as_bytes())?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(blob_length)?;
        entry_bytes.write_all(&blob_bytes)?;

        Ok(Bytes::from(entry_bytes))
    }
}

impl Unpackable for IndexEntry {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let name_length = reader.read_u16::<byteorder::NetworkEndian>()? as usize;
        let mut name = vec![0; name_length];
        reader.read_exact(&mut name)?;
        let name = String::from_utf8(name).context("Invalid UTF-8 in entry name")?;

        let blob_length = reader.read_u32::<byteorder::NetworkEndian>()? as u64;
        let mut blob_reader = reader.take(blob_length);
        let (object_type, size) = ObjectType::parse_header(&mut blob_reader)?;
        if object_type != ObjectType::Blob {
            anyhow::bail!("Staged entry {} does not hold a blob", name);
        }

        let blob = Blob::deserialize(blob_reader)?;
        if blob.content().len() != size {
            anyhow::bail!("Staged blob for {} is truncated", name);
        }

        Ok(IndexEntry { name, blob })
    }
}
