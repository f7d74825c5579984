//! Writes decoded patches to an output directory.
//!
//! Each patch lands in its own `.sysex` file holding the raw response, and the
//! packed parameter blocks are gathered into `patch_lookup.json`, keyed by name.
//! Existing files are never overwritten.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use deepdump_sysex::PatchRecord;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::{Formatter, PrettyFormatter};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

pub const INDEX_FILE_NAME: &str = "patch_lookup.json";

/// Patch name to base64 packed block, in first-seen order.
///
/// Inserting a name that is already present replaces the value but keeps the
/// entry where it was first inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchIndex {
    entries: Vec<(String, String)>,
}

impl PatchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `name`, returning the replaced value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for PatchIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl PatchIndex {
    /// Writes the index as JSON with a two-space indent and no trailing newline.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        let mut ser = serde_json::Serializer::with_formatter(writer, IndexFormatter::new());
        self.serialize(&mut ser)?;
        Ok(())
    }

    pub fn to_json_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_json(&mut buf)?;
        // Only ASCII escapes are added to valid UTF-8 input.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Pretty printer that also escapes DEL, which serde_json leaves raw.
struct IndexFormatter(PrettyFormatter<'static>);

impl IndexFormatter {
    fn new() -> Self {
        Self(PrettyFormatter::with_indent(b"  "))
    }
}

impl Formatter for IndexFormatter {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut parts = fragment.split('\x7f');
        if let Some(first) = parts.next() {
            writer.write_all(first.as_bytes())?;
        }
        for part in parts {
            writer.write_all(b"\\u007f")?;
            writer.write_all(part.as_bytes())?;
        }
        Ok(())
    }
}

/// Output directory plus the index accumulated while patches are written.
#[derive(Debug)]
pub struct PatchArchive {
    dir: PathBuf,
    index: PatchIndex,
}

impl PatchArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            index: PatchIndex::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn index(&self) -> &PatchIndex {
        &self.index
    }

    /// Writes the raw response of `record` and adds it to the index.
    pub fn write_patch(&mut self, record: &PatchRecord<'_>) -> Result<PathBuf> {
        let path = self.dir.join(record.file_name());
        let mut file = create_new(&path)?;
        file.write_all(record.raw()).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        debug!("Wrote {} ({} bytes)", path.display(), record.raw().len());

        let encoded = STANDARD.encode(record.packed());
        if self.index.insert(record.name(), encoded).is_some() {
            warn!(
                "Duplicate patch name '{}': index entry replaced by {}_{:03}",
                record.name(),
                record.bank(),
                record.program()
            );
        }
        Ok(path)
    }

    /// Writes `patch_lookup.json` and returns its path.
    pub fn finish(&self) -> Result<PathBuf> {
        let path = self.dir.join(INDEX_FILE_NAME);
        let file = create_new(&path)?;
        self.index.write_json(&file)?;
        info!(
            "Wrote {} with {} entr{}",
            path.display(),
            self.index.len(),
            if self.index.len() == 1 { "y" } else { "ies" }
        );
        Ok(path)
    }
}

fn create_new(path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| match source.kind() {
            io::ErrorKind::AlreadyExists => Error::OutputCollision {
                path: path.to_path_buf(),
            },
            _ => Error::Io {
                path: path.to_path_buf(),
                source,
            },
        })
}
