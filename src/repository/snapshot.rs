use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use crate::domain::record::Record;
use crate::repository::{RepositoryResult, SnapshotReader, SnapshotWriter};

/// Snapshot stored as a pretty-printed JSON array on the local filesystem.
#[derive(Clone, Debug)]
pub struct JsonSnapshotRepository {
    path: PathBuf,
}

impl JsonSnapshotRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl SnapshotReader for JsonSnapshotRepository {
    fn load(&self) -> RepositoryResult<Vec<Record>> {
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

impl SnapshotWriter for JsonSnapshotRepository {
    fn save(&self, records: &[Record]) -> RepositoryResult<()> {
        let directory = self.directory();
        fs::create_dir_all(directory)?;

        // Write next to the target so the final rename stays on one filesystem.
        let temp = NamedTempFile::new_in(directory)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
            records.serialize(&mut serializer)?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(&self.path)?;

        log::info!("Saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}
