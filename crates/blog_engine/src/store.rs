use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::ingest::{parse_posts_document, IngestError, PostsDocument};

pub const POSTS_FILENAME: &str = "posts.json";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("could not serialize posts: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not read posts document: {0}")]
    Ingest(#[from] IngestError),
}

/// Create `dir` if missing and check that files can be created in it.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Writes files under one directory via temp file + rename, so readers never
/// see a half-written page or posts document.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

/// The posts document on disk (`{dir}/posts.json`).
pub struct PostStore {
    writer: AtomicFileWriter,
}

impl PostStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir.into()),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.writer.dir().join(POSTS_FILENAME)
    }

    pub fn save(&self, document: &PostsDocument) -> Result<PathBuf, PersistError> {
        let json = serde_json::to_string_pretty(document)?;
        self.writer.write(POSTS_FILENAME, &json)
    }

    pub fn load(&self) -> Result<PostsDocument, PersistError> {
        let text = fs::read_to_string(self.path())?;
        Ok(parse_posts_document(&text)?)
    }
}
