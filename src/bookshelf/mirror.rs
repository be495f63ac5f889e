//! # The JSON Mirror
//!
//! `books.json` holds a snapshot of every book in the store as a pretty-printed
//! JSON array. It is derived data: it is rebuilt from single store events and is
//! never read back into the store.
//!
//! Every reconciliation is a full cycle:
//!
//! 1. [`Mirror::load`] the whole array (a missing file is an empty array)
//! 2. change it in memory
//! 3. [`Mirror::save`] the whole array (tmp file + rename)
//!
//! ## Reconciliation Rules
//!
//! | Event                  | Effect on the array                                 |
//! |------------------------|-----------------------------------------------------|
//! | saved, created         | append the snapshot                                 |
//! | saved, updated         | replace the entry with the same id, in place        |
//! | saved, updated, miss   | append the snapshot                                 |
//! | deleted                | remove every entry with that id                     |
//!
//! The update-miss append keeps "one entry per live book" true even after the
//! file was deleted or hand-edited.
//!
//! A corrupt file is an error, never an empty catalog: a caller that saved over
//! it would wipe every other entry.

use crate::error::{CatalogError, Result};
use crate::model::Book;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

const INDENT: &[u8] = b"    ";

#[derive(Debug, Clone)]
pub struct Mirror {
    path: PathBuf,
}

impl Mirror {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<Book>> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "mirror file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(CatalogError::MirrorRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let books: Vec<Book> =
            serde_json::from_slice(&content).map_err(|source| CatalogError::MirrorCorrupt {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), entries = books.len(), "mirror loaded");
        Ok(books)
    }

    pub fn save(&self, books: &[Book]) -> Result<()> {
        self.write_atomic(books).map_err(|source| CatalogError::MirrorWrite {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), entries = books.len(), "mirror saved");
        Ok(())
    }

    /// Fail early on a mirror that a later reconcile could not read.
    pub fn check(&self) -> Result<()> {
        self.load().map(|_| ())
    }

    /// Reconcile after a store create (`created`) or update.
    pub fn on_record_saved(&self, book: &Book, created: bool) -> Result<()> {
        let mut books = self.load()?;

        if created {
            books.push(book.clone());
        } else if let Some(entry) = books.iter_mut().find(|entry| entry.id == book.id) {
            *entry = book.clone();
        } else {
            warn!(
                id = book.id,
                path = %self.path.display(),
                "updated book missing from mirror, appending"
            );
            books.push(book.clone());
        }

        self.save(&books)
    }

    /// Reconcile after a store delete.
    pub fn on_record_deleted(&self, book: &Book) -> Result<()> {
        let mut books = self.load()?;
        let before = books.len();
        books.retain(|entry| entry.id != book.id);
        if books.len() == before {
            debug!(id = book.id, "deleted book was not in the mirror");
        }
        self.save(&books)
    }

    /// Replace the mirror with exactly `books`, discarding whatever it held.
    pub fn rebuild(&self, books: &[Book]) -> Result<()> {
        self.save(books)
    }

    fn write_atomic(&self, books: &[Book]) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = to_pretty_json(books)?;
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "mirror".to_string());
        let tmp_path = dir.join(format!(".{}-{}.tmp", file_name, Uuid::new_v4()));

        let written =
            write_and_sync(&tmp_path, &content).and_then(|_| fs::rename(&tmp_path, &self.path));
        if written.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        written
    }
}

fn to_pretty_json(books: &[Book]) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    books.serialize(&mut ser).map_err(io::Error::from)?;
    buf.push(b'\n');
    Ok(buf)
}

fn write_and_sync(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    file.sync_all()
}
