//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It owns the record
//! store and the mirror, so every caller gets the same store-then-mirror ordering
//! without wiring the two together itself.
//!
//! ## Generic Over BookStore
//!
//! `CatalogApi<S: BookStore>` is generic over the storage backend:
//! - Production: `CatalogApi<SqliteStore>`
//! - Testing: `CatalogApi<InMemoryStore>`
//!
//! Tests here only check dispatch; the behaviour lives in `commands/*.rs`.

use crate::commands;
use crate::error::Result;
use crate::mirror::Mirror;
use crate::model::{BookChanges, BookId, NewBook, SearchField};
use crate::store::BookStore;

pub struct CatalogApi<S: BookStore> {
    store: S,
    mirror: Mirror,
}

impl<S: BookStore> CatalogApi<S> {
    pub fn new(store: S, mirror: Mirror) -> Self {
        Self { store, mirror }
    }

    pub fn add_book(&mut self, book: NewBook) -> Result<CmdResult> {
        commands::add::run(&mut self.store, &self.mirror, book)
    }

    pub fn delete_book(&mut self, id: BookId) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, &self.mirror, id)
    }

    pub fn search_books(&self, field: SearchField, query: &str) -> Result<CmdResult> {
        commands::search::run(&self.store, field, query)
    }

    pub fn list_books(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn update_status(&mut self, id: BookId, status: &str) -> Result<CmdResult> {
        commands::status::run(&mut self.store, &self.mirror, id, status)
    }

    pub fn edit_book(&mut self, id: BookId, changes: &BookChanges) -> Result<CmdResult> {
        commands::edit::run(&mut self.store, &self.mirror, id, changes)
    }

    pub fn sync_mirror(&self) -> Result<CmdResult> {
        commands::sync::run(&self.store, &self.mirror)
    }

    pub fn mirror(&self) -> &Mirror {
        &self.mirror
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use crate::store::memory::InMemoryStore;
    use tempfile::TempDir;

    fn api() -> (TempDir, CatalogApi<InMemoryStore>) {
        let dir = TempDir::new().unwrap();
        let mirror = Mirror::new(dir.path().join("books.json"));
        (dir, CatalogApi::new(InMemoryStore::new(), mirror))
    }

    #[test]
    fn dispatches_mutations_through_the_mirror() {
        let (_dir, mut api) = api();
        api.add_book(NewBook::new("Dune", "Herbert", 1965)).unwrap();
        api.update_status(1, "issued").unwrap();
        assert_eq!(api.mirror().load().unwrap()[0].status, Status::Issued);

        api.delete_book(1).unwrap();
        assert!(api.mirror().load().unwrap().is_empty());
        assert!(api.list_books().unwrap().listed_books.is_empty());
    }

    #[test]
    fn dispatches_queries() {
        let (_dir, mut api) = api();
        api.add_book(NewBook::new("Dune", "Herbert", 1965)).unwrap();
        let found = api.search_books(SearchField::Author, "Herbert").unwrap();
        assert_eq!(found.listed_books.len(), 1);
        assert_eq!(api.list_books().unwrap().listed_books.len(), 1);
    }

    #[test]
    fn sync_writes_store_rows() {
        let (_dir, mut api) = api();
        api.add_book(NewBook::new("Dune", "Herbert", 1965)).unwrap();
        std::fs::remove_file(api.mirror().path()).unwrap();

        api.sync_mirror().unwrap();
        assert_eq!(
            api.mirror().load().unwrap(),
            api.store().list().unwrap()
        );
    }
}
