//! # Storage Layer
//!
//! The [`BookStore`] trait is the record store: the authoritative table of books.
//! Commands talk to it first and only then reconcile the JSON mirror.
//!
//! ## Implementations
//!
//! - [`sqlite::SqliteStore`]: Production storage, a single `books` table
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!
//! Both assign ids on create and never reuse them. `list` and `search` return
//! books ordered by id.

use crate::error::Result;
use crate::model::{Book, BookChanges, BookId, NewBook, SearchField};

pub mod memory;
pub mod sqlite;

pub trait BookStore {
    /// Insert a new book, assigning its id. Status starts as available.
    fn create(&mut self, book: NewBook) -> Result<Book>;

    /// Apply `changes` to an existing book and return the updated row.
    fn update(&mut self, id: BookId, changes: &BookChanges) -> Result<Book>;

    /// Remove a book permanently
    fn delete(&mut self, id: BookId) -> Result<()>;

    /// Get a book by id
    fn get(&self, id: BookId) -> Result<Book>;

    /// All books, ordered by id
    fn list(&self) -> Result<Vec<Book>>;

    /// Books whose `field` exactly equals `query`, ordered by id
    fn search(&self, field: SearchField, query: &str) -> Result<Vec<Book>>;
}
