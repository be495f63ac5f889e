use super::BookStore;
use crate::error::{CatalogError, Result};
use crate::model::{Book, BookChanges, BookId, NewBook, SearchField, Status};
use std::collections::BTreeMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Debug)]
pub struct InMemoryStore {
    books: BTreeMap<BookId, Book>,
    next_id: BookId,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            books: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookStore for InMemoryStore {
    fn create(&mut self, book: NewBook) -> Result<Book> {
        let book = Book {
            id: self.next_id,
            title: book.title,
            author: book.author,
            year: book.year,
            status: Status::default(),
        };
        self.next_id += 1;
        self.books.insert(book.id, book.clone());
        Ok(book)
    }

    fn update(&mut self, id: BookId, changes: &BookChanges) -> Result<Book> {
        let book = self.books.get_mut(&id).ok_or(CatalogError::NotFound(id))?;
        changes.apply(book);
        Ok(book.clone())
    }

    fn delete(&mut self, id: BookId) -> Result<()> {
        if self.books.remove(&id).is_none() {
            return Err(CatalogError::NotFound(id));
        }
        Ok(())
    }

    fn get(&self, id: BookId) -> Result<Book> {
        self.books
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    fn list(&self) -> Result<Vec<Book>> {
        Ok(self.books.values().cloned().collect())
    }

    fn search(&self, field: SearchField, query: &str) -> Result<Vec<Book>> {
        let mut found = Vec::new();
        for book in self.books.values() {
            if field.matches(book, query)? {
                found.push(book.clone());
            }
        }
        Ok(found)
    }
}

// --- Test Fixtures ---
