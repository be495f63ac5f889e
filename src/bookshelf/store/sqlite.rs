use super::BookStore;
use crate::error::{CatalogError, Result};
use crate::model::{parse_year, Book, BookChanges, BookId, NewBook, SearchField, Status};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::fs;
use std::path::Path;
use tracing::debug;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    year INTEGER NOT NULL CHECK (year > 0),
    status TEXT NOT NULL DEFAULT 'available' CHECK (status IN ('available', 'issued'))
);
";

const SELECT_BOOK: &str = "SELECT id, title, author, year, status FROM books";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(CatalogError::Io)?;
            }
        }
        debug!(path = %path.display(), "opening book database");
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    fn query_books(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<Book>> {
        let mut stmt = self.conn.prepare(sql)?;
        let books = stmt
            .query_map(params, book_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(books)
    }
}

impl BookStore for SqliteStore {
    fn create(&mut self, book: NewBook) -> Result<Book> {
        let status = Status::default();
        self.conn.execute(
            "INSERT INTO books (title, author, year, status) VALUES (?1, ?2, ?3, ?4)",
            params![book.title, book.author, book.year, status],
        )?;
        Ok(Book {
            id: self.conn.last_insert_rowid(),
            title: book.title,
            author: book.author,
            year: book.year,
            status,
        })
    }

    fn update(&mut self, id: BookId, changes: &BookChanges) -> Result<Book> {
        let mut book = self.get(id)?;
        changes.apply(&mut book);
        self.conn.execute(
            "UPDATE books SET title = ?1, author = ?2, year = ?3, status = ?4 WHERE id = ?5",
            params![book.title, book.author, book.year, book.status, id],
        )?;
        Ok(book)
    }

    fn delete(&mut self, id: BookId) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM books WHERE id = ?1", params![id])?;
        if removed == 0 {
            return Err(CatalogError::NotFound(id));
        }
        Ok(())
    }

    fn get(&self, id: BookId) -> Result<Book> {
        self.conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_BOOK),
                params![id],
                book_from_row,
            )
            .optional()?
            .ok_or(CatalogError::NotFound(id))
    }

    fn list(&self) -> Result<Vec<Book>> {
        self.query_books(&format!("{} ORDER BY id", SELECT_BOOK), params![])
    }

    fn search(&self, field: SearchField, query: &str) -> Result<Vec<Book>> {
        match field {
            SearchField::Title => self.query_books(
                &format!("{} WHERE title = ?1 ORDER BY id", SELECT_BOOK),
                params![query],
            ),
            SearchField::Author => self.query_books(
                &format!("{} WHERE author = ?1 ORDER BY id", SELECT_BOOK),
                params![query],
            ),
            SearchField::Year => {
                let year = parse_year(query)?;
                self.query_books(
                    &format!("{} WHERE year = ?1 ORDER BY id", SELECT_BOOK),
                    params![year],
                )
            }
        }
    }
}

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        year: row.get(3)?,
        status: row.get(4)?,
    })
}

impl ToSql for Status {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Status {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: CatalogError| FromSqlError::Other(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(titles: &[&str]) -> SqliteStore {
        let mut store = SqliteStore::open_in_memory().unwrap();
        for (i, title) in titles.iter().enumerate() {
            store
                .create(NewBook::new(*title, "Author", 1990 + i as u32))
                .unwrap();
        }
        store
    }

    #[test]
    fn create_assigns_id_and_default_status() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let book = store.create(NewBook::new("Dune", "Herbert", 1965)).unwrap();
        assert_eq!(book.id, 1);
        assert_eq!(book.status, Status::Available);
        assert_eq!(store.get(1).unwrap(), book);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut store = store_with(&["A", "B"]);
        store.delete(2).unwrap();
        let c = store.create(NewBook::new("C", "Author", 2000)).unwrap();
        assert_eq!(c.id, 3);
    }

    #[test]
    fn update_persists_changes() {
        let mut store = store_with(&["A"]);
        let updated = store
            .update(1, &BookChanges::status(Status::Issued))
            .unwrap();
        assert_eq!(updated.status, Status::Issued);
        assert_eq!(store.get(1).unwrap().status, Status::Issued);
    }

    #[test]
    fn not_found_errors() {
        let mut store = store_with(&[]);
        assert!(matches!(store.get(1), Err(CatalogError::NotFound(1))));
        assert!(matches!(store.delete(1), Err(CatalogError::NotFound(1))));
        assert!(matches!(
            store.update(1, &BookChanges::default()),
            Err(CatalogError::NotFound(1))
        ));
    }

    #[test]
    fn list_is_ordered_by_id() {
        let store = store_with(&["C", "A", "B"]);
        let titles: Vec<_> = store.list().unwrap().into_iter().map(|b| b.title).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[test]
    fn search_each_field() {
        let store = store_with(&["Dune", "Emma", "Dune"]);
        let ids: Vec<_> = store
            .search(SearchField::Title, "Dune")
            .unwrap()
            .iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(store.search(SearchField::Year, "1991").unwrap()[0].id, 2);
        assert_eq!(store.search(SearchField::Author, "Author").unwrap().len(), 3);
        assert!(matches!(
            store.search(SearchField::Year, "soon"),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn reopening_keeps_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("library.sqlite3");
        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.create(NewBook::new("Dune", "Herbert", 1965)).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
    }
}
