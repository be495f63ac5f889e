use crate::commands::{report_store_error, CmdMessage, CmdResult};
use crate::error::Result;
use crate::mirror::Mirror;
use crate::model::{BookChanges, BookId, Status};
use crate::store::BookStore;
use tracing::info;

pub fn run<S: BookStore>(
    store: &mut S,
    mirror: &Mirror,
    id: BookId,
    status: &str,
) -> Result<CmdResult> {
    let status: Status = match status.parse() {
        Ok(status) => status,
        Err(e) => return report_store_error(e),
    };

    mirror.check()?;
    let book = match store.update(id, &BookChanges::status(status)) {
        Ok(book) => book,
        Err(e) => return report_store_error(e),
    };
    mirror.on_record_saved(&book, false)?;
    info!(id, status = status.as_str(), "status updated");

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Status updated: {}", book)))
        .with_affected_books(vec![book]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add, MessageLevel};
    use crate::model::NewBook;
    use crate::store::memory::InMemoryStore;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Mirror, InMemoryStore) {
        let dir = TempDir::new().unwrap();
        let mirror = Mirror::new(dir.path().join("books.json"));
        let mut store = InMemoryStore::new();
        add::run(&mut store, &mirror, NewBook::new("Dune", "Herbert", 1965)).unwrap();
        add::run(&mut store, &mirror, NewBook::new("Emma", "Austen", 1815)).unwrap();
        (dir, mirror, store)
    }

    #[test]
    fn updates_store_and_mirror_in_place() {
        let (_dir, mirror, mut store) = setup();
        let result = run(&mut store, &mirror, 1, "issued").unwrap();
        assert_eq!(
            result.messages[0].content,
            "Status updated: 1 - Dune by Herbert (1965) - Issued"
        );

        let books = mirror.load().unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].id, 1);
        assert_eq!(books[0].status, Status::Issued);
        assert_eq!(store.get(1).unwrap().status, Status::Issued);
    }

    #[test]
    fn invalid_status_is_reported() {
        let (_dir, mirror, mut store) = setup();
        let result = run(&mut store, &mirror, 1, "lost").unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert_eq!(store.get(1).unwrap().status, Status::Available);
    }

    #[test]
    fn missing_book_is_a_warning() {
        let (_dir, mirror, mut store) = setup();
        let result = run(&mut store, &mirror, 9, "issued").unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn restores_entry_missing_from_mirror() {
        let (_dir, mirror, mut store) = setup();
        std::fs::remove_file(mirror.path()).unwrap();

        run(&mut store, &mirror, 2, "issued").unwrap();
        let books = mirror.load().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, 2);
        assert_eq!(books[0].status, Status::Issued);
    }
}
