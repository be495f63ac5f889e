use crate::commands::{report_store_error, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::SearchField;
use crate::store::BookStore;

pub fn run<S: BookStore>(store: &S, field: SearchField, query: &str) -> Result<CmdResult> {
    let query = query.trim();
    let books = match store.search(field, query) {
        Ok(books) => books,
        Err(e) => return report_store_error(e),
    };

    if books.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("No books found.")));
    }
    Ok(CmdResult::default().with_listed_books(books))
}
