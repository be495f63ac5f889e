use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::BookStore;

pub fn run<S: BookStore>(store: &S) -> Result<CmdResult> {
    let books = store.list()?;
    if books.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("The catalog is empty.")));
    }
    Ok(CmdResult::default().with_listed_books(books))
}
