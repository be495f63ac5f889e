use crate::commands::{report_store_error, CmdMessage, CmdResult};
use crate::error::Result;
use crate::mirror::Mirror;
use crate::model::NewBook;
use crate::store::BookStore;
use tracing::info;

pub fn run<S: BookStore>(store: &mut S, mirror: &Mirror, book: NewBook) -> Result<CmdResult> {
    if let Err(e) = book.validate() {
        return report_store_error(e);
    }

    mirror.check()?;
    let book = store.create(book)?;
    mirror.on_record_saved(&book, true)?;
    info!(id = book.id, "book added");

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Book added: {}", book)))
        .with_affected_books(vec![book]))
}
