use crate::commands::{report_store_error, CmdMessage, CmdResult};
use crate::error::Result;
use crate::mirror::Mirror;
use crate::model::{BookChanges, BookId};
use crate::store::BookStore;
use tracing::info;

pub fn run<S: BookStore>(
    store: &mut S,
    mirror: &Mirror,
    id: BookId,
    changes: &BookChanges,
) -> Result<CmdResult> {
    if changes.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("Nothing to change.")));
    }
    if let Err(e) = changes.validate() {
        return report_store_error(e);
    }

    mirror.check()?;
    let book = match store.update(id, changes) {
        Ok(book) => book,
        Err(e) => return report_store_error(e),
    };
    mirror.on_record_saved(&book, false)?;
    info!(id, "book edited");

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Book updated: {}", book)))
        .with_affected_books(vec![book]))
}
