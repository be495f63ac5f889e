use crate::commands::{report_store_error, CmdMessage, CmdResult};
use crate::error::Result;
use crate::mirror::Mirror;
use crate::model::BookId;
use crate::store::BookStore;
use tracing::info;

pub fn run<S: BookStore>(store: &mut S, mirror: &Mirror, id: BookId) -> Result<CmdResult> {
    let book = match store.get(id) {
        Ok(book) => book,
        Err(e) => return report_store_error(e),
    };

    mirror.check()?;
    store.delete(id)?;
    mirror.on_record_deleted(&book)?;
    info!(id, "book deleted");

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Book {} deleted.", id)))
        .with_affected_books(vec![book]))
}
