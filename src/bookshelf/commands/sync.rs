use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::mirror::Mirror;
use crate::store::BookStore;
use tracing::info;

/// Rewrite the mirror from the store, whatever state the file is in.
pub fn run<S: BookStore>(store: &S, mirror: &Mirror) -> Result<CmdResult> {
    let books = store.list()?;
    mirror.rebuild(&books)?;
    info!(entries = books.len(), "mirror rebuilt");

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Mirror rebuilt with {} book(s): {}",
            books.len(),
            mirror.path().display()
        )))
        .with_affected_books(books))
}
