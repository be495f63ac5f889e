//! # Commands
//!
//! One module per operation. Commands that change the store follow the same
//! order every time:
//!
//! 1. mutate the store (`create` / `update` / `delete`)
//! 2. call the matching [`Mirror`](crate::mirror::Mirror) entry point
//! 3. report success
//!
//! Not-found and validation failures become messages in the returned
//! [`CmdResult`]. Mirror failures are returned as errors so the caller can tell
//! "no such book" apart from "the mirror is broken".

use crate::error::{CatalogError, Result};
use crate::model::Book;

pub mod add;
pub mod delete;
pub mod edit;
pub mod list;
pub mod search;
pub mod status;
pub mod sync;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_books: Vec<Book>,
    pub listed_books: Vec<Book>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected_books(mut self, books: Vec<Book>) -> Self {
        self.affected_books = books;
        self
    }

    pub fn with_listed_books(mut self, books: Vec<Book>) -> Self {
        self.listed_books = books;
        self
    }
}

/// Turn store-level errors into a message; everything else stays an error.
pub(crate) fn report_store_error(err: CatalogError) -> Result<CmdResult> {
    match err {
        CatalogError::NotFound(id) => Ok(CmdResult::default()
            .with_message(CmdMessage::warning(format!("Book with id {} not found.", id)))),
        CatalogError::Validation(reason) => {
            Ok(CmdResult::default().with_message(CmdMessage::error(reason)))
        }
        other => Err(other),
    }
}
