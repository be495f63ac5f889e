use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type BookId = i64;

const MAX_TEXT_LEN: usize = 255;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Available,
    Issued,
}

impl Status {
    /// The stored form, shared by the database column and the mirror file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Available => "available",
            Status::Issued => "issued",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Available => write!(f, "Available"),
            Status::Issued => write!(f, "Issued"),
        }
    }
}

impl FromStr for Status {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(Status::Available),
            "issued" => Ok(Status::Issued),
            other => Err(CatalogError::Validation(format!(
                "Invalid status: '{}' (expected available or issued)",
                other
            ))),
        }
    }
}

/// A book row. Cloning one gives the snapshot that goes into the mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: u32,
    pub status: Status,
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} by {} ({}) - {}",
            self.id, self.title, self.author, self.year, self.status
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: u32,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: u32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_text("title", &self.title)?;
        validate_text("author", &self.author)?;
        validate_year(self.year)
    }
}

/// Partial update of a book. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<u32>,
    pub status: Option<Status>,
}

impl BookChanges {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.year.is_none() && self.status.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            validate_text("title", title)?;
        }
        if let Some(author) = &self.author {
            validate_text("author", author)?;
        }
        if let Some(year) = self.year {
            validate_year(year)?;
        }
        Ok(())
    }

    pub fn apply(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title = title.clone();
        }
        if let Some(author) = &self.author {
            book.author = author.clone();
        }
        if let Some(year) = self.year {
            book.year = year;
        }
        if let Some(status) = self.status {
            book.status = status;
        }
    }
}

/// Fields a search can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SearchField {
    Title,
    Author,
    Year,
}

impl SearchField {
    /// Exact match of `query` against this field of `book`.
    pub fn matches(&self, book: &Book, query: &str) -> Result<bool> {
        Ok(match self {
            SearchField::Title => book.title == query,
            SearchField::Author => book.author == query,
            SearchField::Year => book.year == parse_year(query)?,
        })
    }
}

pub fn parse_year(query: &str) -> Result<u32> {
    let year: u32 = query
        .trim()
        .parse()
        .map_err(|_| CatalogError::Validation(format!("Invalid year: '{}'", query)))?;
    validate_year(year)?;
    Ok(year)
}

fn validate_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::Validation(format!("{} cannot be empty", field)));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(CatalogError::Validation(format!(
            "{} is longer than {} characters",
            field, MAX_TEXT_LEN
        )));
    }
    Ok(())
}

fn validate_year(year: u32) -> Result<()> {
    if year == 0 {
        return Err(CatalogError::Validation("year must be positive".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Book {
        Book {
            id: 1,
            title: "Dune".into(),
            author: "Herbert".into(),
            year: 1965,
            status: Status::Available,
        }
    }

    #[test]
    fn status_parses_loosely() {
        assert_eq!(" Issued ".parse::<Status>().unwrap(), Status::Issued);
        assert_eq!("available".parse::<Status>().unwrap(), Status::Available);
        assert!(matches!(
            "lost".parse::<Status>(),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn status_defaults_to_available() {
        assert_eq!(Status::default(), Status::Available);
    }

    #[test]
    fn book_serializes_with_lowercase_status() {
        let json = serde_json::to_value(dune()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "title": "Dune",
                "author": "Herbert",
                "year": 1965,
                "status": "available"
            })
        );
    }

    #[test]
    fn book_display() {
        assert_eq!(dune().to_string(), "1 - Dune by Herbert (1965) - Available");
    }

    #[test]
    fn new_book_validation() {
        assert!(NewBook::new("Dune", "Herbert", 1965).validate().is_ok());
        assert!(NewBook::new("  ", "Herbert", 1965).validate().is_err());
        assert!(NewBook::new("Dune", "", 1965).validate().is_err());
        assert!(NewBook::new("Dune", "Herbert", 0).validate().is_err());
        assert!(NewBook::new("x".repeat(256), "Herbert", 1965)
            .validate()
            .is_err());
    }

    #[test]
    fn changes_apply_only_set_fields() {
        let mut book = dune();
        let changes = BookChanges {
            year: Some(1966),
            ..BookChanges::default()
        };
        changes.apply(&mut book);
        assert_eq!(book.year, 1966);
        assert_eq!(book.title, "Dune");
        assert!(BookChanges::default().is_empty());
        assert!(!BookChanges::status(Status::Issued).is_empty());
    }

    #[test]
    fn search_field_matches_exactly() {
        let book = dune();
        assert!(SearchField::Title.matches(&book, "Dune").unwrap());
        assert!(!SearchField::Title.matches(&book, "dune").unwrap());
        assert!(SearchField::Author.matches(&book, "Herbert").unwrap());
        assert!(SearchField::Year.matches(&book, "1965").unwrap());
        assert!(SearchField::Year.matches(&book, "nineteen").is_err());
    }
}
