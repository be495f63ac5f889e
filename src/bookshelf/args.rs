use bookshelf::model::SearchField;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shelf")]
#[command(version, about = "Command-line library catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the database, the mirror and config.json
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a book to the catalog
    #[command(alias = "a")]
    Add {
        /// Title of the book
        title: String,

        /// Author of the book
        author: String,

        /// Year of publication
        year: u32,
    },

    /// Delete a book by id
    #[command(alias = "rm")]
    Delete {
        /// Id of the book
        id: i64,
    },

    /// Find books whose field exactly matches a value
    Search {
        /// Field to match on
        #[arg(value_enum)]
        field: SearchField,

        /// Value to look for
        query: String,
    },

    /// List all books
    #[command(alias = "ls")]
    List,

    /// Change the status of a book (available/issued)
    #[command(alias = "update_status")]
    UpdateStatus {
        /// Id of the book
        id: i64,

        /// New status: available or issued
        status: String,
    },

    /// Change the title, author or year of a book
    Edit {
        /// Id of the book
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        year: Option<u32>,
    },

    /// Rebuild the JSON mirror from the database
    Sync,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_update_status() {
        let cli = Cli::parse_from(["shelf", "update-status", "3", "issued"]);
        assert!(matches!(
            cli.command,
            Some(Commands::UpdateStatus { id: 3, ref status }) if status == "issued"
        ));
    }

    #[test]
    fn accepts_underscore_alias() {
        let cli = Cli::parse_from(["shelf", "update_status", "1", "available"]);
        assert!(matches!(cli.command, Some(Commands::UpdateStatus { .. })));
    }

    #[test]
    fn parses_search_field() {
        let cli = Cli::parse_from(["shelf", "search", "year", "1965"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Search {
                field: SearchField::Year,
                ..
            })
        ));
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::parse_from(["shelf", "--data-dir", "/tmp/x"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn rejects_non_numeric_year() {
        assert!(Cli::try_parse_from(["shelf", "add", "Dune", "Herbert", "soon"]).is_err());
    }
}
