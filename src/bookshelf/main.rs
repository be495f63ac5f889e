use bookshelf::api::{CatalogApi, CmdMessage, CmdResult, MessageLevel};
use bookshelf::config::{resolve_data_dir, CatalogConfig};
use bookshelf::error::{CatalogError, Result};
use bookshelf::mirror::Mirror;
use bookshelf::model::{Book, BookChanges, NewBook, Status};
use bookshelf::store::sqlite::SqliteStore;
use clap::Parser;
use colored::*;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        report_error(&e);
        std::process::exit(if e.is_mirror() { 2 } else { 1 });
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut api = init_api(&cli)?;

    let result = match cli.command {
        Some(Commands::Add {
            title,
            author,
            year,
        }) => api.add_book(NewBook::new(title, author, year))?,
        Some(Commands::Delete { id }) => api.delete_book(id)?,
        Some(Commands::Search { field, query }) => api.search_books(field, &query)?,
        Some(Commands::UpdateStatus { id, status }) => api.update_status(id, &status)?,
        Some(Commands::Edit {
            id,
            title,
            author,
            year,
        }) => {
            let changes = BookChanges {
                title,
                author,
                year,
                status: None,
            };
            api.edit_book(id, &changes)?
        }
        Some(Commands::Sync) => api.sync_mirror()?,
        Some(Commands::List) | None => api.list_books()?,
    };

    print_result(&result);
    Ok(())
}

fn init_api(cli: &Cli) -> Result<CatalogApi<SqliteStore>> {
    let data_dir = resolve_data_dir(cli.data_dir.clone())?;
    let config = CatalogConfig::load(&data_dir)?;

    let db_path = config.database_path(&data_dir);
    let mirror_path = config.mirror_path(&data_dir);
    debug!(
        data_dir = %data_dir.display(),
        database = %db_path.display(),
        mirror = %mirror_path.display(),
        "catalog paths resolved"
    );

    let store = SqliteStore::open(&db_path)?;
    Ok(CatalogApi::new(store, Mirror::new(mirror_path)))
}

fn report_error(e: &CatalogError) {
    if e.is_mirror() {
        eprintln!("{} {}", "Catalog mirror error:".red().bold(), e);
        if matches!(e, CatalogError::MirrorWrite { .. }) {
            eprintln!("The mirror may no longer match the database.");
        }
        eprintln!("Run `shelf sync` to rebuild the mirror from the database.");
    } else {
        eprintln!("Error: {}", e);
    }
}

fn print_result(result: &CmdResult) {
    print_books(&result.listed_books);
    print_messages(&result.messages);
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 100;
const STATUS_WIDTH: usize = 12;

fn print_books(books: &[Book]) {
    for book in books {
        let idx_str = format!("{:>4}. ", book.id);
        let description = format!("{} by {} ({})", book.title, book.author, book.year);

        let available = LINE_WIDTH.saturating_sub(idx_str.width() + STATUS_WIDTH);
        let description = truncate_to_width(&description, available);
        let padding = available.saturating_sub(description.width());

        let status = format!("{:>width$}", book.status.to_string(), width = STATUS_WIDTH);
        let status_colored = match book.status {
            Status::Available => status.green(),
            Status::Issued => status.red(),
        };

        println!(
            "{}{}{}{}",
            idx_str.yellow(),
            description,
            " ".repeat(padding),
            status_colored
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
