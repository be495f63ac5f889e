//! # Bookshelf Architecture
//!
//! Bookshelf is a small library catalog. Book records live in a relational store
//! (SQLite in production) and every change is mirrored into a flat JSON file that
//! humans and other tools can read without touching the database.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the store and the mirror                            │
//! │  - Dispatches to commands, returns CmdResult                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Mutates the store, then reconciles the mirror            │
//! │  - Turns not-found / validation errors into messages        │
//! └─────────────────────────────────────────────────────────────┘
//!                   │                          │
//!                   ▼                          ▼
//! ┌──────────────────────────────┐ ┌────────────────────────────┐
//! │  Storage Layer (store/)      │ │  Mirror (mirror.rs)        │
//! │  - BookStore trait           │ │  - books.json snapshot     │
//! │  - SqliteStore, InMemory     │ │  - load / save / reconcile │
//! └──────────────────────────────┘ └────────────────────────────┘
//! ```
//!
//! ## The Dual Write
//!
//! There is no event bus. Every command that changes the store calls the
//! matching [`mirror::Mirror`] entry point itself, right after the store call
//! succeeds and before it reports success. A mirror failure after a committed
//! store change surfaces as [`error::CatalogError::MirrorWrite`] so the operator
//! knows the two are out of step; `shelf sync` rebuilds the mirror from the store.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`store`]: Storage abstraction and implementations
//! - [`mirror`]: The JSON mirror and its reconciliation rules
//! - [`model`]: Core data types (`Book`, `Status`, `SearchField`)
//! - [`config`]: Configuration and data directory resolution
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod mirror;
pub mod model;
pub mod store;
