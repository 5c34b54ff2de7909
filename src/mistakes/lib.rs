//! # Mistake Tracker
//!
//! A small journal of mistakes: what the subject was, what went wrong, how to
//! fix it, and when. Records live in a single JSON file on local disk.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Shell (cli/, wired by main.rs)                             │
//! │  - Menu loop, prompts, tables, colours                      │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the in-memory collection                            │
//! │  - Validates input, saves after every mutation              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - add, search, stats, edit, delete, id backfill            │
//! │  - Pure functions over Vec<Record>                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore trait                                        │
//! │  - FileStore (atomic save, backups, quarantine)             │
//! │  - InMemoryStore (testing)                                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The storage location is always passed in explicitly through
//! [`store::StorePaths`], so tests and multiple journals never share state.
//!
//! ## Module Overview
//!
//! - [`api`]: the `Journal` facade
//! - [`commands`]: record operations
//! - [`store`]: persistence
//! - [`model`]: the `Record` type and its load-boundary checks
//! - [`index`]: selecting records by position or identifier
//! - [`validate`]: input rules for user-supplied fields
//! - [`config`]: `config.json` settings
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod store;
pub mod validate;
