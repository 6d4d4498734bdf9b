//! # apodlog Architecture
//!
//! apodlog keeps a personal log of NASA's Astronomy Picture of the Day. Each
//! fetched entry is normalized and written to two flat files that mirror each
//! other: a JSON-lines log and a CSV log. The library owns all of that; the
//! binary is a thin CLI client on top.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, runs the prompt, prints output         │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (date text, store selection)           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Append, list, delete, doctor, fetch ... as plain Rust    │
//! │  - Returns CmdResult with records and messages              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/, settings.rs)                        │
//! │  - LogStore trait: JsonlStore, CsvStore, InMemoryStore      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The remote API sits beside the command layer behind the
//! [`source::ApodSource`] trait.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. Diagnostics go through `tracing`; the binary decides where
//! they end up.
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: unit tests against `InMemoryStore` fixtures. Most tests live here.
//! 2. **Stores**: file-format tests against a `tempfile` directory.
//! 3. **API**: dispatch tests.
//! 4. **CLI**: `tests/` drives the binary with `assert_cmd`, pointing
//!    `APODLOG_HOME` at a temp dir.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each command
//! - [`store`]: The two logs and their shared trait
//! - [`settings`]: The user settings sidecar file
//! - [`source`]: Remote APOD source
//! - [`media`]: Saving pictures and videos
//! - [`model`], [`format`], [`dates`]: Records, normalization, the date window
//! - [`config`]: Environment and file locations
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod dates;
pub mod error;
pub mod format;
pub mod media;
pub mod model;
pub mod settings;
pub mod source;
pub mod store;
