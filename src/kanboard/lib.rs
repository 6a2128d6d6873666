//! # Kanboard Architecture
//!
//! Kanboard is a **UI-agnostic Kanban board library**. The `kb` binary is one
//! client of it; a TUI or a web front end would be another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, print.rs)                           │
//! │  - Parses arguments, prints the board, owns exit codes      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Composition root: store + persistence + editors + search │
//! │  - Returns structured `CmdResult`s                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Editors (editors/) and Search (search.rs)                  │
//! │  - Dialog state, validation, id assignment                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  List Store (board.rs) ── change hook ──▶ Persistence       │
//! │                                           (persistence.rs)  │
//! │                                              │              │
//! │                                   KeyValueStore (store/)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data flow
//!
//! An editor submit mutates the [`board::ListStore`]. The store then runs its
//! change hooks; the one registered by [`api::KanbanApi::open`] writes the
//! whole board back as a single JSON blob. On startup the persisted blob
//! replaces the initial board before any editor is used.
//!
//! ## No I/O assumptions
//!
//! Nothing from `api.rs` inward writes to stdout/stderr or exits. Diagnostics
//! go through the `log` facade; only the binary installs a backend
//! ([`logging::init_logging`]).
//!
//! ## Modules
//!
//! - [`api`]: the facade and its result types
//! - [`board`]: the shared list store and the id rule
//! - [`editors`]: list and card dialog controllers
//! - [`search`]: fuzzy filtering
//! - [`persistence`]: board <-> blob
//! - [`store`]: blob storage backends
//! - [`model`]: `List`, `Card`, `Priority`
//! - [`seed`]: the first-run sample board
//! - [`config`], [`logging`], [`error`]: ambient concerns

pub mod api;
pub mod board;
pub mod config;
pub mod editors;
pub mod error;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod search;
pub mod seed;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
