//! Symbolic link manager.
//!
//! Manages named symbolic links that can have multiple tagged path
//! variants, plus binds — propagation rules where activating one tagged
//! value also activates another named link's tagged value.
//!
//! The public API is organised into four layers:
//!
//! - **[`store`]** — the persisted configuration: wire model and an
//!   explicit snapshot handle with all-or-nothing flush
//! - **[`repository`]** — CRUD over declarations, tagged values, and
//!   binds, maintaining the declared-name invariant
//! - **[`engine`]** — activation: resolve a `(name, tag)` into a chain
//!   of real filesystem symlinks by following binds
//! - **[`query`]** — report which managed symlinks currently exist
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod engine;
pub mod error;
pub mod logging;
pub mod paths;
pub mod query;
pub mod repository;
pub mod store;
