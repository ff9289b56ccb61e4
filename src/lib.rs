//! todos - per-user task-list REST API
//!
//! This library provides the core functionality for the todos server:
//! filtered, paginated task listings; ownership-gated task mutations;
//! note appending; and aggregate per-user statistics.
//!
//! # Core Concepts
//!
//! - **Filter building**: optional query parameters compose into one
//!   conjunctive predicate, with mention usernames resolved through the
//!   user directory
//! - **Pagination**: page/limit arithmetic plus the response envelope
//! - **Ownership gate**: updates require the actor to own the task and
//!   answer not-found otherwise; note-append and delete are gated by
//!   configurable policy
//! - **Statistics**: one pass over a user's tasks with derived rates
//!
//! # Module Organization
//!
//! - `cli`: command-line interface using clap
//! - `config`: configuration loading from `todos.toml`
//! - `error`: error types and result aliases
//! - `http`: axum router, auth boundary, handlers, response envelope
//! - `lock`: file locking and atomic document writes
//! - `pagination`: page/limit parsing and the pagination envelope
//! - `query`: filter predicate and sort key construction
//! - `seed`: demo dataset
//! - `stats`: per-user aggregate statistics
//! - `store`: document store for tasks and the user directory
//! - `task`: task domain types and boundary command structs
//! - `user`: user records and display projections
//! - `view`: tasks joined with referenced user display fields

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod lock;
pub mod pagination;
pub mod query;
pub mod seed;
pub mod stats;
pub mod store;
pub mod task;
pub mod user;
pub mod view;

pub use error::{Error, Result};
