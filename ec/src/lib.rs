//! Echo Chamber - arithmetic progression predictor
//!
//! Delivery shells around [`seqpredict`]: an interactive console that keeps a
//! per-session echo log, and an HTTP JSON API that keeps one echo log per
//! server process.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface
//! - [`config`] - Configuration types and loading
//! - [`repl`] - Interactive console
//! - [`server`] - HTTP JSON API
//! - [`selftest`] - Built-in scenario checks
//! - [`demo`] - Guided walkthrough

pub mod cli;
pub mod config;
pub mod demo;
pub mod repl;
pub mod selftest;
pub mod server;

pub use config::{Config, ReplConfig, ServerConfig};
pub use repl::{LineSource, ReplCommand, ReplSession};
pub use server::{ApiError, AppState, router, serve, serve_on};
