//! # Connect Four Web
//!
//! A two-player Connect Four game served over HTTP. The engine works on any
//! positive board size; the web layer maps difficulty presets to sizes and
//! keeps each live game behind its own lock.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, state machine
//! - [`server`] — actix-web routes, HTML pages, in-memory game registry
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types
//! - [`telemetry`] — tracing subscriber setup

pub mod config;
pub mod error;
pub mod game;
pub mod server;
pub mod telemetry;
