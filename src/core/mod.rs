//! # Core Application Logic
//!
//! Pictor's business logic. It knows nothing about any specific UI
//! technology: the TUI adapter translates terminal events into [`action`]
//! values and renders [`state`] back out.
//!
//! ```text
//! State + Action  →  update()  →  New State (+ Effect for the I/O layer)
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct and the `Phase` sum type
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: File/env/CLI configuration with override resolution

pub mod action;
pub mod config;
pub mod state;
