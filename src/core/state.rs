//! # Application State
//!
//! Core business state for Pictor. This module contains domain logic only -
//! no TUI-specific types. Presentation state (the prompt buffer, cursor)
//! lives in the `tui` module.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn ImageProvider>  // generation backend
//! ├── phase: Phase                      // Idle | Loading | Error | Ready
//! ├── status_message: String            // status bar text
//! ├── model_name: String                // model sent with each request
//! ├── image_size: String                // e.g. "1024x1024"
//! └── generation: u64                   // stale-completion guard
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::generate::{ImageProvider, PreparedImage};
use std::sync::Arc;

/// The request lifecycle, as a single sum type.
///
/// Exactly one variant is active at a time, which makes impossible
/// combinations (loading AND error set) unrepresentable. `Ready` carries
/// the only image the UI may display: an image reference is never shown
/// before its resource has finished preloading.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Loading,
    Error(String),
    Ready(PreparedImage),
}

impl Phase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading)
    }
}

pub struct App {
    pub provider: Arc<dyn ImageProvider>,
    pub phase: Phase,
    pub status_message: String,
    pub model_name: String,
    pub image_size: String,
    /// Bumped on every submission. Async completions carry the generation
    /// they were spawned under; `update()` drops anything stale.
    pub generation: u64,
}

impl App {
    pub fn new(provider: Arc<dyn ImageProvider>, model_name: String, image_size: String) -> Self {
        Self {
            provider,
            phase: Phase::Idle,
            status_message: String::from("Welcome to Pictor!"),
            model_name,
            image_size,
            generation: 0,
        }
    }
}
