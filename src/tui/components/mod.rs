//! # TUI Components
//!
//! Components follow two patterns:
//!
//! - **Stateless, props-based**: `Landing` and `Viewer` receive all data
//!   as constructor arguments and render it.
//! - **Stateful, event-driven**: `PromptBox` owns its buffer and cursor
//!   and emits `PromptEvent`s.
//!
//! Each component file contains its state types, event types, rendering
//! logic and tests, so one file tells the whole story of one component.

pub mod landing;
pub mod prompt_box;
pub mod viewer;

pub use landing::Landing;
pub use prompt_box::{PromptBox, PromptEvent};
pub use viewer::Viewer;
