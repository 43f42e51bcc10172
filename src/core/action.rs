//! # Actions
//!
//! Everything that can happen in Pictor becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! The provider answers? That's `Action::GenerationSucceeded` or
//! `Action::GenerationFailed`.
//!
//! The `update()` function takes the current state and an action and
//! mutates the state, returning an `Effect` describing the I/O (if any)
//! the caller must perform. No I/O happens here, which makes the whole
//! request lifecycle testable with plain assertions.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Lifecycle
//!
//! ```text
//! Idle/Ready/Error --Submit(non-empty, not loading)--> Loading
//! Loading --GenerationSucceeded--> Idle   (prompt cleared, preload spawned)
//! Loading --GenerationFailed----> Error   (prompt retained)
//! Idle    --ImageLoaded---------> Ready   (image published, post-preload)
//! ```
//!
//! Note the deliberate gap: `Loading` ends when the generator settles, but
//! `Ready` is only entered once the image resource has finished preloading.
//! Between the two the UI shows neither spinner nor image. This mirrors the
//! upstream behavior and is preserved on purpose.

use log::{debug, warn};

use crate::core::state::{App, Phase};
use crate::generate::{GeneratedImage, PreparedImage};

#[derive(Debug)]
pub enum Action {
    /// The user submitted the prompt box. Carries the raw, untrimmed text.
    Submit(String),
    /// The provider resolved with an image URL.
    GenerationSucceeded { generation: u64, image: GeneratedImage },
    /// The provider reported a failure, returned no URL, or the call errored.
    GenerationFailed { generation: u64, message: String },
    /// The image resource finished preloading and may now be displayed.
    ImageLoaded { generation: u64, image: PreparedImage },
    /// The preload fetch or decode failed.
    PreloadFailed { generation: u64, message: String },
    Quit,
}

/// I/O the event loop must perform after an `update()` call.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// Call the provider with this prompt on a background task.
    SpawnGeneration { prompt: String },
    /// The generator settled successfully: clear the prompt field and
    /// start the fire-and-forget preload of `image`.
    PreloadImage { image: GeneratedImage },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            // Resubmission is disallowed while a request is outstanding,
            // and whitespace-only prompts never leave the input box. Both
            // are enforced again here so the reducer is safe on its own.
            if app.phase.is_loading() {
                debug!("Submit ignored: request already in flight");
                return Effect::None;
            }
            if text.trim().is_empty() {
                debug!("Submit ignored: empty prompt");
                return Effect::None;
            }
            app.generation += 1;
            app.phase = Phase::Loading;
            app.status_message = String::from("Generating...");
            Effect::SpawnGeneration { prompt: text }
        }
        Action::GenerationSucceeded { generation, image } => {
            if generation != app.generation {
                warn!(
                    "Dropping stale generation result ({} != {})",
                    generation, app.generation
                );
                return Effect::None;
            }
            // Loading ends now; Ready waits for the preload to land.
            app.phase = Phase::Idle;
            app.status_message = String::from("Fetching image...");
            Effect::PreloadImage { image }
        }
        Action::GenerationFailed { generation, message } => {
            if generation != app.generation {
                warn!(
                    "Dropping stale generation error ({} != {})",
                    generation, app.generation
                );
                return Effect::None;
            }
            app.phase = Phase::Error(message);
            app.status_message = String::from("Generation failed");
            Effect::None
        }
        Action::ImageLoaded { generation, image } => {
            if generation != app.generation {
                warn!(
                    "Dropping stale preload completion ({} != {})",
                    generation, app.generation
                );
                return Effect::None;
            }
            app.status_message = match &image.revised_prompt {
                Some(revised) => format!("Prompt: {revised}"),
                None => String::from("Image ready"),
            };
            app.phase = Phase::Ready(image);
            Effect::None
        }
        Action::PreloadFailed { generation, message } => {
            if generation != app.generation {
                warn!(
                    "Dropping stale preload error ({} != {})",
                    generation, app.generation
                );
                return Effect::None;
            }
            // The upstream behavior: an image that never loads is simply
            // never shown. Surface it in the status bar, not as an error.
            warn!("Image preload failed: {message}");
            app.status_message = format!("Image fetch failed: {message}");
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
