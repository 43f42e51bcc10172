//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! ## Concurrency
//!
//! All state lives on this loop's thread. Background tokio tasks (the
//! generator call, the image preload) communicate exclusively by sending
//! `Action`s over an mpsc channel; they never touch `App` directly. A
//! submission spawns exactly one generator task, and the prompt box is
//! locked until it settles, so at most one request is ever in flight.
//! There is no cancellation: an abandoned task's late actions are dropped
//! by the generation guard in `update()`.

pub mod component;
pub mod components;
pub mod event;
pub mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::generate::{
    GenerateRequest, GeneratedImage, ImageProvider, LocalAiProvider, OpenAiProvider,
    PreparedImage, preload,
};
use crate::tui::component::EventHandler;
use crate::tui::components::{PromptBox, PromptEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub prompt_box: PromptBox,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            prompt_box: PromptBox::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show, // Show cursor for prompt editing
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Hide);
    }
}

/// Build a provider from a resolved config's provider name and credentials.
pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn ImageProvider> {
    match config.provider.as_str() {
        "localai" => Arc::new(LocalAiProvider::new(Some(config.localai_base_url.clone()))),
        _ => {
            // Default to openai
            let api_key = config
                .openai_api_key
                .clone()
                .expect("OpenAI API key must be set (config file, OPENAI_API_KEY env var, or --provider local-ai)");
            Arc::new(OpenAiProvider::new(
                api_key,
                Some(config.openai_base_url.clone()),
            ))
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider = build_provider(&config);
    let mut app = App::new(provider, config.model_name.clone(), config.image_size.clone());
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // One HTTP client shared by all preload tasks
    let http = reqwest::Client::new();

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    loop {
        // Disabled state is derived from the canonical phase each frame,
        // never tracked separately
        tui.prompt_box.locked = app.phase.is_loading();

        let animating = app.phase.is_loading();
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                // Resize just needs a redraw (already flagged above)
                TuiEvent::Resize => {}
                TuiEvent::ForceQuit | TuiEvent::Quit => {
                    let effect = update(&mut app, Action::Quit);
                    should_quit |= apply_effect(effect, &app, &mut tui, &http, &tx);
                }
                other => {
                    if let Some(PromptEvent::Submit(text)) = tui.prompt_box.handle_event(&other) {
                        let effect = update(&mut app, Action::Submit(text));
                        should_quit |= apply_effect(effect, &app, &mut tui, &http, &tx);
                    }
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (generator results, preloads)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            should_quit |= apply_effect(effect, &app, &mut tui, &http, &tx);
        }
    }

    ratatui::restore();
    Ok(())
}

/// Perform the I/O an `update()` call asked for. Returns true on quit.
fn apply_effect(
    effect: Effect,
    app: &App,
    tui: &mut TuiState,
    http: &reqwest::Client,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::SpawnGeneration { prompt } => {
            spawn_generation(app, prompt, tx.clone());
            false
        }
        Effect::PreloadImage { image } => {
            // The generator settled successfully: the prompt field is
            // cleared here, before the preload finishes
            tui.prompt_box.clear();
            spawn_preload(http.clone(), image, app.generation, tx.clone());
            false
        }
    }
}

fn spawn_generation(app: &App, prompt: String, tx: mpsc::Sender<Action>) {
    info!("Spawning generation request (generation={})", app.generation);

    // Clone what we need for the async task
    let provider = app.provider.clone();
    let model = app.model_name.clone();
    let size = app.image_size.clone();
    let generation = app.generation;

    tokio::spawn(async move {
        let request = GenerateRequest {
            prompt: &prompt,
            model: &model,
            size: &size,
        };

        let action = match provider.generate(request).await {
            Ok(image) => Action::GenerationSucceeded { generation, image },
            Err(e) => {
                info!("Generation failed: {}", e);
                Action::GenerationFailed {
                    generation,
                    message: e.user_message(),
                }
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to send generation result: receiver dropped");
        }
    });
}

fn spawn_preload(
    http: reqwest::Client,
    image: GeneratedImage,
    generation: u64,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning image preload: {}", image.url);

    tokio::spawn(async move {
        let action = match preload(&http, &image.url).await {
            Ok(preview) => Action::ImageLoaded {
                generation,
                image: PreparedImage {
                    url: image.url,
                    revised_prompt: image.revised_prompt,
                    preview,
                },
            },
            Err(e) => {
                warn!("Preload failed for {}: {}", image.url, e);
                Action::PreloadFailed {
                    generation,
                    message: e.to_string(),
                }
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to send preload result: receiver dropped");
        }
    });
}
