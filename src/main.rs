//! smartlibrary - A terminal UI for running a small library
//!
//! This is the main entry point for the smartlibrary application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod error;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::model::activity::ActivityLog;
use crate::services::{import, CatalogStore};
use crate::tui::Tui;
use anyhow::{Context, Result};
use crossterm::event::Event;
use std::path::Path;
use std::time::Duration;

fn main() -> Result<()> {
    let config = Config::load()?;
    logging::init(&config)?;

    let store = load_store(&config)?;
    tracing::info!(
        books = store.list_books().len(),
        members = store.list_members().len(),
        "Catalog loaded"
    );

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(config.tick_rate_ms));
    tui.enter()?;

    // Create app state
    let mut app = App::new(config, store, ActivityLog::sample());
    app.init()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    let restored = tui.exit();

    // Handle any errors
    if let Err(err) = settle(result, restored) {
        tracing::error!("Exited with error: {:?}", err);
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// The run error takes precedence over a failed terminal restore, which is logged
fn settle(result: Result<()>, restored: Result<()>) -> Result<()> {
    if let Err(ref e) = restored {
        tracing::error!("Failed to restore terminal: {:?}", e);
    }
    result.and(restored)
}

/// Sample catalog, or the CSV seed directory when one is configured
fn load_store(config: &Config) -> Result<CatalogStore> {
    match config.seed_dir {
        Some(ref dir) => {
            let seed = import::load_dir(Path::new(dir))
                .with_context(|| format!("Failed to load seed data from {}", dir))?;
            Ok(CatalogStore::from_seed(seed)?)
        }
        None => Ok(CatalogStore::sample()?),
    }
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!("Draw error: {}", e);
            }
        })?;

        // Poll for events
        if let Some(event) = tui.next_event()? {
            // Convert event to action
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                tracing::trace!(action = %a, "Dispatch");
                current_action = app.update(a)?;
            }
        } else {
            // No event - send a tick for the clock
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_error_survives_failed_restore() {
        let err = settle(
            Err(anyhow::anyhow!("draw failed")),
            Err(anyhow::anyhow!("restore failed")),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "draw failed");
    }

    #[test]
    fn test_restore_error_reported_after_clean_run() {
        let err = settle(Ok(()), Err(anyhow::anyhow!("restore failed"))).unwrap_err();
        assert_eq!(err.to_string(), "restore failed");
        assert!(settle(Ok(()), Ok(())).is_ok());
    }
}
