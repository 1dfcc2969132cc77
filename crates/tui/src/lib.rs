//! Terminal UI for the hourglass scheduler.
//!
//! This crate provides a Ratatui-based preferences page for the weekly
//! bandwidth schedule: a 7×24 grid painted with the mouse, the throttled
//! limits form, and the force-start toggle for the selected items.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`app`]: Main application struct and run loop
//! - [`schedule`]: The schedule grid widget and its drag gesture
//! - [`page`]: The preferences page composing grid and form
//! - [`form_state`]: Limits form state management
//! - [`force`]: The force-start toggle
//! - [`terminal`]: Terminal setup, teardown, and panic handling
//! - [`event`]: Event handling and key mappings
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use hourglass_service::{LocalService, StaticSelection};
//! use hourglass_tui::{App, terminal};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let service = Arc::new(LocalService::open("/tmp/hourglass".into()).await?);
//!     let selection = Arc::new(StaticSelection::from_strings(["4f3c"]));
//!
//!     terminal::install_panic_hook();
//!     let mut session = terminal::TerminalSession::start()?;
//!
//!     let mut app = App::new(service.clone(), service, selection);
//!     let result = app.run(session.terminal()).await;
//!
//!     session.finish()?;
//!     result
//! }
//! ```

pub mod app;
pub mod component;
pub mod event;
pub mod force;
pub mod form_state;
pub mod layout;
pub mod page;
pub mod schedule;
pub mod terminal;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export primary types at crate root for convenience
pub use app::{App, ServiceEvent};
pub use component::Component;
pub use page::PreferencesPage;
pub use schedule::ScheduleSelector;
