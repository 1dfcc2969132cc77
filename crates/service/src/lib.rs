//! Scheduler services for hourglass.
//!
//! This crate provides the services the preferences page talks to, a
//! file-backed implementation of them, and the schedule engine that decides
//! which state is in effect.
//!
//! # Overview
//!
//! - [`ConfigService`], [`ForcedStateService`], [`SelectionProvider`]: the
//!   service interfaces, held as `Arc<dyn ...>` by the UI
//! - [`StaticSelection`]: a selection fixed at startup
//! - [`LocalService`]: in-process implementation backed by a [`StateStore`]
//! - [`engine`]: slot lookup, next-hour delay, throttled limits
//! - [`tracker`]: per-item forced/paused flags and pause/resume rules
//! - [`ServiceError`]: Error types for service operations
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use hourglass_protocol::ItemId;
//! use hourglass_service::{ForcedStateService, LocalService};
//!
//! # async fn example() -> hourglass_service::Result<()> {
//! let service = Arc::new(LocalService::open("/tmp/hourglass".into()).await?);
//!
//! let ids = [ItemId::from("4f3c")];
//! service.set_forced(&ids, true).await?;
//! assert_eq!(service.get_forced(&ids).await?, vec![true]);
//!
//! // Re-evaluate at every top of the hour
//! let schedule = tokio::spawn(Arc::clone(&service).run_schedule());
//! schedule.abort();
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod local;
pub mod service;
pub mod store;
pub mod tracker;

// Re-export primary types at crate root for convenience
pub use engine::ThrottleSettings;
pub use error::{Result, ServiceError};
pub use local::{Evaluation, LocalService};
pub use service::{ConfigService, ForcedStateService, SelectionProvider, StaticSelection};
pub use store::StateStore;
pub use tracker::{ItemAction, ItemFlags, ItemTracker};
