// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=unifilar_session --heading-base-level=0

//! Unifilar Session: the application context that ties the view together.
//!
//! A [`Session`] owns one [`StateAuthority`](unifilar_client::StateAuthority)
//! and all the view state built from it. Its handlers follow one flow:
//!
//! ```text
//! boot:    GET topology -> project -> GET state -> render -> fit viewport
//! gesture: controller -> POST command -> GET state -> render -> panel
//! ```
//!
//! Failures never escape as panics. Each one becomes a single timestamped
//! entry in the [`ActivityLog`] and a `tracing` warning, and is returned as a
//! [`SessionError`] (or [`LoadError`] from [`Session::boot`]).
//!
//! ## Example
//!
//! ```no_run
//! use unifilar_client::HttpAuthority;
//! use unifilar_interaction::PanelAction;
//! use unifilar_session::{Session, SessionConfig};
//!
//! let config = SessionConfig::default();
//! let authority = HttpAuthority::new(&config.base_url, config.timeout());
//! let mut session = Session::new(authority, config);
//! session.boot()?;
//!
//! session.handle_event(&unifilar_interaction::UiEvent::click("RCL-04"))?;
//! session.panel_action(PanelAction::Close)?;
//! for entry in session.log().entries() {
//!     println!("{entry}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;
mod log;
mod session;

pub use config::{DEFAULT_BASE_URL, DEFAULT_LOG_CAPACITY, SessionConfig};
pub use error::{LoadError, RefreshError, SessionError};
pub use log::{ActivityLog, LogEntry, TIME_FORMAT};
pub use session::Session;
