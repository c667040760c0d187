// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=unifilar_client --heading-base-level=0

//! Unifilar Client: the remote state authority.
//!
//! [`StateAuthority`] is the seam between the interactive session and the
//! service that owns the network. [`HttpAuthority`] implements it over
//! blocking HTTP with `ureq`:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | topology  | `GET  /api/topology` |
//! | state     | `GET  /api/state` |
//! | switch    | `POST /api/switch {name, action}` |
//! | fault     | `POST /api/fault {name, action}` |
//! | reset     | `POST /api/reset` (no body) |
//! | health    | `GET  /health` |
//!
//! Any non-2xx status is a failure carrying the status and body
//! ([`CommandError`]); a transport failure carries no status. Nothing is
//! retried.
//!
//! ```no_run
//! use unifilar_client::{HttpAuthority, StateAuthority};
//! use unifilar_model::{Command, SwitchAction};
//!
//! let mut authority = HttpAuthority::new("http://127.0.0.1:8000", None);
//! authority.issue(&Command::switch("RCL-04", SwitchAction::Close))?;
//! let _state = authority.state()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod authority;
mod error;
mod http;

pub use authority::StateAuthority;
pub use error::{ClientError, CommandError};
pub use http::HttpAuthority;
