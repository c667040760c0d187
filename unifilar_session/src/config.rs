// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use serde::{Deserialize, Serialize};
use unifilar_projection::{Canvas, CanvasError};

/// Default authority address.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
/// Default number of activity log entries kept.
pub const DEFAULT_LOG_CAPACITY: usize = 200;

/// Session settings.
///
/// Every field has a default, so a partial JSON document (or `{}`) is a
/// valid configuration:
///
/// ```json
/// { "base_url": "http://grid.local:8000", "timeout_ms": 5000 }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Canvas width in canvas units.
    pub width: f64,
    /// Canvas height in canvas units.
    pub height: f64,
    /// Empty border kept on every side of the projected content.
    pub margin: f64,
    /// Authority base URL.
    pub base_url: String,
    /// Whole-request timeout in milliseconds; `None` waits forever.
    pub timeout_ms: Option<u64>,
    /// Activity log entries kept before the oldest are dropped.
    pub log_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let canvas = Canvas::default();
        Self {
            width: canvas.width,
            height: canvas.height,
            margin: canvas.margin,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_ms: None,
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

impl SessionConfig {
    /// The canvas described by `width`, `height`, and `margin`.
    #[must_use]
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height, self.margin)
    }

    /// Checks the canvas geometry; see [`Canvas::validate`].
    pub fn validate(&self) -> Result<(), CanvasError> {
        self.canvas().validate()
    }

    /// The request timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
