// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `ureq`-backed [`StateAuthority`].

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use ureq::Agent;
use ureq::http::Response;
use unifilar_model::wire::{HealthWire, StateWire, TopologyWire};
use unifilar_model::{Command, CommandPayload, Endpoint};

use crate::authority::StateAuthority;
use crate::error::{ClientError, CommandError};

/// Talks to the authority over blocking HTTP.
///
/// Non-2xx statuses are read as values rather than errors so that the
/// response body can be reported to the operator.
#[derive(Debug, Clone)]
pub struct HttpAuthority {
    agent: Agent,
    base_url: String,
}

impl HttpAuthority {
    /// Creates an adapter rooted at `base_url` (for example
    /// `http://127.0.0.1:8000`). `timeout` bounds each whole request; `None`
    /// waits indefinitely.
    #[must_use]
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build();
        Self {
            agent: Agent::new_with_config(config),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// The base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of `endpoint`.
    #[must_use]
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// POSTs to `endpoint` with an optional JSON body.
    ///
    /// The success body is discarded; callers re-read state instead of
    /// trusting it.
    pub fn issue_to(
        &self,
        endpoint: Endpoint,
        payload: Option<&CommandPayload>,
    ) -> Result<(), CommandError> {
        let url = self.url(endpoint);
        debug!(%url, ?payload, "POST");
        let request = self.agent.post(&url);
        let result = match payload {
            Some(body) => request.send_json(body),
            None => request.send_empty(),
        };
        let response = result.map_err(|e| {
            warn!(%url, error = %e, "request failed");
            CommandError::transport(e.to_string())
        })?;
        read_success(&url, response).map(drop)
    }

    fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ClientError> {
        let url = self.url(endpoint);
        debug!(%url, "GET");
        let response = self.agent.get(&url).call().map_err(|e| {
            warn!(%url, error = %e, "request failed");
            CommandError::transport(e.to_string())
        })?;
        let body = read_success(&url, response)?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(%url, error = %e, "malformed response");
            ClientError::Decode {
                endpoint,
                message: e.to_string(),
            }
        })
    }
}

/// Reads the body and maps non-2xx statuses to [`CommandError`].
fn read_success(url: &str, mut response: Response<ureq::Body>) -> Result<String, CommandError> {
    let status = response.status();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| CommandError::transport(e.to_string()))?;
    if status.is_success() {
        Ok(body)
    } else {
        warn!(%url, status = status.as_u16(), %body, "authority rejected request");
        Err(CommandError::http(status.as_u16(), body))
    }
}

impl StateAuthority for HttpAuthority {
    fn topology(&mut self) -> Result<TopologyWire, ClientError> {
        self.get_json(Endpoint::Topology)
    }

    fn state(&mut self) -> Result<StateWire, ClientError> {
        self.get_json(Endpoint::State)
    }

    fn issue(&mut self, command: &Command) -> Result<(), CommandError> {
        self.issue_to(command.endpoint(), command.payload().as_ref())
    }

    fn health(&mut self) -> Result<HealthWire, ClientError> {
        self.get_json(Endpoint::Health)
    }
}
