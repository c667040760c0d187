// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use unifilar_client::{ClientError, CommandError};
use unifilar_model::{Command, LookupError, SnapshotError};
use unifilar_projection::CanvasError;

/// Boot could not produce a first drawing.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LoadError {
    /// The configured canvas has no room for the drawing.
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    /// Reading the topology failed.
    #[error("topology: {0}")]
    Topology(#[source] ClientError),
    /// Reading the initial state failed.
    #[error("state: {0}")]
    State(#[source] ClientError),
    /// The authority reported an error instead of a state.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    /// The topology names a bus it does not define.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Re-reading state after a command failed; the previous state is kept.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RefreshError {
    /// The read itself failed.
    #[error(transparent)]
    Read(#[from] ClientError),
    /// The authority answered with an `error` field.
    #[error(transparent)]
    Remote(#[from] SnapshotError),
}

/// A handler did not complete.
///
/// Every variant has already been written to the activity log by the time
/// the caller sees it.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// A handler ran before a successful boot.
    #[error("session is not loaded")]
    NotLoaded,
    /// Boot failed.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The authority refused or never received a command.
    #[error("{} failed: {source}", .command.describe())]
    Command {
        /// The command that was sent.
        command: Command,
        /// Why it failed.
        #[source]
        source: CommandError,
    },
    /// The command went through but the state could not be re-read.
    #[error("refresh failed: {0}")]
    Refresh(#[from] RefreshError),
    /// A name did not resolve.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}
