// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// A name did not resolve against the loaded [`Topology`](crate::Topology).
///
/// Against a well-formed topology these never occur; they signal a
/// programming error (for example a stale selector value) rather than bad
/// operator input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No bus with this name exists.
    #[error("unknown bus `{0}`")]
    UnknownBus(String),
    /// No line with this name exists.
    #[error("unknown line `{0}`")]
    UnknownLine(String),
}

/// A state read could not be turned into a [`StateSnapshot`](crate::StateSnapshot).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// The authority answered, but reported that it could not solve the network.
    #[error("authority reported an error: {0}")]
    Remote(String),
}
