// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON shapes exchanged with the remote state authority.
//!
//! These mirror the authority's responses field for field; conversion into
//! the validated model types happens in [`Topology::from_wire`] and
//! [`StateSnapshot::from_wire`].
//!
//! [`Topology::from_wire`]: crate::Topology::from_wire
//! [`StateSnapshot::from_wire`]: crate::StateSnapshot::from_wire

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::state::{BusState, LineState};

/// `GET topology` response.
///
/// ```json
/// { "buses": {"A": [0, 0]}, "lines": [["L1", "A", "B"]], "trafos": [["T1", "A", "A-LV"]] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyWire {
    /// Bus name to `[longitude, latitude]`.
    pub buses: BTreeMap<String, [f64; 2]>,
    /// `[name, bus_a, bus_b]` triples.
    #[serde(default)]
    pub lines: Vec<(String, String, String)>,
    /// `[name, hv_bus, lv_bus]` triples; absent means no transformers.
    #[serde(default)]
    pub trafos: Vec<(String, String, String)>,
}

/// `GET state` response.
///
/// Only `lines` is required by the view; the remaining fields are carried
/// when present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateWire {
    /// Line name to line state.
    #[serde(default)]
    pub lines: BTreeMap<String, LineState>,
    /// Bus name to bus energization.
    #[serde(default)]
    pub buses: BTreeMap<String, BusState>,
    /// Lines held open.
    #[serde(default)]
    pub open: Vec<String>,
    /// Lines held faulted.
    #[serde(default)]
    pub fault: Vec<String>,
    /// Set when the authority failed to solve the network.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `GET health` response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthWire {
    /// The service considers itself healthy.
    #[serde(default)]
    pub ok: bool,
    /// Service identifier.
    #[serde(default)]
    pub service: String,
}
