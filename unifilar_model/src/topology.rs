// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable network topology: buses with geographic positions, the lines
//! that connect them, and decorative transformers.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::error::LookupError;
use crate::wire::TopologyWire;

/// A geographic coordinate pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    /// Longitude (grows eastward).
    pub lng: f64,
    /// Latitude (grows northward).
    pub lat: f64,
}

impl GeoPoint {
    /// Creates a coordinate pair.
    #[must_use]
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// A named electrical node with a fixed geographic location.
#[derive(Clone, Debug, PartialEq)]
pub struct Bus {
    /// Unique bus name.
    pub name: String,
    /// Geographic position.
    pub position: GeoPoint,
}

/// A switchable segment between two buses.
///
/// Lines carry no state of their own; see [`StateStore`](crate::StateStore).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    /// Unique line name.
    pub name: String,
    /// First endpoint (display order only).
    pub from: String,
    /// Second endpoint (display order only).
    pub to: String,
}

/// A decorative connector between a higher- and a lower-voltage bus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transformer {
    /// Transformer name.
    pub name: String,
    /// Higher-voltage side bus.
    pub hv_bus: String,
    /// Lower-voltage side bus; the marker is drawn here.
    pub lv_bus: String,
}

/// The immutable description of a network after load.
///
/// Every line and transformer endpoint is guaranteed to name a bus in the
/// topology; [`Topology::from_wire`] and [`TopologyBuilder::build`] reject
/// anything else with [`LookupError::UnknownBus`].
#[derive(Clone, Debug, Default)]
pub struct Topology {
    buses: Vec<Bus>,
    lines: Vec<Line>,
    transformers: Vec<Transformer>,
    bus_index: HashMap<String, usize>,
    line_index: HashMap<String, usize>,
}

impl Topology {
    /// Starts building a topology by hand.
    #[must_use]
    pub fn builder() -> TopologyBuilder {
        TopologyBuilder::default()
    }

    /// Builds a topology from the authority's wire form.
    ///
    /// Buses keep the map's (sorted) order; lines and transformers keep wire
    /// order, which is also their drawing order.
    pub fn from_wire(wire: TopologyWire) -> Result<Self, LookupError> {
        let buses = wire
            .buses
            .into_iter()
            .map(|(name, [lng, lat])| Bus {
                name,
                position: GeoPoint::new(lng, lat),
            })
            .collect();
        let lines = wire
            .lines
            .into_iter()
            .map(|(name, from, to)| Line { name, from, to })
            .collect();
        let transformers = wire
            .trafos
            .into_iter()
            .map(|(name, hv_bus, lv_bus)| Transformer {
                name,
                hv_bus,
                lv_bus,
            })
            .collect();
        Self::assemble(buses, lines, transformers)
    }

    fn assemble(
        buses: Vec<Bus>,
        lines: Vec<Line>,
        transformers: Vec<Transformer>,
    ) -> Result<Self, LookupError> {
        let mut bus_index = HashMap::with_capacity(buses.len());
        for (idx, bus) in buses.iter().enumerate() {
            bus_index.insert(bus.name.clone(), idx);
        }

        let require = |name: &String| {
            if bus_index.contains_key(name) {
                Ok(())
            } else {
                Err(LookupError::UnknownBus(name.clone()))
            }
        };
        for line in &lines {
            require(&line.from)?;
            require(&line.to)?;
        }
        for trafo in &transformers {
            require(&trafo.hv_bus)?;
            require(&trafo.lv_bus)?;
        }

        let mut line_index = HashMap::with_capacity(lines.len());
        for (idx, line) in lines.iter().enumerate() {
            line_index.insert(line.name.clone(), idx);
        }

        Ok(Self {
            buses,
            lines,
            transformers,
            bus_index,
            line_index,
        })
    }

    /// Returns all buses.
    #[must_use]
    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    /// Returns all lines in drawing order.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Returns all transformers in drawing order.
    #[must_use]
    pub fn transformers(&self) -> &[Transformer] {
        &self.transformers
    }

    /// Looks up a bus by name.
    pub fn bus(&self, name: &str) -> Result<&Bus, LookupError> {
        self.bus_index
            .get(name)
            .map(|&idx| &self.buses[idx])
            .ok_or_else(|| LookupError::UnknownBus(name.into()))
    }

    /// Looks up a line by name.
    pub fn line(&self, name: &str) -> Result<&Line, LookupError> {
        self.line_index
            .get(name)
            .map(|&idx| &self.lines[idx])
            .ok_or_else(|| LookupError::UnknownLine(name.into()))
    }

    /// Returns `true` if a line with this name exists.
    #[must_use]
    pub fn contains_line(&self, name: &str) -> bool {
        self.line_index.contains_key(name)
    }

    /// Line names in topology order, as offered by line selectors.
    pub fn line_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(|line| line.name.as_str())
    }

    /// Iterates over `(name, position)` for every bus.
    pub fn bus_positions(&self) -> impl Iterator<Item = (&str, GeoPoint)> + '_ {
        self.buses.iter().map(|bus| (bus.name.as_str(), bus.position))
    }
}

/// Incremental construction of a [`Topology`], mostly for tests and fixtures.
#[derive(Clone, Debug, Default)]
pub struct TopologyBuilder {
    buses: BTreeMap<String, GeoPoint>,
    lines: Vec<Line>,
    transformers: Vec<Transformer>,
}

impl TopologyBuilder {
    /// Adds (or moves) a bus.
    #[must_use]
    pub fn bus(mut self, name: &str, lng: f64, lat: f64) -> Self {
        self.buses.insert(name.into(), GeoPoint::new(lng, lat));
        self
    }

    /// Adds a line between two buses.
    #[must_use]
    pub fn line(mut self, name: &str, from: &str, to: &str) -> Self {
        self.lines.push(Line {
            name: name.into(),
            from: from.into(),
            to: to.into(),
        });
        self
    }

    /// Adds a transformer from `hv_bus` down to `lv_bus`.
    #[must_use]
    pub fn transformer(mut self, name: &str, hv_bus: &str, lv_bus: &str) -> Self {
        self.transformers.push(Transformer {
            name: name.into(),
            hv_bus: hv_bus.into(),
            lv_bus: lv_bus.into(),
        });
        self
    }

    /// Resolves every endpoint and freezes the topology.
    pub fn build(self) -> Result<Topology, LookupError> {
        let buses = self
            .buses
            .into_iter()
            .map(|(name, position)| Bus { name, position })
            .collect();
        Topology::assemble(buses, self.lines, self.transformers)
    }
}
