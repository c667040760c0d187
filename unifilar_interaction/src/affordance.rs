// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use unifilar_model::LineState;

bitflags::bitflags! {
    /// Which panel actions are currently enabled.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Affordances: u8 {
        /// The switch can be opened (it is closed).
        const OPEN        = 0b0000_0001;
        /// The switch can be closed (it is open).
        const CLOSE       = 0b0000_0010;
        /// A fault can be injected (none present).
        const APPLY_FAULT = 0b0000_0100;
        /// The fault can be cleared (one is present).
        const CLEAR_FAULT = 0b0000_1000;
    }
}

impl Affordances {
    /// Gating for a line in `state`. Depends only on `open` and `fault`.
    #[must_use]
    pub fn for_state(state: &LineState) -> Self {
        let mut set = Self::empty();
        set.set(Self::OPEN, !state.open);
        set.set(Self::CLOSE, state.open);
        set.set(Self::APPLY_FAULT, !state.fault);
        set.set(Self::CLEAR_FAULT, state.fault);
        set
    }
}
