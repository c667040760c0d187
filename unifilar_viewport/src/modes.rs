// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Where [`Viewport::fit`](crate::Viewport::fit) places the content after scaling it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Align the content's minimum corner with the view origin; a following
    /// [`center`](crate::Viewport::center) then centres it.
    #[default]
    AlignMin,
    /// Centre the content as part of the fit.
    Center,
}
