// Copyright 2025 the Microplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout errors.
//!
//! Degenerate data (empty sets, single values, all zeros) is normalized, not
//! rejected. The variants here are configuration mistakes made by the caller.

use thiserror::Error;

/// Shorthand for results produced by the layout engine.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// A configuration error detected while laying out a chart.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum LayoutError {
    /// A fixed range was configured with fewer than two ticks, so no tick spacing exists.
    #[error("a fixed axis range needs at least 2 ticks, got {max_ticks}")]
    FixedRangeTickCount {
        /// The configured tick count.
        max_ticks: usize,
    },

    /// A projector was built over a zero-width (or non-finite) value range.
    ///
    /// This happens when raw data bounds are used instead of the bounds returned
    /// by axis layout.
    #[error("value range must be finite and non-zero, got {value_range}")]
    ZeroValueRange {
        /// The offending `max - min`.
        value_range: f64,
    },

    /// A configured range has a non-finite bound.
    #[error("range bounds must be finite: min={min}, max={max}")]
    NonFiniteRange {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
}
