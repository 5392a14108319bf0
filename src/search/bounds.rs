//! Search bounds and their validation.
//!
//! `SearchBounds` is the complete set of numeric limits that define the
//! searched space. It is deserializable from YAML bounds documents and every
//! field has a default, so a document only needs to name what it changes.

use serde::{Deserialize, Serialize};

/// Default for "effectively unlimited" integer bounds (concentration, width, weight)
pub const UNBOUNDED: u64 = u32::MAX as u64 - 1;

/// `max_terminals` value meaning "twice `min_terminals`"
pub const MAX_TERMINALS_SENTINEL: u64 = 0;

/// Bound validation errors, one per violated relationship
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoundsError {
    #[error("mindimensions must be greater than 0")]
    MinDimensions,
    #[error("maxdimensions must be greater than or equal to mindimensions")]
    MaxDimensions,
    #[error("minradix must be greater than 1")]
    MinRadix,
    #[error("maxradix must be greater than or equal to minradix")]
    MaxRadix,
    #[error("maxconcentration must be greater than or equal to minconcentration")]
    MaxConcentration,
    #[error("minterminals must be greater than or equal to minradix")]
    MinTerminals,
    #[error("maxterminals must be greater than or equal to minterminals")]
    MaxTerminals,
    #[error("minbandwidth must be greater than 0.0")]
    MinBandwidth,
    #[error("maxbandwidth must be greater than or equal to minbandwidth")]
    MaxBandwidth,
    #[error("maxwidth must be greater than 1")]
    MaxWidth,
    #[error("maxweight must be greater than 0")]
    MaxWeight,
}

/// The bound set that defines the searched topology space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchBounds {
    pub min_dimensions: u64,
    pub max_dimensions: u64,
    pub min_radix: u64,
    pub max_radix: u64,
    pub min_concentration: u64,
    pub max_concentration: u64,
    pub min_terminals: u64,
    /// `MAX_TERMINALS_SENTINEL` until resolved
    pub max_terminals: u64,
    pub min_bandwidth: f64,
    pub max_bandwidth: f64,
    pub max_width: u64,
    pub max_weight: u64,
    /// Only search equal-width (flattened butterfly) topologies
    pub fixed_width: bool,
    /// Only search equal-weight (flattened butterfly) topologies
    pub fixed_weight: bool,
    pub max_results: usize,
    /// Ceiling on the number of weight vectors examined, `None` is unlimited.
    ///
    /// Wide bound sets (large radix with large terminal ranges) can make the
    /// traversal run for an arbitrarily long time. A budget cuts the search
    /// short and marks the run as truncated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation_budget: Option<u64>,
}

impl Default for SearchBounds {
    fn default() -> Self {
        Self {
            min_dimensions: 1,
            max_dimensions: 4,
            min_radix: 2,
            max_radix: 64,
            min_concentration: 1,
            max_concentration: UNBOUNDED,
            min_terminals: 32768,
            max_terminals: MAX_TERMINALS_SENTINEL,
            min_bandwidth: 0.5,
            max_bandwidth: f64::INFINITY,
            max_width: UNBOUNDED,
            max_weight: UNBOUNDED,
            fixed_width: false,
            fixed_weight: false,
            max_results: 10,
            evaluation_budget: None,
        }
    }
}

impl SearchBounds {
    /// Replaces the `max_terminals` sentinel with twice `min_terminals`
    pub fn resolve_sentinels(&mut self) {
        if self.max_terminals == MAX_TERMINALS_SENTINEL {
            self.max_terminals = self.min_terminals.saturating_mul(2);
            log::debug!("maxterminals derived from minterminals: {}", self.max_terminals);
        }
    }

    /// Checks every bound relationship, reporting the first violation
    pub fn validate(&self) -> Result<(), BoundsError> {
        if self.min_dimensions < 1 {
            return Err(BoundsError::MinDimensions);
        }
        if self.max_dimensions < self.min_dimensions {
            return Err(BoundsError::MaxDimensions);
        }
        if self.min_radix < 2 {
            return Err(BoundsError::MinRadix);
        }
        if self.max_radix < self.min_radix {
            return Err(BoundsError::MaxRadix);
        }
        if self.max_concentration < self.min_concentration {
            return Err(BoundsError::MaxConcentration);
        }
        if self.min_terminals < self.min_radix {
            return Err(BoundsError::MinTerminals);
        }
        if self.max_terminals < self.min_terminals {
            return Err(BoundsError::MaxTerminals);
        }
        // written so NaN fails as well
        if !(self.min_bandwidth > 0.0) {
            return Err(BoundsError::MinBandwidth);
        }
        if !(self.max_bandwidth >= self.min_bandwidth) {
            return Err(BoundsError::MaxBandwidth);
        }
        if self.max_width <= 1 {
            return Err(BoundsError::MaxWidth);
        }
        if self.max_weight < 1 {
            return Err(BoundsError::MaxWeight);
        }
        Ok(())
    }

    /// Largest width any dimension may take when searching `dimensions` dimensions.
    ///
    /// HyperX reserves at least one port for every other dimension; a
    /// flattened butterfly splits the radix evenly. Either way the result is
    /// clamped to `max_width`.
    pub fn width_limit(&self, dimensions: u64) -> u64 {
        let limit = if self.fixed_width {
            (self.max_radix - 1) / dimensions + 1
        } else {
            self.max_radix.saturating_sub(dimensions - 1)
        };
        limit.min(self.max_width)
    }
}
