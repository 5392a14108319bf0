//! Full description of one HyperX topology.

use serde::Serialize;

use super::types::{validate_widths, TopologyError};
use crate::report::{format_float_list, format_list, Grid};
use crate::search::hyperx::{self, Hyperx};

/// Derived metrics of a topology with its channel count broken down
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HyperxDescription {
    pub hyperx: Hyperx,
    /// Terminal channels first, then the channels of each dimension
    pub channel_breakdown: Vec<u64>,
}

impl HyperxDescription {
    /// Two-row label/value table
    pub fn to_grid(&self) -> Grid {
        let h = &self.hyperx;
        let mut grid = Grid::new();
        grid.push_row(
            [
                "Dimensions",
                "Widths",
                "Weights",
                "Concentration",
                "Terminals",
                "Routers",
                "Radix",
                "Channels",
                "Bisections",
            ]
            .iter()
            .map(|label| label.to_string())
            .collect(),
        );
        grid.push_row(vec![
            h.dimensions.to_string(),
            format_list(&h.widths),
            format_list(&h.weights),
            h.concentration.to_string(),
            h.terminals.to_string(),
            h.routers.to_string(),
            h.router_radix.to_string(),
            format_list(&self.channel_breakdown),
            format_float_list(&h.bisections, 5),
        ]);
        grid
    }
}

/// Describe the topology with the given widths, weights and concentration
pub fn describe(
    widths: &[u64],
    weights: &[u64],
    concentration: u64,
) -> Result<HyperxDescription, TopologyError> {
    validate_widths(widths)?;
    if let Some(dimension) = weights.iter().position(|&k| k == 0) {
        return Err(TopologyError::InvalidWeight { dimension, weight: 0 });
    }
    if widths.len() != weights.len() {
        return Err(TopologyError::LengthMismatch {
            widths: widths.len(),
            weights: weights.len(),
        });
    }
    if concentration == 0 {
        return Err(TopologyError::InvalidConcentration);
    }

    let hyperx = Hyperx::new(widths.to_vec(), weights.to_vec(), concentration);
    let mut channel_breakdown = vec![hyperx.terminals];
    channel_breakdown.extend(hyperx::dimension_channels(widths, weights));

    Ok(HyperxDescription {
        hyperx,
        channel_breakdown,
    })
}
