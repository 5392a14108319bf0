//! HyperX candidate record and its derived metrics.
//!
//! A `Hyperx` describes one topology instance: dimension widths (S),
//! concentration (T), per-dimension weights (K) and everything derived from
//! them. The derivation helpers are free functions so the search stages can
//! evaluate partial configurations without building a full record.

use serde::{Deserialize, Serialize};

/// One HyperX (or flattened-butterfly) topology instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hyperx {
    /// Number of dimensions (L)
    pub dimensions: u64,
    /// Routers per dimension (S), non-decreasing
    pub widths: Vec<u64>,
    /// Total routers (P), the product of all widths
    pub routers: u64,
    /// Terminals per router (T)
    pub concentration: u64,
    /// Total terminals (N = P * T)
    pub terminals: u64,
    /// Channel multiplicity per dimension (K), non-increasing
    pub weights: Vec<u64>,
    /// Ports per router (R)
    pub router_radix: u64,
    /// Relative bisection bandwidth per dimension (B)
    pub bisections: Vec<f64>,
    /// Terminal channels plus inter-router channels
    pub channels: u64,
    /// Score assigned by the cost function, lower is better
    pub cost: f64,
}

impl Hyperx {
    /// Builds a fully derived, unscored record from its defining parameters.
    ///
    /// `widths` and `weights` must have equal length. The cost is left at
    /// zero until a cost function scores the record.
    pub fn new(widths: Vec<u64>, weights: Vec<u64>, concentration: u64) -> Self {
        debug_assert_eq!(widths.len(), weights.len());
        let routers = router_count(&widths);
        let terminals = routers.saturating_mul(concentration);
        Self {
            dimensions: widths.len() as u64,
            router_radix: router_radix(&widths, &weights, concentration),
            bisections: bisections(&widths, &weights, concentration),
            channels: channel_count(&widths, &weights, terminals),
            widths,
            routers,
            concentration,
            terminals,
            weights,
            cost: 0.0,
        }
    }

    /// Channels that connect routers to each other (excludes terminal channels)
    pub fn inter_router_channels(&self) -> u64 {
        self.channels - self.terminals
    }

    /// Total router ports in the network
    pub fn total_ports(&self) -> u64 {
        self.routers.saturating_mul(self.router_radix)
    }

    /// Checks the canonical ordering: widths non-decreasing, weights non-increasing
    pub fn is_canonical(&self) -> bool {
        self.widths.windows(2).all(|w| w[0] <= w[1])
            && self.weights.windows(2).all(|w| w[0] >= w[1])
    }
}

/// Number of routers: the product of all widths (saturates on overflow)
pub fn router_count(widths: &[u64]) -> u64 {
    widths.iter().fold(1u64, |acc, &w| acc.saturating_mul(w))
}

/// Sum of (width - 1) over all dimensions, i.e. the inter-router ports of a
/// router with every weight at one
pub fn unit_weight_ports(widths: &[u64]) -> u64 {
    widths.iter().map(|&w| w - 1).sum()
}

/// Router radix: R = T + sum((width_d - 1) * weight_d)
pub fn router_radix(widths: &[u64], weights: &[u64], concentration: u64) -> u64 {
    widths
        .iter()
        .zip(weights)
        .fold(concentration, |acc, (&w, &k)| {
            acc.saturating_add((w - 1).saturating_mul(k))
        })
}

/// Relative bisection bandwidth of each dimension: (width * weight) / (2 * T)
pub fn bisections(widths: &[u64], weights: &[u64], concentration: u64) -> Vec<f64> {
    widths
        .iter()
        .zip(weights)
        .map(|(&w, &k)| (w as f64 * k as f64) / (2.0 * concentration as f64))
        .collect()
}

/// Number of unordered router pairs in one row of a dimension
pub fn triangular(width: u64) -> u64 {
    width * (width - 1) / 2
}

/// Inter-router channels contributed by each dimension.
///
/// Dimension d contributes weight_d * C(width_d, 2) channels per row, and
/// there is one row for every combination of positions in the other
/// dimensions.
pub fn dimension_channels(widths: &[u64], weights: &[u64]) -> Vec<u64> {
    (0..widths.len())
        .map(|dim| {
            let rows = widths
                .iter()
                .enumerate()
                .filter(|&(other, _)| other != dim)
                .fold(1u64, |acc, (_, &w)| acc.saturating_mul(w));
            weights[dim]
                .saturating_mul(triangular(widths[dim]))
                .saturating_mul(rows)
        })
        .collect()
}

/// Total channel count: terminal channels plus every dimension's channels
pub fn channel_count(widths: &[u64], weights: &[u64], terminals: u64) -> u64 {
    dimension_channels(widths, weights)
        .into_iter()
        .fold(terminals, |acc, c| acc.saturating_add(c))
}
