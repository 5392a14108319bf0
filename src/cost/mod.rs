//! Cost functions for scoring candidate topologies.
//!
//! The search engine only depends on the `CostFunction` trait. Concrete
//! calculators are looked up by name through `create_cost_function`, which
//! is resolved once before a search starts.

pub mod calculators;

use std::collections::HashMap;

use crate::search::Hyperx;

pub use calculators::{ChannelCount, PortCount, RouterChannelCount, RouterCount};

/// Name of the cost function used when none is selected
pub const DEFAULT_COST_FUNCTION: &str = "router_channel_count";

/// Errors raised while resolving a cost function
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CostError {
    #[error("unknown cost function '{name}' (available: {available})")]
    Unknown { name: String, available: String },
}

/// Scores a finalized candidate; lower costs are better
pub trait CostFunction: Send + Sync {
    /// Registry name of this cost function
    fn name(&self) -> &'static str;

    /// Scalar cost of the candidate, must be finite
    fn cost(&self, hyperx: &Hyperx) -> f64;

    /// Names of the extra columns this cost function reports, in display order
    fn ext_fields(&self) -> &'static [&'static str] {
        &[]
    }

    /// Formatted value of every extra column for one candidate
    fn ext_values(&self, _hyperx: &Hyperx) -> HashMap<String, String> {
        HashMap::new()
    }
}

type Constructor = fn() -> Box<dyn CostFunction>;

fn router_channel_count() -> Box<dyn CostFunction> {
    Box::new(RouterChannelCount)
}

fn channel_count() -> Box<dyn CostFunction> {
    Box::new(ChannelCount)
}

fn router_count() -> Box<dyn CostFunction> {
    Box::new(RouterCount)
}

fn port_count() -> Box<dyn CostFunction> {
    Box::new(PortCount)
}

const REGISTRY: &[(&str, Constructor)] = &[
    ("router_channel_count", router_channel_count),
    ("channel_count", channel_count),
    ("router_count", router_count),
    ("port_count", port_count),
];

/// Names of every registered cost function
pub fn available_cost_functions() -> Vec<&'static str> {
    REGISTRY.iter().map(|(name, _)| *name).collect()
}

/// Instantiates the cost function registered under `name`
pub fn create_cost_function(name: &str) -> Result<Box<dyn CostFunction>, CostError> {
    REGISTRY
        .iter()
        .find(|(registered, _)| *registered == name)
        .map(|(_, constructor)| constructor())
        .ok_or_else(|| CostError::Unknown {
            name: name.to_string(),
            available: available_cost_functions().join(", "),
        })
}
