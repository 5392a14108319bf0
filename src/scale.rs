//! Largest-network sweeps.
//!
//! For a given maximum router radix, finds the largest terminal count for
//! which the search still produces a feasible topology. Terminal counts are
//! probed with a binary search, each probe being a full search restricted to
//! `[n, 2n]` terminals with a single retained result. Independent radices
//! are swept in parallel; every probe owns its own engine.

use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use crate::cost::CostFunction;
use crate::search::{BoundsError, Engine, Hyperx, SearchBounds};

/// Largest network found for one maximum radix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalePoint {
    pub max_radix: u64,
    pub terminals: u64,
    pub routers: u64,
    pub channels: u64,
    pub terminals_per_router: f64,
    pub channels_per_terminal: f64,
}

/// Best topology with at least `min_terminals` terminals, if any
fn probe(
    template: &SearchBounds,
    max_radix: u64,
    min_terminals: u64,
    cost_function: &dyn CostFunction,
) -> Result<Option<Hyperx>, BoundsError> {
    let bounds = SearchBounds {
        max_radix,
        min_terminals,
        max_terminals: min_terminals.saturating_mul(2),
        max_results: 1,
        ..template.clone()
    };
    let mut engine = Engine::new(bounds, cost_function)?;
    engine.run();
    Ok(engine.results().first().cloned())
}

/// Binary search for the largest feasible terminal count at `max_radix`.
///
/// Returns `None` when not even the smallest network is feasible.
pub fn find_largest_network(
    template: &SearchBounds,
    max_radix: u64,
    cost_function: &dyn CostFunction,
) -> Result<Option<ScalePoint>, BoundsError> {
    let mut bot = template.min_radix.max(2);
    let mut top = max_radix
        .saturating_pow(template.max_dimensions.min(64) as u32 + 1)
        .max(bot);

    let mut best = match probe(template, max_radix, bot, cost_function)? {
        Some(hyperx) => hyperx,
        None => {
            debug!("radix {}: no feasible network with {} terminals", max_radix, bot);
            return Ok(None);
        }
    };

    while bot < top {
        let mid = (top - bot) / 2 + bot;
        let mid = if mid == bot { bot + 1 } else { mid };
        match probe(template, max_radix, mid, cost_function)? {
            Some(hyperx) => {
                debug!("radix {}: {} terminals feasible", max_radix, mid);
                best = hyperx;
                bot = mid;
            }
            None => {
                debug!("radix {}: {} terminals infeasible", max_radix, mid);
                top = mid - 1;
            }
        }
    }

    Ok(Some(ScalePoint {
        max_radix,
        terminals: bot,
        routers: best.routers,
        channels: best.channels,
        terminals_per_router: bot as f64 / best.routers as f64,
        channels_per_terminal: best.channels as f64 / bot as f64,
    }))
}

/// Find the largest network for every radix in `radices`, in parallel.
///
/// Points come back in the order of `radices`; radices with no feasible
/// network are omitted.
pub fn sweep(
    template: &SearchBounds,
    radices: &[u64],
    cost_function: &dyn CostFunction,
) -> Result<Vec<ScalePoint>, BoundsError> {
    info!("Sweeping {} radices with {} threads", radices.len(), rayon::current_num_threads());

    let points: Vec<Option<ScalePoint>> = radices
        .par_iter()
        .map(|&radix| find_largest_network(template, radix, cost_function))
        .collect::<Result<_, _>>()?;

    Ok(points.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::ChannelCount;

    fn template() -> SearchBounds {
        SearchBounds {
            max_dimensions: 1,
            min_concentration: 1,
            max_concentration: 1,
            min_bandwidth: 0.5,
            ..SearchBounds::default()
        }
    }

    #[test]
    fn test_single_dimension_largest_network() {
        // one dimension, one terminal per router: width = radix, so radix 4
        // supports at most 4 terminals
        let point = find_largest_network(&template(), 4, &ChannelCount)
            .unwrap()
            .unwrap();
        assert_eq!(point.terminals, 4);
        assert_eq!(point.routers, 4);
        assert_eq!(point.channels, 10);
        assert_eq!(point.terminals_per_router, 1.0);
    }

    #[test]
    fn test_sweep_preserves_order() {
        let points = sweep(&template(), &[3, 5, 4], &ChannelCount).unwrap();
        let radices: Vec<u64> = points.iter().map(|p| p.max_radix).collect();
        assert_eq!(radices, vec![3, 5, 4]);
        let terminals: Vec<u64> = points.iter().map(|p| p.terminals).collect();
        assert_eq!(terminals, vec![3, 5, 4]);
    }

    #[test]
    fn test_infeasible_radix() {
        let mut bounds = template();
        bounds.min_bandwidth = 100.0;
        assert_eq!(find_largest_network(&bounds, 4, &ChannelCount).unwrap(), None);
    }
}
