//! Staged enumeration of HyperX topologies.
//!
//! The search walks five nested stages, each narrowing the candidate before
//! handing it to the next:
//!
//! 1. dimension count and non-decreasing width vector (S)
//! 2. concentration (T)
//! 3. non-increasing weight vector (K), with radix and bisection checks
//! 4. channel count
//! 5. scoring and best-K maintenance
//!
//! The in-progress candidate is passed down by argument; a `Hyperx` record is
//! only built once every field is known, in stage 4. Canonical orderings of
//! widths and weights mean each isomorphism class is enumerated once.
//!
//! Wherever a quantity is monotonic in the loop variable the loop is cut
//! short instead of merely skipping, so the traversal only visits the
//! feasible frontier of each stage.

use log::{debug, info, trace, warn};
use serde::Serialize;

use super::bounds::{BoundsError, SearchBounds};
use super::hyperx::{self, Hyperx};
use super::results::ResultSet;
use crate::cost::CostFunction;

/// Counters describing one traversal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchSummary {
    /// Width vectors generated in stage 1
    pub width_vectors: u64,
    /// (widths, concentration) pairs that reached stage 3
    pub concentrations: u64,
    /// Weight vectors examined in stage 3
    pub weight_vectors: u64,
    /// Feasible candidates scored in stage 5
    pub candidates: u64,
    /// Candidates held in the result set after the run
    pub retained: usize,
    /// True when the evaluation budget stopped the search early
    pub truncated: bool,
}

/// Exhaustive bounded search over HyperX topologies
pub struct Engine<'a> {
    bounds: SearchBounds,
    cost_function: &'a dyn CostFunction,
    results: ResultSet,
    summary: SearchSummary,
}

impl<'a> Engine<'a> {
    /// Creates an engine, rejecting inconsistent bounds.
    ///
    /// The `max_terminals` sentinel is not resolved here; callers resolve it
    /// (see `SearchBounds::resolve_sentinels`) before constructing.
    pub fn new(
        bounds: SearchBounds,
        cost_function: &'a dyn CostFunction,
    ) -> Result<Self, BoundsError> {
        bounds.validate()?;
        let results = ResultSet::new(bounds.max_results);
        Ok(Self {
            bounds,
            cost_function,
            results,
            summary: SearchSummary::default(),
        })
    }

    /// Runs the full traversal, discarding the results of any previous run
    pub fn run(&mut self) -> SearchSummary {
        self.results.clear();
        self.summary = SearchSummary::default();

        info!(
            "Searching {}-{} dimensions, radix {}-{}, terminals {}-{}, bandwidth {}-{} using {}",
            self.bounds.min_dimensions,
            self.bounds.max_dimensions,
            self.bounds.min_radix,
            self.bounds.max_radix,
            self.bounds.min_terminals,
            self.bounds.max_terminals,
            self.bounds.min_bandwidth,
            self.bounds.max_bandwidth,
            self.cost_function.name()
        );

        self.stage1();

        self.summary.retained = self.results.len();
        info!(
            "Search complete: {} width vectors, {} weight vectors, {} feasible candidates, {} retained",
            self.summary.width_vectors,
            self.summary.weight_vectors,
            self.summary.candidates,
            self.summary.retained
        );
        self.summary.clone()
    }

    /// Best candidates found by the last run, in ascending cost order
    pub fn results(&self) -> &[Hyperx] {
        self.results.as_slice()
    }

    pub fn summary(&self) -> &SearchSummary {
        &self.summary
    }

    pub fn bounds(&self) -> &SearchBounds {
        &self.bounds
    }

    pub fn cost_function(&self) -> &dyn CostFunction {
        self.cost_function
    }

    fn stopped(&self) -> bool {
        self.summary.truncated
    }

    /// Stage 1: dimension count and width vectors
    fn stage1(&mut self) {
        for dimensions in self.bounds.min_dimensions..=self.bounds.max_dimensions {
            let width_limit = self.bounds.width_limit(dimensions);

            // more dimensions only shrink the limit further
            if width_limit < 2 {
                debug!("1: dimensions={} leaves no room for width 2, stopping", dimensions);
                break;
            }
            debug!("1: dimensions={} max_width={}", dimensions, width_limit);

            let mut widths = vec![2u64; dimensions as usize];
            loop {
                if self.stopped() {
                    return;
                }
                self.summary.width_vectors += 1;

                // assume one terminal per router at minimum
                let routers = hyperx::router_count(&widths);
                let base_radix = hyperx::unit_weight_ports(&widths) + 1;
                if routers <= self.bounds.max_terminals && base_radix <= self.bounds.max_radix {
                    self.stage2(&widths, routers);
                } else {
                    trace!("1s: SKIPPING S={:?} P={} R>={}", widths, routers, base_radix);
                }

                if widths[0] == width_limit {
                    break;
                }
                if self.bounds.fixed_width {
                    advance_uniform(&mut widths);
                } else {
                    advance_widths(&mut widths, width_limit);
                }
            }
        }
    }

    /// Stage 2: concentration
    fn stage2(&mut self, widths: &[u64], routers: u64) {
        debug_assert!(widths.windows(2).all(|w| w[0] <= w[1]));
        debug!("2: S={:?} P={}", widths, routers);

        let ports = hyperx::unit_weight_ports(widths);
        for concentration in self.bounds.min_concentration..=self.bounds.max_concentration {
            if self.stopped() {
                return;
            }

            let terminals = routers.saturating_mul(concentration);
            let base_radix = ports.saturating_add(concentration);
            let too_many_terminals = terminals > self.bounds.max_terminals;
            let too_big_radix = base_radix > self.bounds.max_radix;

            if terminals >= self.bounds.min_terminals && !too_many_terminals && !too_big_radix {
                self.stage3(widths, routers, concentration, terminals);
            } else {
                trace!("2s: SKIPPING S={:?} P={} T={}", widths, routers, concentration);
            }

            // both grow with the concentration
            if too_many_terminals || too_big_radix {
                break;
            }
        }
    }

    /// Stage 3: weight vectors, radix and bisection bandwidth
    fn stage3(&mut self, widths: &[u64], routers: u64, concentration: u64, terminals: u64) {
        self.summary.concentrations += 1;
        debug!("3: S={:?} T={} N={} P={}", widths, concentration, terminals, routers);

        let base_radix = concentration + hyperx::unit_weight_ports(widths);
        let delta_radix = self.bounds.max_radix - base_radix;
        let weight_limits: Vec<u64> = widths
            .iter()
            .map(|&w| (1 + delta_radix / (w - 1)).min(self.bounds.max_weight))
            .collect();
        debug!(
            "3: base_radix={} delta_radix={} max_weights={:?}",
            base_radix, delta_radix, weight_limits
        );

        let last_dim = widths.len() - 1;
        let mut weights = vec![1u64; widths.len()];
        let mut incremented = 0;
        loop {
            if let Some(budget) = self.bounds.evaluation_budget {
                if self.summary.weight_vectors >= budget {
                    warn!(
                        "Evaluation budget of {} weight vectors exhausted, results are partial",
                        budget
                    );
                    self.summary.truncated = true;
                    return;
                }
            }
            self.summary.weight_vectors += 1;

            let radix = hyperx::router_radix(widths, &weights, concentration);
            let too_small_radix = radix < self.bounds.min_radix;
            let too_big_radix = radix > self.bounds.max_radix;

            if too_small_radix || too_big_radix {
                trace!(
                    "3s: SKIPPING S={:?} T={} K={:?} R={}",
                    widths, concentration, weights, radix
                );
            } else {
                let bisections = hyperx::bisections(widths, &weights, concentration);
                let smallest = bisections.iter().copied().fold(f64::INFINITY, f64::min);
                let largest = bisections.iter().copied().fold(f64::NEG_INFINITY, f64::max);

                if smallest < self.bounds.min_bandwidth || largest > self.bounds.max_bandwidth {
                    trace!(
                        "3s: SKIPPING S={:?} T={} K={:?} R={} B={:?}",
                        widths, concentration, weights, radix, bisections
                    );
                } else {
                    self.stage4(widths, &weights, concentration, radix, bisections);
                }
            }

            // every later vector dominates this one once the last dimension moved
            if too_big_radix && incremented == last_dim {
                break;
            }

            if self.bounds.fixed_weight {
                if weights[0] >= weight_limits[last_dim] {
                    break;
                }
                advance_uniform(&mut weights);
                incremented = last_dim;
            } else {
                match advance_weights(&mut weights, &weight_limits) {
                    Some(dim) => incremented = dim,
                    None => break,
                }
            }
        }
    }

    /// Stage 4: channel count
    fn stage4(
        &mut self,
        widths: &[u64],
        weights: &[u64],
        concentration: u64,
        router_radix: u64,
        bisections: Vec<f64>,
    ) {
        debug_assert!(weights.windows(2).all(|w| w[0] >= w[1]));

        let routers = hyperx::router_count(widths);
        let terminals = routers * concentration;
        let candidate = Hyperx {
            dimensions: widths.len() as u64,
            widths: widths.to_vec(),
            routers,
            concentration,
            terminals,
            weights: weights.to_vec(),
            router_radix,
            bisections,
            channels: hyperx::channel_count(widths, weights, terminals),
            cost: 0.0,
        };
        debug!(
            "4: S={:?} T={} N={} K={:?} B={:?}",
            candidate.widths, candidate.concentration, candidate.terminals, candidate.weights,
            candidate.bisections
        );

        self.stage5(candidate);
    }

    /// Stage 5: scoring and best-K maintenance
    fn stage5(&mut self, mut candidate: Hyperx) {
        candidate.cost = self.cost_function.cost(&candidate);
        self.summary.candidates += 1;
        trace!(
            "5: S={:?} T={} N={} P={} K={:?} R={} cost={}",
            candidate.widths,
            candidate.concentration,
            candidate.terminals,
            candidate.routers,
            candidate.weights,
            candidate.router_radix,
            candidate.cost
        );

        self.results.offer(candidate);
    }
}

/// Advances a non-decreasing width vector to its successor.
///
/// The highest-index dimension below `limit` is incremented and every
/// dimension after it takes the same value. The caller stops once the first
/// dimension has reached `limit`.
fn advance_widths(widths: &mut [u64], limit: u64) {
    if let Some(dim) = widths.iter().rposition(|&w| w != limit) {
        widths[dim] += 1;
        let value = widths[dim];
        widths[dim + 1..].iter_mut().for_each(|w| *w = value);
    }
}

/// Advances a non-increasing weight vector to its successor.
///
/// The lowest-index dimension below its limit is incremented and every
/// dimension before it takes the same value. Returns the incremented
/// dimension, or `None` once every dimension is at its limit.
fn advance_weights(weights: &mut [u64], limits: &[u64]) -> Option<usize> {
    let dim = weights
        .iter()
        .zip(limits)
        .position(|(&weight, &limit)| weight != limit)?;
    weights[dim] += 1;
    let value = weights[dim];
    weights[..dim].iter_mut().for_each(|w| *w = value);
    Some(dim)
}

/// Flattened butterfly step: every dimension moves together
fn advance_uniform(values: &mut [u64]) {
    values.iter_mut().for_each(|v| *v += 1);
}
