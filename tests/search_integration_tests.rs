use std::collections::BTreeSet;
use std::io::Write;

use tempfile::NamedTempFile;

use hyperx_search::config_loader::{load_bounds, prepare_bounds, SearchOverrides};
use hyperx_search::cost::{ChannelCount, CostFunction, RouterChannelCount};
use hyperx_search::search::{BoundsError, Engine, Hyperx, SearchBounds};

/// Ranks by radix first, then routers, so ties on radix are common
struct RadixThenRouters;

impl CostFunction for RadixThenRouters {
    fn name(&self) -> &'static str {
        "radix_then_routers"
    }

    fn cost(&self, hyperx: &Hyperx) -> f64 {
        (hyperx.router_radix * 1000 + hyperx.routers) as f64
    }
}

fn small_bounds() -> SearchBounds {
    SearchBounds {
        min_dimensions: 1,
        max_dimensions: 3,
        min_radix: 4,
        max_radix: 12,
        min_concentration: 1,
        max_concentration: 4,
        min_terminals: 8,
        max_terminals: 200,
        min_bandwidth: 0.5,
        max_bandwidth: 3.0,
        max_width: 6,
        max_weight: 3,
        fixed_width: false,
        fixed_weight: false,
        max_results: 1000,
        evaluation_budget: None,
    }
}

/// Every vector of `len` values in `[lo, hi]`
fn all_vectors(len: usize, lo: u64, hi: u64) -> Vec<Vec<u64>> {
    let mut vectors = vec![Vec::new()];
    for _ in 0..len {
        vectors = vectors
            .into_iter()
            .flat_map(|prefix| {
                (lo..=hi).map(move |v| {
                    let mut next = prefix.clone();
                    next.push(v);
                    next
                })
            })
            .collect();
    }
    vectors
}

/// Every feasible canonical candidate, scored, in stable cost order
fn brute_force(bounds: &SearchBounds, cost_function: &dyn CostFunction) -> Vec<Hyperx> {
    let mut found = Vec::new();
    for dims in bounds.min_dimensions..=bounds.max_dimensions {
        let dims = dims as usize;
        for widths in all_vectors(dims, 2, bounds.max_width) {
            if !widths.windows(2).all(|w| w[0] <= w[1]) {
                continue;
            }
            if bounds.fixed_width && widths.iter().any(|&w| w != widths[0]) {
                continue;
            }
            for concentration in bounds.min_concentration..=bounds.max_concentration {
                for weights in all_vectors(dims, 1, bounds.max_weight) {
                    if !weights.windows(2).all(|k| k[0] >= k[1]) {
                        continue;
                    }
                    if bounds.fixed_weight && weights.iter().any(|&k| k != weights[0]) {
                        continue;
                    }

                    let mut hyperx = Hyperx::new(widths.clone(), weights, concentration);
                    let feasible = hyperx.terminals >= bounds.min_terminals
                        && hyperx.terminals <= bounds.max_terminals
                        && hyperx.router_radix >= bounds.min_radix
                        && hyperx.router_radix <= bounds.max_radix
                        && hyperx
                            .bisections
                            .iter()
                            .all(|&b| b >= bounds.min_bandwidth && b <= bounds.max_bandwidth);
                    if feasible {
                        hyperx.cost = cost_function.cost(&hyperx);
                        found.push(hyperx);
                    }
                }
            }
        }
    }
    found.sort_by(|a, b| a.cost.total_cmp(&b.cost));
    found
}

fn key(hyperx: &Hyperx) -> (Vec<u64>, Vec<u64>, u64) {
    (hyperx.widths.clone(), hyperx.weights.clone(), hyperx.concentration)
}

fn run(bounds: SearchBounds, cost_function: &dyn CostFunction) -> Vec<Hyperx> {
    let mut engine = Engine::new(bounds, cost_function).unwrap();
    engine.run();
    engine.results().to_vec()
}

fn assert_invariants(bounds: &SearchBounds, results: &[Hyperx]) {
    assert!(results.len() <= bounds.max_results);
    assert!(results.windows(2).all(|pair| pair[0].cost <= pair[1].cost));

    for res in results {
        assert!(res.is_canonical(), "not canonical: {:?}", res);
        assert_eq!(res.dimensions as usize, res.widths.len());
        assert_eq!(res.routers, res.widths.iter().product::<u64>());
        assert_eq!(res.terminals, res.routers * res.concentration);
        assert!(res.router_radix >= bounds.min_radix && res.router_radix <= bounds.max_radix);
        for &b in &res.bisections {
            assert!(b >= bounds.min_bandwidth && b <= bounds.max_bandwidth);
        }
        assert_eq!(res, &{
            let mut expected =
                Hyperx::new(res.widths.clone(), res.weights.clone(), res.concentration);
            expected.cost = res.cost;
            expected
        });
    }
}

#[test]
fn test_concrete_single_dimension_scenario() {
    let bounds = SearchBounds {
        min_dimensions: 1,
        max_dimensions: 1,
        min_radix: 2,
        max_radix: 4,
        min_concentration: 1,
        max_concentration: 1,
        min_terminals: 2,
        max_terminals: 8,
        // the lower bandwidth bound must be positive
        min_bandwidth: f64::MIN_POSITIVE,
        max_bandwidth: f64::INFINITY,
        max_width: 4,
        max_weight: 1,
        fixed_width: false,
        fixed_weight: false,
        max_results: 5,
        evaluation_budget: None,
    };

    let results = run(bounds, &ChannelCount);
    let summary: Vec<(u64, u64, f64)> = results
        .iter()
        .map(|h| (h.widths[0], h.channels, h.cost))
        .collect();
    assert_eq!(summary, vec![(2, 3, 3.0), (3, 6, 6.0), (4, 10, 10.0)]);
}

#[test]
fn test_engine_finds_every_feasible_candidate() {
    for (fixed_width, fixed_weight) in [(false, false), (true, false), (false, true), (true, true)] {
        let bounds = SearchBounds {
            fixed_width,
            fixed_weight,
            ..small_bounds()
        };

        let expected = brute_force(&bounds, &ChannelCount);
        let results = run(bounds.clone(), &ChannelCount);
        assert!(!expected.is_empty());
        assert!(expected.len() < bounds.max_results);
        assert_invariants(&bounds, &results);

        let expected_keys: BTreeSet<_> = expected.iter().map(key).collect();
        let result_keys: BTreeSet<_> = results.iter().map(key).collect();
        assert_eq!(result_keys.len(), results.len(), "duplicate candidates");
        assert_eq!(
            result_keys, expected_keys,
            "fixed_width={} fixed_weight={}",
            fixed_width, fixed_weight
        );
    }
}

#[test]
fn test_top_k_matches_brute_force() {
    for k in [1, 5, 17] {
        for cost_function in [&ChannelCount as &dyn CostFunction, &RouterChannelCount, &RadixThenRouters] {
            let bounds = SearchBounds {
                max_results: k,
                ..small_bounds()
            };

            let expected = brute_force(&bounds, cost_function);
            let results = run(bounds.clone(), cost_function);
            assert_invariants(&bounds, &results);

            let expected_costs: Vec<f64> = expected.iter().take(k).map(|h| h.cost).collect();
            let result_costs: Vec<f64> = results.iter().map(|h| h.cost).collect();
            assert_eq!(result_costs, expected_costs, "k={} cost={}", k, cost_function.name());

            // every retained candidate is genuinely feasible
            let feasible: BTreeSet<_> = expected.iter().map(key).collect();
            assert!(results.iter().all(|h| feasible.contains(&key(h))));
        }
    }
}

#[test]
fn test_repeated_runs_are_identical() {
    let bounds = SearchBounds {
        max_results: 12,
        ..small_bounds()
    };

    let mut engine = Engine::new(bounds.clone(), &RadixThenRouters).unwrap();
    engine.run();
    let first = engine.results().to_vec();
    engine.run();
    assert_eq!(first, engine.results());

    // a fresh engine agrees as well
    assert_eq!(first, run(bounds, &RadixThenRouters));
}

#[test]
fn test_zero_results_requested() {
    let bounds = SearchBounds {
        max_results: 0,
        ..small_bounds()
    };
    let mut engine = Engine::new(bounds, &ChannelCount).unwrap();
    let summary = engine.run();
    assert!(engine.results().is_empty());
    assert!(summary.candidates > 0);
}

#[test]
fn test_contradictory_bounds_fail_construction() {
    let bounds = SearchBounds {
        min_bandwidth: 2.0,
        max_bandwidth: 1.0,
        ..small_bounds()
    };
    assert_eq!(
        Engine::new(bounds, &ChannelCount).err(),
        Some(BoundsError::MaxBandwidth)
    );

    let bounds = SearchBounds {
        min_terminals: 2,
        min_radix: 4,
        ..small_bounds()
    };
    let err = Engine::new(bounds, &ChannelCount).err().unwrap();
    assert_eq!(err.to_string(), "minterminals must be greater than or equal to minradix");
}

#[test]
fn test_bounds_document_round_trip() {
    let bounds = SearchBounds {
        max_bandwidth: f64::INFINITY,
        evaluation_budget: Some(5000),
        ..small_bounds()
    };

    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", serde_yaml::to_string(&bounds).unwrap()).unwrap();

    assert_eq!(load_bounds(temp_file.path()).unwrap(), bounds);

    let prepared = prepare_bounds(Some(temp_file.path()), &SearchOverrides::default()).unwrap();
    let results = run(prepared, &ChannelCount);
    assert!(!results.is_empty());
}
