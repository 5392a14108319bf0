//! # HyperX Search - Exhaustive bounded search of HyperX network topologies
//!
//! This library enumerates multi-dimensional direct network topologies
//! (HyperX and its flattened-butterfly special case) within caller-supplied
//! bounds, scores every feasible candidate with a pluggable cost function
//! and keeps the lowest-cost candidates.
//!
//! ## Overview
//!
//! A HyperX is defined by a dimension count L, a width per dimension S
//! (routers along that dimension), a concentration T (terminals per router)
//! and a weight per dimension K (parallel channels between each pair of
//! routers in a row). From these follow the router count P, terminal count N,
//! router radix R, channel count and the relative bisection bandwidth of each
//! dimension.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `search`: Candidate record, bounds, best-K results and the staged engine
//! - `cost`: Cost function trait and the name-keyed calculator registry
//! - `config_loader`: YAML bounds documents and command-line overrides
//! - `report`: Result tables, settings dump and JSON reports
//! - `topology`: Describing one topology and locating terminals in it
//! - `scale`: Largest-network sweeps across router radices
//!
//! ## Example Usage
//!
//! ```rust
//! use hyperx_search::cost::create_cost_function;
//! use hyperx_search::search::{Engine, SearchBounds};
//!
//! let mut bounds = SearchBounds {
//!     max_dimensions: 2,
//!     max_radix: 16,
//!     min_terminals: 64,
//!     ..SearchBounds::default()
//! };
//! bounds.resolve_sentinels();
//!
//! let calc = create_cost_function("channel_count")?;
//! let mut engine = Engine::new(bounds, calc.as_ref())?;
//! engine.run();
//!
//! for hyperx in engine.results() {
//!     println!("S={:?} K={:?} T={} cost={}", hyperx.widths, hyperx.weights,
//!              hyperx.concentration, hyperx.cost);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Library errors are typed (`BoundsError`, `CostError`, `TopologyError`).
//! File handling and the binaries use `color_eyre` for error reports with
//! context. Infeasible candidates are never errors; they only prune the
//! search.

pub mod config_loader;
pub mod cost;
pub mod report;
pub mod scale;
pub mod search;
pub mod topology;
