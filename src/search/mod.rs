//! HyperX topology search.
//!
//! This module contains the candidate record, the bound set, the bounded
//! best-K result collection and the staged search engine that ties them
//! together.

pub mod bounds;
pub mod engine;
pub mod hyperx;
pub mod results;

// Re-export key types for easier access
pub use bounds::{BoundsError, SearchBounds};
pub use engine::{Engine, SearchSummary};
pub use hyperx::Hyperx;
pub use results::{by_cost, ResultSet};
