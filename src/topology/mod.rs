//! Tools for inspecting a single HyperX topology.
//!
//! This module describes a topology given its widths, weights and
//! concentration, and maps terminal indices to router coordinates.

pub mod types;
pub mod describe;
pub mod coordinate;

// Re-export key types and functions for easier access
pub use types::{parse_list, TopologyError};
pub use describe::{describe, HyperxDescription};
pub use coordinate::{terminal_coordinate, Endianness, TerminalCoordinate};
