//! Shared topology types.
//!
//! Errors raised while validating user-supplied topology parameters and the
//! comma-separated list parser used by the command-line tools.

/// Errors for invalid topology parameters
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TopologyError {
    #[error("width of dimension {dimension} must be greater than 1 (got {width})")]
    InvalidWidth { dimension: usize, width: u64 },

    #[error("weight of dimension {dimension} must be greater than 0 (got {weight})")]
    InvalidWeight { dimension: usize, weight: u64 },

    #[error("widths and weights must have the same length ({widths} vs {weights})")]
    LengthMismatch { widths: usize, weights: usize },

    #[error("at least one dimension is required")]
    NoDimensions,

    #[error("concentration must be greater than 0")]
    InvalidConcentration,

    #[error("terminal {terminal} is out of range for {terminals} terminals")]
    TerminalOutOfRange { terminal: u64, terminals: u64 },

    #[error("offset {offset} must be smaller in magnitude than {terminals} terminals")]
    OffsetOutOfRange { offset: i64, terminals: u64 },

    #[error("invalid list element '{0}'")]
    InvalidList(String),
}

/// Parse a comma-separated list of integers such as `2,3,4`
pub fn parse_list(text: &str) -> Result<Vec<u64>, TopologyError> {
    text.split(',')
        .map(|item| {
            let item = item.trim();
            item.parse::<u64>()
                .map_err(|_| TopologyError::InvalidList(item.to_string()))
        })
        .collect()
}

/// Check that every width is at least 2
pub fn validate_widths(widths: &[u64]) -> Result<(), TopologyError> {
    if widths.is_empty() {
        return Err(TopologyError::NoDimensions);
    }
    match widths.iter().position(|&w| w < 2) {
        Some(dimension) => Err(TopologyError::InvalidWidth {
            dimension,
            width: widths[dimension],
        }),
        None => Ok(()),
    }
}
