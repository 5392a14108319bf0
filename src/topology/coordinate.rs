//! Terminal index to router coordinate mapping.
//!
//! Terminals are numbered with the concentration as the fastest-moving
//! digit, followed by one digit per dimension: terminal `t` sits at port
//! `t % T` of the router whose coordinates are the remaining mixed-radix
//! digits of `t / T`.

use std::fmt;

use super::types::{validate_widths, TopologyError};

/// Digit order used when rendering a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    /// `port-x,y,z`
    #[default]
    Little,
    /// `z,y,x-port`
    Big,
}

/// Location of a terminal: its port on the router and the router's coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalCoordinate {
    /// Terminal index after the offset was applied
    pub terminal: u64,
    /// Port within the router
    pub port: u64,
    /// Router coordinate, one entry per dimension
    pub router: Vec<u64>,
}

impl TerminalCoordinate {
    pub fn render(&self, endianness: Endianness) -> String {
        let mut router: Vec<String> = self.router.iter().map(|c| c.to_string()).collect();
        match endianness {
            Endianness::Little => format!("{}-{}", self.port, router.join(",")),
            Endianness::Big => {
                router.reverse();
                format!("{}-{}", router.join(","), self.port)
            }
        }
    }
}

impl fmt::Display for TerminalCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(Endianness::Little))
    }
}

/// Locate `terminal`, shifted cyclically by `offset`, in a HyperX
pub fn terminal_coordinate(
    widths: &[u64],
    concentration: u64,
    terminal: u64,
    offset: i64,
) -> Result<TerminalCoordinate, TopologyError> {
    validate_widths(widths)?;
    if concentration == 0 {
        return Err(TopologyError::InvalidConcentration);
    }

    let terminals = widths
        .iter()
        .try_fold(concentration, |acc, &w| acc.checked_mul(w))
        .ok_or(TopologyError::TerminalOutOfRange {
            terminal,
            terminals: u64::MAX,
        })?;
    if terminal >= terminals {
        return Err(TopologyError::TerminalOutOfRange { terminal, terminals });
    }
    if offset.unsigned_abs() >= terminals {
        return Err(TopologyError::OffsetOutOfRange { offset, terminals });
    }

    let shifted = (terminal as i128 + offset as i128).rem_euclid(terminals as i128) as u64;

    let port = shifted % concentration;
    let mut rem = shifted / concentration;
    let router = widths
        .iter()
        .map(|&w| {
            let digit = rem % w;
            rem /= w;
            digit
        })
        .collect();

    Ok(TerminalCoordinate {
        terminal: shifted,
        port,
        router,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_digits() {
        // 4x3 routers, 2 terminals each: 23 = 1 + 2 * (3 + 4 * 2)
        let coord = terminal_coordinate(&[4, 3], 2, 23, 0).unwrap();
        assert_eq!(coord.port, 1);
        assert_eq!(coord.router, vec![3, 2]);
        assert_eq!(coord.render(Endianness::Little), "1-3,2");
        assert_eq!(coord.render(Endianness::Big), "2,3-1");
        assert_eq!(coord.to_string(), "1-3,2");
    }

    #[test]
    fn test_offset_wraps() {
        let coord = terminal_coordinate(&[4, 3], 2, 23, 1).unwrap();
        assert_eq!(coord.terminal, 0);
        assert_eq!(coord.router, vec![0, 0]);

        let coord = terminal_coordinate(&[4, 3], 2, 0, -1).unwrap();
        assert_eq!(coord.terminal, 23);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            terminal_coordinate(&[2, 2], 1, 4, 0),
            Err(TopologyError::TerminalOutOfRange { terminal: 4, terminals: 4 })
        );
        assert_eq!(
            terminal_coordinate(&[2, 2], 1, 0, -4),
            Err(TopologyError::OffsetOutOfRange { offset: -4, terminals: 4 })
        );
    }
}
