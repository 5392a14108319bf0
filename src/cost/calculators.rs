//! Built-in cost calculators.

use std::collections::HashMap;

use super::CostFunction;
use crate::search::Hyperx;

/// Ratio formatted with two decimals, guarding against empty denominators
fn ratio(numerator: u64, denominator: u64) -> String {
    if denominator == 0 {
        return "-".to_string();
    }
    format!("{:.2}", numerator as f64 / denominator as f64)
}

/// Routers plus channels, the two dominant hardware components
#[derive(Debug, Clone, Copy, Default)]
pub struct RouterChannelCount;

impl CostFunction for RouterChannelCount {
    fn name(&self) -> &'static str {
        "router_channel_count"
    }

    fn cost(&self, hyperx: &Hyperx) -> f64 {
        hyperx.routers as f64 + hyperx.channels as f64
    }

    fn ext_fields(&self) -> &'static [&'static str] {
        &["RouterPorts", "ChannelsPerTerminal"]
    }

    fn ext_values(&self, hyperx: &Hyperx) -> HashMap<String, String> {
        HashMap::from([
            ("RouterPorts".to_string(), hyperx.total_ports().to_string()),
            (
                "ChannelsPerTerminal".to_string(),
                ratio(hyperx.channels, hyperx.terminals),
            ),
        ])
    }
}

/// Total channels, terminal and inter-router
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelCount;

impl CostFunction for ChannelCount {
    fn name(&self) -> &'static str {
        "channel_count"
    }

    fn cost(&self, hyperx: &Hyperx) -> f64 {
        hyperx.channels as f64
    }

    fn ext_fields(&self) -> &'static [&'static str] {
        &["InterRouterChannels"]
    }

    fn ext_values(&self, hyperx: &Hyperx) -> HashMap<String, String> {
        HashMap::from([(
            "InterRouterChannels".to_string(),
            hyperx.inter_router_channels().to_string(),
        )])
    }
}

/// Number of routers
#[derive(Debug, Clone, Copy, Default)]
pub struct RouterCount;

impl CostFunction for RouterCount {
    fn name(&self) -> &'static str {
        "router_count"
    }

    fn cost(&self, hyperx: &Hyperx) -> f64 {
        hyperx.routers as f64
    }

    fn ext_fields(&self) -> &'static [&'static str] {
        &["TerminalsPerRouter"]
    }

    fn ext_values(&self, hyperx: &Hyperx) -> HashMap<String, String> {
        HashMap::from([(
            "TerminalsPerRouter".to_string(),
            ratio(hyperx.terminals, hyperx.routers),
        )])
    }
}

/// Total router ports (routers * radix)
#[derive(Debug, Clone, Copy, Default)]
pub struct PortCount;

impl CostFunction for PortCount {
    fn name(&self) -> &'static str {
        "port_count"
    }

    fn cost(&self, hyperx: &Hyperx) -> f64 {
        hyperx.routers as f64 * hyperx.router_radix as f64
    }

    fn ext_fields(&self) -> &'static [&'static str] {
        &["PortsPerTerminal"]
    }

    fn ext_values(&self, hyperx: &Hyperx) -> HashMap<String, String> {
        HashMap::from([(
            "PortsPerTerminal".to_string(),
            ratio(hyperx.total_ports(), hyperx.terminals),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_costs_of_known_topology() {
        // 4x4, weights [2,1], concentration 3: 16 routers, 48 terminals,
        // radix 3 + 3*2 + 3*1 = 12, channels 48 + 2*6*4 + 1*6*4 = 120
        let hyperx = Hyperx::new(vec![4, 4], vec![2, 1], 3);
        assert_eq!(hyperx.channels, 120);

        assert_eq!(RouterChannelCount.cost(&hyperx), 136.0);
        assert_eq!(ChannelCount.cost(&hyperx), 120.0);
        assert_eq!(RouterCount.cost(&hyperx), 16.0);
        assert_eq!(PortCount.cost(&hyperx), 192.0);
    }

    #[test]
    fn test_ext_values() {
        let hyperx = Hyperx::new(vec![4, 4], vec![2, 1], 3);

        let values = RouterChannelCount.ext_values(&hyperx);
        assert_eq!(values["RouterPorts"], "192");
        assert_eq!(values["ChannelsPerTerminal"], "2.50");

        assert_eq!(ChannelCount.ext_values(&hyperx)["InterRouterChannels"], "72");
        assert_eq!(RouterCount.ext_values(&hyperx)["TerminalsPerRouter"], "3.00");
        assert_eq!(PortCount.ext_values(&hyperx)["PortsPerTerminal"], "4.00");
    }

    #[test]
    fn test_ratio_with_zero_denominator() {
        assert_eq!(ratio(5, 0), "-");
    }
}
