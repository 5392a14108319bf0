//! Report generation for search results.
//!
//! Generates the column-aligned text table printed by the search binary,
//! the settings dump and a JSON report for downstream tooling.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use color_eyre::eyre::{Context, Result};
use serde::Serialize;

use crate::cost::CostFunction;
use crate::search::{Hyperx, SearchBounds, SearchSummary};

/// Column headers shared by every table, before the cost function's own columns
pub const BASE_COLUMNS: [&str; 11] = [
    "#",
    "Dimensions",
    "Widths",
    "Weights",
    "Concentration",
    "Terminals",
    "Routers",
    "Radix",
    "Channels",
    "Bisections",
    "Cost",
];

/// Render integers as `[a,b,c]`
pub fn format_list(values: &[u64]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(","))
}

/// Render floats as `[a,b,c]` with a fixed number of decimals
pub fn format_float_list(values: &[f64], precision: usize) -> String {
    let items: Vec<String> = values
        .iter()
        .map(|v| format!("{:.*}", precision, v))
        .collect();
    format!("[{}]", items.join(","))
}

/// A table of strings rendered with every column padded to its widest cell
#[derive(Debug, Clone, Default)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Render the grid, columns separated by two spaces, one row per line
    pub fn render(&self) -> String {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for row in &self.rows {
            for (col, cell) in row.iter().enumerate() {
                widths[col] = widths[col].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(col, cell)| format!("{:<width$}", cell, width = widths[col]))
                .collect();
            out.push_str(cells.join("  ").trim_end());
            out.push('\n');
        }
        out
    }
}

/// Build the result table: base columns followed by the cost function's extra fields
pub fn results_grid(results: &[Hyperx], cost_function: &dyn CostFunction) -> Grid {
    let ext_fields = cost_function.ext_fields();
    let mut grid = Grid::new();

    let mut header: Vec<String> = BASE_COLUMNS.iter().map(|c| c.to_string()).collect();
    header.extend(ext_fields.iter().map(|f| f.to_string()));
    grid.push_row(header);

    for (idx, res) in results.iter().enumerate() {
        let mut row = vec![
            (idx + 1).to_string(),
            res.dimensions.to_string(),
            format_list(&res.widths),
            format_list(&res.weights),
            res.concentration.to_string(),
            res.terminals.to_string(),
            res.routers.to_string(),
            res.router_radix.to_string(),
            res.channels.to_string(),
            format_float_list(&res.bisections, 2),
            format!("{:.6}", res.cost),
        ];

        let ext_values = cost_function.ext_values(res);
        for field in ext_fields {
            row.push(ext_values.get(*field).cloned().unwrap_or_default());
        }
        grid.push_row(row);
    }

    grid
}

/// Human-readable dump of the bound set, printed before a search
pub fn settings_text(bounds: &SearchBounds, cost_function: &str) -> String {
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    let budget = bounds
        .evaluation_budget
        .map_or_else(|| "unlimited".to_string(), |b| b.to_string());

    let lines = [
        "input settings:".to_string(),
        format!("  min_dimensions = {}", bounds.min_dimensions),
        format!("  max_dimensions = {}", bounds.max_dimensions),
        format!("  min_radix = {}", bounds.min_radix),
        format!("  max_radix = {}", bounds.max_radix),
        format!("  min_concentration = {}", bounds.min_concentration),
        format!("  max_concentration = {}", bounds.max_concentration),
        format!("  min_terminals = {}", bounds.min_terminals),
        format!("  max_terminals = {}", bounds.max_terminals),
        format!("  min_bandwidth = {:.6}", bounds.min_bandwidth),
        format!("  max_bandwidth = {:.6}", bounds.max_bandwidth),
        format!("  max_width = {}", bounds.max_width),
        format!("  max_weight = {}", bounds.max_weight),
        format!("  fixed_width = {}", yes_no(bounds.fixed_width)),
        format!("  fixed_weight = {}", yes_no(bounds.fixed_weight)),
        format!("  max_results = {}", bounds.max_results),
        format!("  evaluation_budget = {}", budget),
        format!("  cost_calc = {}", cost_function),
    ];
    let mut text = lines.join("\n");
    text.push_str("\n\n");
    text
}

/// One result row of the JSON report
#[derive(Debug, Clone, Serialize)]
pub struct ResultEntry {
    pub rank: usize,
    #[serde(flatten)]
    pub hyperx: Hyperx,
    pub extra: BTreeMap<String, String>,
}

/// Full JSON report of one search
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub generated_at: DateTime<Utc>,
    pub cost_function: String,
    pub bounds: SearchBounds,
    pub summary: SearchSummary,
    pub results: Vec<ResultEntry>,
}

impl SearchReport {
    pub fn new(
        bounds: &SearchBounds,
        summary: &SearchSummary,
        results: &[Hyperx],
        cost_function: &dyn CostFunction,
    ) -> Self {
        let results = results
            .iter()
            .enumerate()
            .map(|(idx, hyperx)| ResultEntry {
                rank: idx + 1,
                hyperx: hyperx.clone(),
                extra: cost_function.ext_values(hyperx).into_iter().collect(),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            cost_function: cost_function.name().to_string(),
            bounds: bounds.clone(),
            summary: summary.clone(),
            results,
        }
    }
}

/// Generate JSON report
pub fn generate_json_report(report: &SearchReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::{ChannelCount, RouterChannelCount};

    fn scored(widths: Vec<u64>, weights: Vec<u64>, concentration: u64) -> Hyperx {
        let mut hyperx = Hyperx::new(widths, weights, concentration);
        hyperx.cost = ChannelCount.cost(&hyperx);
        hyperx
    }

    #[test]
    fn test_format_lists() {
        assert_eq!(format_list(&[2, 3, 4]), "[2,3,4]");
        assert_eq!(format_float_list(&[1.0, 1.0 / 3.0], 2), "[1.00,0.33]");
    }

    #[test]
    fn test_grid_alignment() {
        let mut grid = Grid::new();
        grid.push_row(vec!["a".into(), "bbb".into()]);
        grid.push_row(vec!["ccc".into(), "d".into()]);
        assert_eq!(grid.render(), "a    bbb\nccc  d\n");
    }

    #[test]
    fn test_results_grid_columns() {
        let results = vec![scored(vec![2], vec![1], 1), scored(vec![4, 4], vec![2, 1], 3)];
        let grid = results_grid(&results, &ChannelCount);

        assert_eq!(grid.rows().len(), 3);
        assert_eq!(grid.rows()[0].len(), BASE_COLUMNS.len() + 1);
        assert_eq!(grid.rows()[0].last().unwrap(), "InterRouterChannels");

        let row = &grid.rows()[2];
        assert_eq!(row[0], "2");
        assert_eq!(row[2], "[4,4]");
        assert_eq!(row[3], "[2,1]");
        assert_eq!(row[8], "120");
        assert_eq!(row[9], "[1.33,0.67]");
        assert_eq!(row[11], "72");
    }

    #[test]
    fn test_settings_text() {
        let mut bounds = SearchBounds::default();
        bounds.resolve_sentinels();
        let text = settings_text(&bounds, "router_channel_count");
        assert!(text.starts_with("input settings:\n"));
        assert!(text.contains("  max_terminals = 65536\n"));
        assert!(text.contains("  fixed_width = no\n"));
        assert!(text.contains("  evaluation_budget = unlimited\n"));
        assert!(text.ends_with("cost_calc = router_channel_count\n\n"));
    }

    #[test]
    fn test_json_report() {
        let results = vec![scored(vec![3], vec![1], 1)];
        let bounds = SearchBounds::default();
        let report = SearchReport::new(&bounds, &SearchSummary::default(), &results, &RouterChannelCount);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        generate_json_report(&report, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["cost_function"], "router_channel_count");
        assert_eq!(value["results"][0]["rank"], 1);
        assert_eq!(value["results"][0]["channels"], 6);
        assert_eq!(value["results"][0]["extra"]["RouterPorts"], "9");
        // infinite bandwidth has no JSON number form
        assert!(value["bounds"]["max_bandwidth"].is_null());
    }
}
