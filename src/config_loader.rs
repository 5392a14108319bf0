use crate::search::SearchBounds;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse a bounds document from a YAML file
///
/// Fields missing from the document keep their defaults. The result is not
/// yet resolved or validated, see `prepare_bounds`.
pub fn load_bounds(path: &Path) -> Result<SearchBounds> {
    info!("Loading search bounds from: {:?}", path);

    let file = File::open(path)
        .wrap_err_with(|| format!("Failed to open bounds file '{}'", path.display()))?;

    let bounds: SearchBounds = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse bounds file '{}'", path.display()))?;

    Ok(bounds)
}

/// Bound values given explicitly on the command line, overriding a bounds document
#[derive(Debug, Clone, Default)]
pub struct SearchOverrides {
    pub min_dimensions: Option<u64>,
    pub max_dimensions: Option<u64>,
    pub min_radix: Option<u64>,
    pub max_radix: Option<u64>,
    pub min_concentration: Option<u64>,
    pub max_concentration: Option<u64>,
    pub min_terminals: Option<u64>,
    pub max_terminals: Option<u64>,
    pub min_bandwidth: Option<f64>,
    pub max_bandwidth: Option<f64>,
    pub max_width: Option<u64>,
    pub max_weight: Option<u64>,
    pub fixed_width: bool,
    pub fixed_weight: bool,
    pub max_results: Option<usize>,
    pub evaluation_budget: Option<u64>,
}

/// Apply CLI overrides to a bounds document
pub fn apply_overrides(bounds: &mut SearchBounds, overrides: &SearchOverrides) {
    fn set<T: Copy>(target: &mut T, value: Option<T>) {
        if let Some(value) = value {
            *target = value;
        }
    }

    set(&mut bounds.min_dimensions, overrides.min_dimensions);
    set(&mut bounds.max_dimensions, overrides.max_dimensions);
    set(&mut bounds.min_radix, overrides.min_radix);
    set(&mut bounds.max_radix, overrides.max_radix);
    set(&mut bounds.min_concentration, overrides.min_concentration);
    set(&mut bounds.max_concentration, overrides.max_concentration);
    set(&mut bounds.min_terminals, overrides.min_terminals);
    set(&mut bounds.max_terminals, overrides.max_terminals);
    set(&mut bounds.min_bandwidth, overrides.min_bandwidth);
    set(&mut bounds.max_bandwidth, overrides.max_bandwidth);
    set(&mut bounds.max_width, overrides.max_width);
    set(&mut bounds.max_weight, overrides.max_weight);
    set(&mut bounds.max_results, overrides.max_results);

    // switches can only turn a mode on
    bounds.fixed_width |= overrides.fixed_width;
    bounds.fixed_weight |= overrides.fixed_weight;

    if overrides.evaluation_budget.is_some() {
        bounds.evaluation_budget = overrides.evaluation_budget;
    }
}

/// Build the final bound set: optional document, then overrides, then
/// sentinel resolution and validation
pub fn prepare_bounds(path: Option<&Path>, overrides: &SearchOverrides) -> Result<SearchBounds> {
    let mut bounds = match path {
        Some(path) => load_bounds(path)?,
        None => SearchBounds::default(),
    };

    apply_overrides(&mut bounds, overrides);
    bounds.resolve_sentinels();
    bounds.validate()?;

    Ok(bounds)
}
