use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::{info, warn};
use std::path::PathBuf;

use hyperx_search::config_loader::{self, SearchOverrides};
use hyperx_search::cost::{create_cost_function, DEFAULT_COST_FUNCTION};
use hyperx_search::report::{self, SearchReport};
use hyperx_search::search::Engine;

/// Search HyperX topologies for optimal solutions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML bounds document; flags given explicitly override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Minimum number of dimensions [default: 1]
    #[arg(long = "mindimensions")]
    min_dimensions: Option<u64>,

    /// Maximum number of dimensions [default: 4]
    #[arg(long = "maxdimensions")]
    max_dimensions: Option<u64>,

    /// Minimum router radix [default: 2]
    #[arg(long = "minradix")]
    min_radix: Option<u64>,

    /// Maximum router radix [default: 64]
    #[arg(long = "maxradix")]
    max_radix: Option<u64>,

    /// Minimum router concentration [default: 1]
    #[arg(long = "minconcentration")]
    min_concentration: Option<u64>,

    /// Maximum router concentration [default: 4294967294]
    #[arg(long = "maxconcentration")]
    max_concentration: Option<u64>,

    /// Minimum number of terminals [default: 32768]
    #[arg(long = "minterminals")]
    min_terminals: Option<u64>,

    /// Maximum number of terminals, 0 means twice the minimum [default: 0]
    #[arg(long = "maxterminals")]
    max_terminals: Option<u64>,

    /// Minimum relative bisection bandwidth [default: 0.5]
    #[arg(long = "minbandwidth")]
    min_bandwidth: Option<f64>,

    /// Maximum relative bisection bandwidth [default: inf]
    #[arg(long = "maxbandwidth")]
    max_bandwidth: Option<f64>,

    /// Maximum width of any dimension [default: 4294967294]
    #[arg(long = "maxwidth")]
    max_width: Option<u64>,

    /// Maximum weight of any dimension [default: 4294967294]
    #[arg(long = "maxweight")]
    max_weight: Option<u64>,

    /// Only search fixed width (fbfly) topologies
    #[arg(long = "fixedwidth")]
    fixed_width: bool,

    /// Only search fixed weight (fbfly) topologies
    #[arg(long = "fixedweight")]
    fixed_weight: bool,

    /// Maximum number of results [default: 10]
    #[arg(long = "maxresults")]
    max_results: Option<usize>,

    /// Stop after examining this many weight vectors
    #[arg(long)]
    budget: Option<u64>,

    /// Cost calculator to use
    #[arg(long = "costcalc", default_value = DEFAULT_COST_FUNCTION)]
    cost_calc: String,

    /// Print the input settings
    #[arg(short = 'p', long = "printsettings")]
    print_settings: bool,

    /// Also write the results as a JSON report
    #[arg(long)]
    json: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn overrides(&self) -> SearchOverrides {
        SearchOverrides {
            min_dimensions: self.min_dimensions,
            max_dimensions: self.max_dimensions,
            min_radix: self.min_radix,
            max_radix: self.max_radix,
            min_concentration: self.min_concentration,
            max_concentration: self.max_concentration,
            min_terminals: self.min_terminals,
            max_terminals: self.max_terminals,
            min_bandwidth: self.min_bandwidth,
            max_bandwidth: self.max_bandwidth,
            max_width: self.max_width,
            max_weight: self.max_weight,
            fixed_width: self.fixed_width,
            fixed_weight: self.fixed_weight,
            max_results: self.max_results,
            evaluation_budget: self.budget,
        }
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging, logs go to stderr and the table to stdout
    env_logger::Builder::from_env(Env::default().default_filter_or(&args.log_level)).init();

    let bounds = config_loader::prepare_bounds(args.config.as_deref(), &args.overrides())
        .wrap_err("Invalid search bounds")?;
    let calc = create_cost_function(&args.cost_calc)?;

    if args.print_settings {
        print!("{}", report::settings_text(&bounds, calc.name()));
    }

    let mut engine = Engine::new(bounds, calc.as_ref())?;
    let summary = engine.run();
    if summary.truncated {
        warn!("Search stopped by the evaluation budget, results cover part of the space");
    }

    print!("{}", report::results_grid(engine.results(), calc.as_ref()).render());

    if let Some(path) = &args.json {
        let search_report =
            SearchReport::new(engine.bounds(), &summary, engine.results(), calc.as_ref());
        report::generate_json_report(&search_report, path)?;
    }

    info!("Search finished with {} result(s)", engine.results().len());
    Ok(())
}
