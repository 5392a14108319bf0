//! Companion tools for HyperX topology studies.
//!
//! Describes a single topology, locates terminals within it, sweeps radices
//! for the largest buildable network and lists the available cost functions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, Context, Result};

use hyperx_search::config_loader::{self, SearchOverrides};
use hyperx_search::cost::{available_cost_functions, create_cost_function, DEFAULT_COST_FUNCTION};
use hyperx_search::report::Grid;
use hyperx_search::scale;
use hyperx_search::topology::{self, Endianness};

#[derive(Parser)]
#[command(name = "hyperx-tool")]
#[command(about = "Inspection and sizing tools for HyperX topologies")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe one topology: terminals, routers, radix, channels, bisections
    Tell {
        /// Dimension widths, e.g. 4,4,8
        widths: String,

        /// Dimension weights, e.g. 2,1,1
        weights: String,

        /// Terminals per router
        concentration: u64,

        /// Print the description as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Locate a terminal: its router port and router coordinate
    Coordinate {
        /// Dimension widths, e.g. 4,4,8
        widths: String,

        /// Terminals per router
        concentration: u64,

        /// Terminal index
        terminal: u64,

        /// Cyclic offset applied to the terminal index
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        offset: i64,

        /// Print the coordinate with the highest dimension first
        #[arg(short, long)]
        bigendian: bool,
    },

    /// Find the largest network buildable at each radix in a range
    Scale {
        /// Smallest radix to sweep
        #[arg(long, default_value = "8")]
        start: u64,

        /// Largest radix to sweep
        #[arg(long, default_value = "64")]
        end: u64,

        /// Radix step
        #[arg(long, default_value = "8")]
        step: u64,

        /// YAML bounds document supplying the remaining bounds
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Maximum number of dimensions
        #[arg(long = "maxdimensions")]
        max_dimensions: Option<u64>,

        /// Minimum relative bisection bandwidth
        #[arg(long = "minbandwidth")]
        min_bandwidth: Option<f64>,

        /// Cost calculator to use
        #[arg(long = "costcalc", default_value = DEFAULT_COST_FUNCTION)]
        cost_calc: String,

        /// Number of parallel workers (0 = auto-detect)
        #[arg(short = 'j', long, default_value = "0")]
        threads: usize,

        /// Print the points as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the available cost functions
    Costs,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    match cli.command {
        Commands::Tell {
            widths,
            weights,
            concentration,
            json,
        } => {
            let widths = topology::parse_list(&widths)?;
            let weights = topology::parse_list(&weights)?;
            let description = topology::describe(&widths, &weights, concentration)?;

            if json {
                let text = serde_json::to_string_pretty(&description)
                    .context("Failed to serialize description to JSON")?;
                println!("{}", text);
            } else {
                print!("{}", description.to_grid().render());
            }
        }
        Commands::Coordinate {
            widths,
            concentration,
            terminal,
            offset,
            bigendian,
        } => {
            let widths = topology::parse_list(&widths)?;
            let coord = topology::terminal_coordinate(&widths, concentration, terminal, offset)?;
            let endianness = if bigendian {
                Endianness::Big
            } else {
                Endianness::Little
            };
            println!("terminal {} is {}", coord.terminal, coord.render(endianness));
        }
        Commands::Scale {
            start,
            end,
            step,
            config,
            max_dimensions,
            min_bandwidth,
            cost_calc,
            threads,
            json,
        } => {
            if step == 0 || start > end {
                bail!("radix range {}..={} with step {} is empty", start, end, step);
            }

            // Set thread pool size
            if threads > 0 {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build_global()
                    .context("Failed to configure thread pool")?;
            }

            let overrides = SearchOverrides {
                max_dimensions,
                min_bandwidth,
                // probes choose their own radix and terminal range
                max_radix: Some(end.max(2)),
                ..SearchOverrides::default()
            };
            let template = config_loader::prepare_bounds(config.as_deref(), &overrides)?;
            let calc = create_cost_function(&cost_calc)?;

            let radices: Vec<u64> = (start..=end).step_by(step as usize).collect();
            let points = scale::sweep(&template, &radices, calc.as_ref())?;

            if json {
                let text = serde_json::to_string_pretty(&points)
                    .context("Failed to serialize scale points to JSON")?;
                println!("{}", text);
            } else {
                let mut grid = Grid::new();
                grid.push_row(
                    ["Radix", "Terminals", "Routers", "Channels", "Terminals/Router", "Channels/Terminal"]
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                );
                for point in &points {
                    grid.push_row(vec![
                        point.max_radix.to_string(),
                        point.terminals.to_string(),
                        point.routers.to_string(),
                        point.channels.to_string(),
                        format!("{:.2}", point.terminals_per_router),
                        format!("{:.2}", point.channels_per_terminal),
                    ]);
                }
                print!("{}", grid.render());
            }
        }
        Commands::Costs => {
            for name in available_cost_functions() {
                let marker = if name == DEFAULT_COST_FUNCTION { " (default)" } else { "" };
                println!("{}{}", name, marker);
            }
        }
    }

    Ok(())
}
