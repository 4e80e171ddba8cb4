//! Command implementations for the GreenOrbit CLI.
//!
//! Simulation commands run the impact model through a `SimulationSession`,
//! so slider values given on the command line are clamped and snapped the
//! same way the panel does. Report commands read the embedded dashboard
//! datasets through an in-memory `greenorbit_db::Database`.

use clap::Subcommand;
use greenorbit_model::issue::IssueStatus;
use greenorbit_model::simulation::Parameter;
use greenorbit_model::Layer;
use std::io::Write;

pub mod report;
pub mod simulate;

#[derive(Subcommand)]
pub enum Command {
    /// Predict the environmental impact of a set of slider positions
    Simulate {
        /// Trees to plant (0-2000, step 50)
        #[arg(long, allow_negative_numbers = true)]
        trees: Option<i32>,

        /// Solar panels to install (0-1000, step 25)
        #[arg(long, allow_negative_numbers = true)]
        solar: Option<i32>,

        /// Electric vehicle adoption in percent (0-100, step 5)
        #[arg(long, allow_negative_numbers = true)]
        ev: Option<i32>,

        /// Green buildings to retrofit (0-50)
        #[arg(long, allow_negative_numbers = true)]
        buildings: Option<i32>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the default slider positions and their predicted impact
    Defaults {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Tabulate the impact over every position of one slider
    Sweep {
        /// Slider to vary: trees, solar, ev or buildings
        #[arg(short, long)]
        parameter: Parameter,

        /// Output CSV path (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List map points with their reading and band on a layer
    Map {
        #[arg(short, long, default_value = "temperature")]
        layer: Layer,
    },

    /// Layer overview, daily summary, recent alerts and area counts
    Metrics {
        #[arg(short, long, default_value = "temperature")]
        layer: Layer,
    },

    /// 24 hour trend for a layer
    Trend {
        #[arg(short, long, default_value = "temperature")]
        layer: Layer,
    },

    /// Weekly overview, district comparison and city-wide distribution
    Overview,

    /// List reported issues
    Issues {
        /// Only show issues with this status
        #[arg(short, long)]
        status: Option<IssueStatus>,
    },

    /// Show one issue with its progress and investigation timeline
    Issue {
        id: String,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_to(command, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Run `command`, writing its report to `out`.
pub fn run_to<W: Write>(command: Command, out: &mut W) -> anyhow::Result<()> {
    match command {
        Command::Simulate {
            trees,
            solar,
            ev,
            buildings,
            json,
        } => {
            let overrides = [
                (Parameter::Trees, trees),
                (Parameter::Solar, solar),
                (Parameter::Ev, ev),
                (Parameter::Buildings, buildings),
            ];
            simulate::run_simulate(&overrides, json, out)
        }
        Command::Defaults { json } => simulate::run_simulate(&[], json, out),
        Command::Sweep { parameter, output } => match output {
            Some(path) => {
                let file = std::fs::File::create(&path)?;
                simulate::run_sweep(parameter, file)?;
                log::info!("Sweep of {} written to {}", parameter, path);
                Ok(())
            }
            None => simulate::run_sweep(parameter, out),
        },
        Command::Map { layer } => report::run_map(&open_db()?, layer, out),
        Command::Metrics { layer } => report::run_metrics(&open_db()?, layer, out),
        Command::Trend { layer } => report::run_trend(&open_db()?, layer, out),
        Command::Overview => report::run_overview(&open_db()?, out),
        Command::Issues { status } => report::run_issues(&open_db()?, status, out),
        Command::Issue { id } => report::run_issue(&open_db()?, &id, out),
    }
}

fn open_db() -> anyhow::Result<greenorbit_db::Database> {
    let db = greenorbit_db::Database::with_fixtures()?;
    log::info!("Loaded embedded dashboard datasets");
    Ok(db)
}
