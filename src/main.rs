use nbody_trajectory::{export, scenario, SimulationConfig, Simulator, TimeStepRule};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Csv,
}

/// Integrates a random N-body scenario and prints its trajectory history.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// TOML config; command-line flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of random bodies.
    #[arg(short = 'n', long)]
    bodies: Option<usize>,

    /// Seed for the scenario generator.
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(long)]
    start: Option<f64>,

    #[arg(long)]
    end: Option<f64>,

    #[arg(short, long)]
    iterations: Option<usize>,

    /// Use `end - start / iterations` as the step size.
    #[arg(long)]
    literal_time_step: bool,

    /// Compute accelerations on the Rayon thread pool.
    #[arg(long)]
    parallel: bool,

    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    Ok(apply_overrides(config, args)?)
}

/// Lays command-line flags over `config`. Flags that were not given leave the
/// config value alone. `--parallel` and `--literal-time-step` can only switch on.
fn apply_overrides(
    mut config: SimulationConfig,
    args: &Args,
) -> nbody_trajectory::Result<SimulationConfig> {
    if let Some(n) = args.bodies {
        config.scenario.bodies = n;
    }
    if args.seed.is_some() {
        config.scenario.seed = args.seed;
    }
    if let Some(start) = args.start {
        config.start = start;
    }
    if let Some(end) = args.end {
        config.end = end;
    }
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if args.literal_time_step {
        config.time_step = TimeStepRule::Literal;
    }
    config.parallel |= args.parallel;

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let mut rng = match config.scenario.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let bodies = scenario::random_bodies(config.scenario.bodies, &mut rng)?;

    let mut sim = Simulator::with_config(bodies, &config)?;
    sim.run().context("simulation aborted")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match args.format {
        Format::Text => out.write_all(sim.describe().as_bytes())?,
        Format::Csv => export::write_csv(sim.history(), &mut out)?,
    }
    out.flush()?;

    Ok(())
}
