//! CLI entry point for the wish simulator

use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use wish_sim::{
    config::{RadianceRule, SimulationConfig, DEFAULT_SIMULATION_COUNT},
    error::{ConfigError, SimError},
    simulation::run_and_aggregate,
    stats::describe,
};

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "wish-sim")]
#[command(version = "1.0")]
#[command(
    about = "Estimate the odds of pulling limited 5-stars within a wish budget",
    long_about = None
)]
struct Args {
    /// Number of wishes to simulate
    wish_count: Option<u32>,

    /// Target number of limited 5-stars
    target_count: Option<u32>,

    /// Current pity on the banner
    current_pity: Option<u32>,

    /// Hard pity of the banner
    banner_pity: Option<u32>,

    /// Load parameters from a YAML or JSON file instead
    #[arg(
        long,
        conflicts_with_all = ["wish_count", "target_count", "current_pity", "banner_pity"]
    )]
    config: Option<PathBuf>,

    /// Number of simulations to run [default: 10000]
    #[arg(short = 'c', long)]
    simulation_count: Option<u32>,

    /// The next 5-star is guaranteed to be limited
    #[arg(short, long, default_value = "false")]
    guaranteed: bool,

    /// Number of 50/50s lost in a row excluding guarantees, 1-3 [default: 1]
    #[arg(short = 'r', long)]
    capturing_radiance: Option<u32>,

    /// A capturing radiance win still sets the guarantee
    #[arg(long, default_value = "false")]
    radiance_sets_guarantee: bool,

    /// Seed for reproducible estimates
    #[arg(long)]
    seed: Option<u64>,

    /// Use parallel processing
    #[arg(short, long, default_value = "false")]
    parallel: bool,

    /// Worker threads for parallel mode
    #[arg(long)]
    threads: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Show timing information
    #[arg(short, long, default_value = "false")]
    timing: bool,
}

impl Args {
    /// Build the config from flags, a file, or interactive prompts
    fn into_config(self) -> Result<SimulationConfig, SimError> {
        let config = if let Some(path) = &self.config {
            SimulationConfig::from_file(path)?
        } else {
            match (self.wish_count, self.target_count, self.current_pity, self.banner_pity) {
                (Some(wishes), Some(target), Some(pity), Some(banner)) => {
                    SimulationConfig::new(wishes, target, banner)
                        .with_pity(pity, false)
                        .with_simulation_count(DEFAULT_SIMULATION_COUNT)
                }
                _ => {
                    let stdin = io::stdin();
                    let mut stdout = io::stdout();
                    prompt_config(&mut stdin.lock(), &mut stdout)?
                }
            }
        };

        let config = self.apply_overrides(config);
        config.validate()?;
        Ok(config)
    }

    /// Flags given on the command line win over the file or the prompts
    fn apply_overrides(&self, mut config: SimulationConfig) -> SimulationConfig {
        if let Some(count) = self.simulation_count {
            config = config.with_simulation_count(count);
        }
        if self.guaranteed {
            config.initial_pity_state.is_guaranteed = true;
        }
        if let Some(cr_score) = self.capturing_radiance {
            config = config.with_cr_score(cr_score);
        }
        if self.radiance_sets_guarantee {
            config = config.with_radiance_rule(RadianceRule::SetsGuarantee);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if self.parallel || self.threads.is_some() {
            let threads = self.threads.or(config.threads);
            config = config.with_parallel(true, threads);
        }
        config
    }
}

fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<String, SimError> {
    write!(output, "{}", question)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn ask_u32<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    field: &'static str,
) -> Result<u32, SimError> {
    let answer = ask(input, output, question)?;
    answer.parse::<u32>().map_err(|e| {
        SimError::from(ConfigError::Field {
            field,
            reason: format!("'{}': {}", answer, e),
        })
    })
}

/// Interactive fallback when the positional arguments are missing
fn prompt_config<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<SimulationConfig, SimError> {
    let wishes = ask_u32(input, output, "Enter the number of wishes: ", "wish_count")?;
    let target = ask_u32(
        input,
        output,
        "Enter the target number of limited 5-stars: ",
        "target_count",
    )?;
    let pity = ask_u32(input, output, "Enter the current pity: ", "current_pity")?;
    let banner = ask_u32(input, output, "Enter the banner pity: ", "banner_pity")?;
    let guaranteed = ask(input, output, "Is it Guaranteed, Y/N: ")?.eq_ignore_ascii_case("y");
    let simulations = ask_u32(input, output, "How many simulations: ", "simulation_count")?;

    Ok(SimulationConfig::new(wishes, target, banner)
        .with_pity(pity, guaranteed)
        .with_simulation_count(simulations))
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let output = args.output.clone();
    let timing = args.timing;

    let config = match args.into_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let start = Instant::now();
    let estimate = match run_and_aggregate(&config) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    match output {
        OutputFormat::Text => {
            println!("{}", describe(estimate.probability, &config));

            if timing {
                println!();
                println!("--- Performance ---");
                println!("Total time: {:.3}s", elapsed.as_secs_f64());
                println!(
                    "Per simulation: {:.3}ms",
                    elapsed.as_secs_f64() * 1000.0 / config.simulation_count as f64
                );
                println!(
                    "Simulations/sec: {:.0}",
                    config.simulation_count as f64 / elapsed.as_secs_f64()
                );
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "config": config,
                "elapsed_seconds": elapsed.as_secs_f64(),
                "stats": estimate,
            });
            match serde_json::to_string_pretty(&output) {
                Ok(s) => println!("{}", s),
                Err(e) => {
                    eprintln!("Failed to serialize results: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
