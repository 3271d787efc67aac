//! Astable - 555 astable component search
//!
//! Enumerates standard resistor, potentiometer and capacitor values and
//! prints the combination that meets the target frequency across the whole
//! tolerance envelope with the best duty ratio.
//!
//! # Usage
//!
//! ```bash
//! astable --target 38k
//! astable --target 20k --objective frequency-spread --top 5 --format json
//! ```

use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use astable_search::{
    format::parse_si,
    search::{rank, search, Objective},
    Catalog, DesignConfig, EngNumber, Result, SearchError, SearchOutcome, Solution, VoltageSpread,
};

/// 555 astable oscillator component search
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Target oscillation frequency in Hz
    #[arg(short, long, default_value = "38k", value_parser = parse_si)]
    target: f64,

    /// Supply voltage
    #[arg(long, default_value = "5", value_parser = parse_si)]
    supply: f64,

    /// Nominal threshold voltage
    #[arg(long, default_value = "3.3", value_parser = parse_si)]
    vth: f64,

    /// Minimum threshold voltage
    #[arg(long, default_value = "2.4", value_parser = parse_si)]
    vth_min: f64,

    /// Maximum threshold voltage
    #[arg(long, default_value = "4.2", value_parser = parse_si)]
    vth_max: f64,

    /// Nominal trigger voltage
    #[arg(long, default_value = "1.67", value_parser = parse_si)]
    vtr: f64,

    /// Minimum trigger voltage
    #[arg(long, default_value = "1.1", value_parser = parse_si)]
    vtr_min: f64,

    /// Maximum trigger voltage
    #[arg(long, default_value = "2.2", value_parser = parse_si)]
    vtr_max: f64,

    /// Resistor tolerance as a fraction
    #[arg(long, default_value = "0.01", value_parser = parse_si)]
    r_tol: f64,

    /// Capacitor tolerance as a fraction
    #[arg(long, default_value = "0.1", value_parser = parse_si)]
    c_tol: f64,

    /// Maximum width of the design frequency window in Hz
    #[arg(long, default_value = "50k", value_parser = parse_si)]
    max_spread: f64,

    /// Minimum charge/discharge interval in seconds
    #[arg(long, default_value = "600n", value_parser = parse_si)]
    min_interval: f64,

    /// Maximum discharge-pin current in amperes
    #[arg(long, default_value = "10m", value_parser = parse_si)]
    max_current: f64,

    /// Wanted charge/discharge time ratio
    #[arg(long, default_value = "1.7", value_parser = parse_si)]
    duty_ratio: f64,

    /// Allowed deviation from the duty ratio
    #[arg(long, default_value = "0.06", value_parser = parse_si)]
    duty_band: f64,

    /// Metric to minimise
    #[arg(long, value_enum, default_value = "duty-deviation")]
    objective: ObjectiveArg,

    /// Number of best solutions to print
    #[arg(long, default_value_t = 1)]
    top: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Debug, ValueEnum)]
enum ObjectiveArg {
    /// Closest estimated duty ratio
    DutyDeviation,
    /// Narrowest design frequency window
    FrequencySpread,
    /// Lowest nominal discharge current
    DischargeCurrent,
    /// Design window centred closest to the target
    CenterOffset,
}

#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

impl Args {
    fn config(&self) -> DesignConfig {
        DesignConfig {
            supply_voltage: self.supply,
            threshold: VoltageSpread::new(self.vth, self.vth_min, self.vth_max),
            trigger: VoltageSpread::new(self.vtr, self.vtr_min, self.vtr_max),
            resistor_tolerance: self.r_tol,
            capacitor_tolerance: self.c_tol,
            target_frequency: self.target,
            max_frequency_spread: self.max_spread,
            min_interval: self.min_interval,
            max_discharge_current: self.max_current,
            duty_ratio: self.duty_ratio,
            duty_ratio_band: self.duty_band,
        }
    }

    fn objective(&self) -> Objective {
        match self.objective {
            ObjectiveArg::DutyDeviation => Objective::DutyDeviation,
            ObjectiveArg::FrequencySpread => Objective::FrequencySpread,
            ObjectiveArg::DischargeCurrent => Objective::DischargeCurrent,
            ObjectiveArg::CenterOffset => Objective::CenterOffset {
                target_frequency: self.target,
            },
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = args.config();
    let objective = args.objective();

    let outcome = search(&config, &Catalog::standard())?;
    if outcome.solutions.is_empty() {
        return Err(SearchError::NoSolution {
            evaluated: outcome.evaluated,
        });
    }
    let ranked = rank(&outcome.solutions, objective, args.top.max(1));

    match args.format {
        OutputFormat::Human => output_human(&outcome, &ranked),
        OutputFormat::Json => output_json(&config, &outcome, &ranked)?,
    }
    Ok(())
}

fn output_human(outcome: &SearchOutcome, ranked: &[Solution]) {
    println!(
        "Evaluated {} candidates, {} feasible",
        outcome.evaluated,
        outcome.solutions.len()
    );

    for solution in ranked {
        println!();
        println!(
            "  spread = {}Hz  fmax = {}Hz  fmin = {}Hz  Idis = {}A  Idis(low) = {}A  deviation = {}  VR2 set = {}",
            EngNumber(solution.frequency_spread),
            EngNumber(solution.frequency_max),
            EngNumber(solution.frequency_min),
            EngNumber(solution.discharge_design),
            EngNumber(solution.discharge_low),
            solution.duty_deviation,
            EngNumber(solution.pot_setting),
        );
        println!("{}", solution.candidate);
    }
}

fn output_json(config: &DesignConfig, outcome: &SearchOutcome, ranked: &[Solution]) -> Result<()> {
    let output = serde_json::json!({
        "config": config,
        "solutions": ranked,
        "summary": {
            "evaluated": outcome.evaluated,
            "feasible": outcome.solutions.len(),
            "rejections": outcome.rejections,
        }
    });
    let text = serde_json::to_string_pretty(&output).map_err(|e| SearchError::Serialization {
        message: e.to_string(),
    })?;
    println!("{}", text);
    Ok(())
}
