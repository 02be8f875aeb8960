use anyhow::Context;
use camrig::config::AppConfig;
use camrig::scenario::{ScenarioDefinition, ScenarioExecutor, ScenarioExecutorConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (RON) to run
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Run the built-in tank duel scenario (default when no scenario given)
    #[arg(long)]
    demo: bool,

    /// Write the execution report as JSON
    #[arg(long)]
    report: Option<PathBuf>,

    /// Write the built-in demo scenario as RON and exit
    #[arg(long)]
    write_demo: Option<PathBuf>,

    /// Config file base name (without `.ron`)
    #[arg(long, default_value = "camrig")]
    config: String,

    /// Don't record the per-step trace
    #[arg(long)]
    no_trace: bool,

    /// Log every passed check and action
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // Handle --write-demo flag
    if let Some(path) = &args.write_demo {
        ScenarioDefinition::tank_duel().to_file(path)?;
        log::info!("Wrote demo scenario to {}", path.display());
        return Ok(());
    }

    if args.demo && args.scenario.is_some() {
        eprintln!("Error: --demo and --scenario are mutually exclusive");
        std::process::exit(2);
    }

    let config = AppConfig::load_from(&args.config)?;

    let scenario = match &args.scenario {
        Some(path) => ScenarioDefinition::from_file(path)?,
        None => {
            log::info!("No scenario given, running the built-in demo");
            ScenarioDefinition::tank_duel()
        }
    };

    let mut executor_config = ScenarioExecutorConfig::from(&config);
    executor_config.verbose |= args.verbose;
    executor_config.record_trace &= !args.no_trace;

    let mut executor = ScenarioExecutor::with_config(executor_config);
    let report = executor
        .execute_scenario(&scenario, &config.rig)
        .with_context(|| format!("Scenario '{}' aborted", scenario.name))?;

    log::info!("{}", report.summary());

    if let Some(path) = &args.report {
        report.save_json(path, config.report.pretty)?;
        log::info!("Report written to {}", path.display());
    }

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}
