use jovisim::{Scenario, ScenarioConfig, ViewConfig};
#[cfg(feature = "viewer")]
use jovisim::{run_2d, run_3d};

use clap::Parser;
use anyhow::{Context, Result};

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Pairwise-gravity simulator for a planet and its satellites")]
struct Args {
    /// Scenario file; looked up under scenarios/ when not an existing path.
    /// Without one, the built-in Jovian system is used.
    #[arg(short)]
    file_name: Option<String>,

    /// Run without a window for `--steps` steps and print the final state
    #[arg(long)]
    headless: bool,

    /// Number of steps in headless mode
    #[arg(long, default_value_t = 1000)]
    steps: u64,

    /// Override the scenario's view: "plane" or "scene"
    #[arg(long)]
    view: Option<ViewConfig>,
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    let Some(file_name) = &args.file_name else {
        log::info!("no scenario file given, using the built-in Jovian system");
        return Ok(ScenarioConfig::jovian());
    };

    let direct = PathBuf::from(file_name);
    let config_path = if direct.exists() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    log::info!("loading scenario from {}", config_path.display());
    let cfg = ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;
    Ok(cfg)
}

fn run_headless(mut scenario: Scenario, steps: u64) -> Result<()> {
    for _ in 0..steps {
        scenario.advance().with_context(|| format!("step {} failed", scenario.simulator.steps() + 1))?;

        if scenario.report_due() {
            if let Some(line) = scenario.status_line(0) {
                log::info!("{}", line);
            }
        }
    }

    println!("after {} steps (t = {} s):", scenario.simulator.steps(), scenario.simulator.time());
    for i in 0..scenario.simulator.len() {
        if let Some(line) = scenario.status_line(i) {
            println!("{}", line);
        }
    }
    let p = scenario.simulator.total_momentum();
    println!("total momentum = ({:.6e}, {:.6e}) kg m/s", p.x, p.y);

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut scenario_cfg = load_scenario(&args)?;
    if let Some(view) = args.view {
        scenario_cfg.engine.view = view;
    }

    let scenario = Scenario::build_scenario(scenario_cfg)?;

    if args.headless || cfg!(not(feature = "viewer")) {
        return run_headless(scenario, args.steps);
    }

    #[cfg(feature = "viewer")]
    {
        match scenario.engine.view {
            ViewConfig::Plane => run_2d(scenario),
            ViewConfig::Scene => run_3d(scenario),
        }
    }

    Ok(())
}
