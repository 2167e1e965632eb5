//! Heat optimizer entry point: CLI wiring and config-driven scenario runs.

use std::process;

use heat_optimizer::assets::summary::compare;
use heat_optimizer::cli::{self, CliOptions};
use heat_optimizer::config::RunConfig;
use heat_optimizer::io::fields::format_timestamp;
use heat_optimizer::io::{ResultStore, save_simulated};
use heat_optimizer::logging;
use heat_optimizer::runner::{ScenarioRun, run_all};

/// Loads the run configuration: `--config` takes priority, then `--preset`.
fn load_config(cli: &CliOptions) -> RunConfig {
    let preset = cli.preset.as_deref().unwrap_or(cli::DEFAULT_PRESET);
    match RunConfig::load(cli.config.as_deref(), preset) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}

fn print_run(run: &ScenarioRun) {
    println!("=== Scenario {} ===", run.name);
    println!("{}", run.summary);
    println!();
    for r in &run.run.results {
        println!("{r}");
    }
    for s in &run.run.shortfalls {
        println!(
            "{} | SHORTFALL demand={:.2} MW  unmet={:.2} MW",
            format_timestamp(&s.time),
            s.demand,
            s.unmet
        );
    }
    println!("\n{}\n", run.kpi);
}

fn write_outputs(cli: &CliOptions, config: &RunConfig, runs: &[ScenarioRun]) {
    if let Some(ref out) = cli.out {
        for run in runs {
            let path = out.join(format!("{}_simulated.csv", run.name));
            if let Err(e) = save_simulated(&path, &run.run.results) {
                eprintln!("error: {e}");
                process::exit(1);
            }
            eprintln!("Results written to {}", path.display());
        }
    }

    if cli.save_units {
        let store = ResultStore::new(config.data.output_dir.clone());
        for run in runs {
            match store.save_results(&run.name, &run.units) {
                Ok(path) => eprintln!("Units saved to {}", path.display()),
                Err(e) => {
                    eprintln!("error: {e}");
                    process::exit(1);
                }
            }
        }
        match store.scenarios() {
            Ok(saved) => eprintln!("Saved scenarios: {}", saved.join(", ")),
            Err(e) => eprintln!("error: {e}"),
        }
    }
}

fn main() {
    let cli = match cli::parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(2);
        }
    };
    if cli.help {
        cli::print_usage();
        process::exit(0);
    }

    logging::init();

    let mut config = load_config(&cli);
    if let Some(ref dir) = cli.data_dir {
        config.data.dir = dir.clone();
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let runs = match run_all(&config.data, &config.scenarios) {
        Ok(runs) => runs,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    for run in &runs {
        print_run(run);
    }

    write_outputs(&cli, &config, &runs);

    if cli.compare {
        match runs.as_slice() {
            [first, second, ..] => {
                println!("{}", compare(&first.name, &first.summary, &second.name, &second.summary));
            }
            _ => {
                eprintln!("error: --compare needs at least two scenarios");
                process::exit(1);
            }
        }
    }

    if cli.serve {
        serve(cli.port, runs);
    }
}

#[cfg(feature = "api")]
fn serve(port: u16, runs: Vec<ScenarioRun>) {
    use std::net::SocketAddr;
    use std::sync::Arc;

    let state = Arc::new(heat_optimizer::api::AppState::new(runs));
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: failed to create tokio runtime: {e}");
        process::exit(1);
    });
    if let Err(e) = rt.block_on(heat_optimizer::api::serve(state, addr)) {
        eprintln!("error: API server on {addr} failed: {e}");
        process::exit(1);
    }
}

#[cfg(not(feature = "api"))]
fn serve(_port: u16, _runs: Vec<ScenarioRun>) {
    eprintln!("error: --serve requires building with `--features api`");
    process::exit(1);
}
