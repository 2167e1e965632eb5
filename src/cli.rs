use std::env;
use std::path::PathBuf;

/// Default API port when `--serve` is given without `--port`.
pub const DEFAULT_PORT: u16 = 3000;

/// Preset used when neither `--config` nor `--preset` is given.
pub const DEFAULT_PRESET: &str = "seasons";

#[derive(Debug)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub preset: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub save_units: bool,
    pub compare: bool,
    pub serve: bool,
    pub port: u16,
    pub help: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

pub fn parse_args_from(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut config = None;
    let mut preset = None;
    let mut data_dir = None;
    let mut out = None;
    let mut save_units = false;
    let mut compare = false;
    let mut serve = false;
    let mut port = None;
    let mut help = false;

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --config (expected a TOML file path)")?;
                if config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--data-dir" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --data-dir (expected a directory)")?;
                if data_dir.replace(PathBuf::from(path)).is_some() {
                    return Err("--data-dir provided more than once".to_string());
                }
            }
            "--out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --out (expected a directory)")?;
                if out.replace(PathBuf::from(path)).is_some() {
                    return Err("--out provided more than once".to_string());
                }
            }
            "--save-units" => save_units = true,
            "--compare" => compare = true,
            "--serve" => serve = true,
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                let value = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
                if port.replace(value).is_some() {
                    return Err("--port provided more than once".to_string());
                }
            }
            "--help" | "-h" => help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if config.is_some() && preset.is_some() {
        return Err(
            "arguments `--config` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }
    if port.is_some() && !serve {
        return Err("--port requires --serve".to_string());
    }

    if config.is_none() && preset.is_none() {
        preset = Some(DEFAULT_PRESET.to_string());
    }

    Ok(CliOptions {
        config,
        preset,
        data_dir,
        out,
        save_units,
        compare,
        serve,
        port: port.unwrap_or(DEFAULT_PORT),
        help,
    })
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("heat-optimizer: merit-order heat dispatch over demand time series");
    eprintln!();
    eprintln!("Usage:");
    eprintln!(
        "  heat-optimizer [--config <path> | --preset <name>] [--data-dir <dir>] [--out <dir>]"
    );
    eprintln!("                 [--save-units] [--compare] [--serve [--port <u16>]]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>    Load scenarios from a TOML file");
    eprintln!("  --preset <name>    Built-in scenario set (seasons, fleets, least_co2)");
    eprintln!("  --data-dir <dir>   Override the directory holding demand and catalog files");
    eprintln!("  --out <dir>        Write <scenario>_simulated.csv per scenario");
    eprintln!("  --save-units       Save each scenario's units to the output directory");
    eprintln!("  --compare          Compare the fleets of the first two scenarios");
    eprintln!("  --serve            Start the JSON API after the run (feature `api`)");
    eprintln!("  --port <u16>       API port (default: {DEFAULT_PORT})");
    eprintln!("  --help             Show this help message");
    eprintln!();
    eprintln!("Without --config or --preset the `{DEFAULT_PRESET}` preset is used.");
}
