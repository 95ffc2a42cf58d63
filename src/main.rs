mod debug_report;

use cardgen::{Error, Options, generate_all, write_units};
use std::io::{self, IsTerminal};
use std::path::PathBuf;

const DEFAULT_OUT: &str = "sets";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

struct CliConfig {
    inputs: Vec<PathBuf>,
    out_dir: PathBuf,
    options: Options,
    check: bool,
    report: bool,
    color: bool,
}

/// Read every dataset, compile all of them, and only then write units.
fn run(config: &CliConfig) -> Result<(), Error> {
    let mut documents = Vec::with_capacity(config.inputs.len());
    for path in &config.inputs {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io { path: path.clone(), source })?;
        documents.push(json);
    }

    let generation = generate_all(documents.iter().map(String::as_str), &config.options)?;
    if config.report {
        debug_report::print_generation(&generation, config.color);
    }
    if config.check {
        return Ok(());
    }

    for path in write_units(&config.out_dir, &generation.units)? {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn parse_args() -> Result<CliConfig, String> {
    let mut inputs = Vec::new();
    let mut out_dir = PathBuf::from(DEFAULT_OUT);
    let mut options = Options::default();
    let mut check = false;
    let mut report = true;
    let mut color = io::stderr().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("cardgen {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--check" => check = true,
            "--report" => report = true,
            "--no-report" => report = false,
            "--out" | "-o" => {
                let value = args.next().ok_or_else(|| "error: --out expects a value".to_string())?;
                out_dir = PathBuf::from(value);
            }
            "--inline-limit" => {
                let value = args.next().ok_or_else(|| "error: --inline-limit expects a value".to_string())?;
                options.inline_limit = parse_number("--inline-limit", &value)?;
            }
            "--default-resistance" => {
                let value = args.next().ok_or_else(|| "error: --default-resistance expects a value".to_string())?;
                options.default_resistance = parse_number("--default-resistance", &value)?;
            }
            "--" => {
                inputs.extend(args.by_ref().map(PathBuf::from));
                break;
            }
            _ if arg.starts_with("--out=") => {
                out_dir = PathBuf::from(arg.trim_start_matches("--out="));
            }
            _ if arg.starts_with("--inline-limit=") => {
                options.inline_limit = parse_number("--inline-limit", arg.trim_start_matches("--inline-limit="))?;
            }
            _ if arg.starts_with("--default-resistance=") => {
                let value = arg.trim_start_matches("--default-resistance=");
                options.default_resistance = parse_number("--default-resistance", value)?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => inputs.push(PathBuf::from(arg)),
        }
    }

    if inputs.is_empty() {
        return Err(format!("error: no dataset provided\n\n{}", help_text()));
    }

    Ok(CliConfig { inputs, out_dir, options, check, report, color })
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value.parse().map_err(|_| format!("error: invalid {flag} '{value}' (expected a non-negative integer)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    let defaults = Options::default();
    format!(
        "cardgen {version}

Compiles pokemontcg.io set datasets into card implementations.

Usage:
  cardgen [OPTIONS] [--] <dataset.json>...

Options:
  -o, --out <dir>               Output directory. One <set>/pokemon.rs is written
                                per set. Default: {default_out}
  --check                       Compile and report without writing anything.
  --report                      Print the coverage report to stderr (default).
  --no-report                   Do not print the coverage report.
  --inline-limit <n>            Nested effects with at most <n> operations print
                                on one line. Default: {inline_limit}
  --default-resistance <n>      Resistance amount used when the dataset value has
                                no number. Default: {default_resistance}
  --color                       Force ANSI color output.
  --no-color                    Disable ANSI color output.
  -h, --help                    Show this help message.
  -V, --version                 Print version information.

Exit codes:
  0  Success.
  1  Malformed dataset (nothing is written) or I/O failure.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        default_out = DEFAULT_OUT,
        inline_limit = defaults.inline_limit,
        default_resistance = defaults.default_resistance,
    )
}
