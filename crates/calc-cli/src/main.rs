//! CLI entry point for the nncalc binary.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use calc_cli::repl::run_repl;
use calc_cli::runner::{run_script, RunReport};
use calc_cli::script::{parse_script, Script};
use calc_cli::settings::Settings;
use calc_cli::terminal::render_snapshot;
use calc_core::{BigNatural, CalcConfig, CalcModel};
use serde as _;
#[cfg(test)]
use tempfile as _;
use toml as _;
use tracing as _;
use tracing_subscriber as _;

const USAGE_TEXT: &str = "\
Usage: nncalc <command> [options]

Commands:
  run  <script> [--verbose]  Press the keys in a script and print the display
  test <script>              Run a script and check its expect lines
  repl                       Read keys from stdin interactively

Options:
  -c, --config <file>  Settings file (TOML: top, bottom, strict_guards, log_filter)
      --top <n>        Starting top register
      --bottom <n>     Starting bottom register
      --strict         Reject disallowed operations with a fault
  -v, --verbose        Print the display after every key (run only)
  -h, --help           Show this help message

Environment:
  NNCALC_LOG           Log filter, e.g. calc_core=debug (default: warn)

Examples:
  nncalc run power.calc --verbose
  nncalc test scenarios.calc --strict
  nncalc repl --top 10 --bottom 3
";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(RunArgs),
    Test(TestArgs),
    Repl(Overrides),
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Overrides {
    config: Option<PathBuf>,
    top: Option<String>,
    bottom: Option<String>,
    strict: bool,
}

#[derive(Debug, PartialEq, Eq)]
struct RunArgs {
    script: PathBuf,
    verbose: bool,
    overrides: Overrides,
}

#[derive(Debug, PartialEq, Eq)]
struct TestArgs {
    script: PathBuf,
    overrides: Overrides,
}

#[derive(Debug)]
enum ParseResult {
    Command(Command),
    Help,
}

fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let first = args.next().ok_or_else(|| "missing command".to_string())?;

    if first == "--help" || first == "-h" {
        return Ok(ParseResult::Help);
    }

    let command_str = first.to_string_lossy().to_string();

    match command_str.as_str() {
        "run" => {
            let parsed = parse_command_args(args, true)?;
            let script = parsed.script.ok_or_else(|| "missing script path".to_string())?;
            Ok(ParseResult::Command(Command::Run(RunArgs {
                script,
                verbose: parsed.verbose,
                overrides: parsed.overrides,
            })))
        }
        "test" => {
            let parsed = parse_command_args(args, false)?;
            let script = parsed.script.ok_or_else(|| "missing script path".to_string())?;
            Ok(ParseResult::Command(Command::Test(TestArgs {
                script,
                overrides: parsed.overrides,
            })))
        }
        "repl" => {
            let parsed = parse_command_args(args, false)?;
            if parsed.script.is_some() {
                return Err("repl does not take a script path".to_string());
            }
            Ok(ParseResult::Command(Command::Repl(parsed.overrides)))
        }
        other => Err(format!("unknown command: {other}")),
    }
}

#[derive(Debug, Default)]
struct ParsedArgs {
    script: Option<PathBuf>,
    verbose: bool,
    overrides: Overrides,
}

#[allow(clippy::while_let_on_iterator)]
fn parse_command_args(
    mut args: impl Iterator<Item = OsString>,
    allow_verbose: bool,
) -> Result<ParsedArgs, String> {
    let mut parsed = ParsedArgs::default();

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Err(USAGE_TEXT.to_string());
        }

        if allow_verbose && (arg == "--verbose" || arg == "-v") {
            parsed.verbose = true;
            continue;
        }

        if arg == "--strict" {
            parsed.overrides.strict = true;
            continue;
        }

        if arg == "-c" || arg == "--config" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for --config".to_string())?;
            parsed.overrides.config = Some(PathBuf::from(value));
            continue;
        }

        if arg == "--top" || arg == "--bottom" {
            let value = args
                .next()
                .ok_or_else(|| format!("missing value for {}", arg.to_string_lossy()))?
                .to_string_lossy()
                .to_string();
            if arg == "--top" {
                parsed.overrides.top = Some(value);
            } else {
                parsed.overrides.bottom = Some(value);
            }
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if parsed.script.is_some() {
            return Err("multiple script paths provided".to_string());
        }
        parsed.script = Some(PathBuf::from(arg));
    }

    Ok(parsed)
}

/// Resolves settings, installs logging and builds the starting state.
fn prepare(overrides: Overrides) -> Result<(CalcModel<BigNatural>, CalcConfig), i32> {
    let mut settings = match Settings::load(overrides.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return Err(1);
        }
    };

    if overrides.top.is_some() {
        settings.top = overrides.top;
    }
    if overrides.bottom.is_some() {
        settings.bottom = overrides.bottom;
    }
    settings.strict_guards |= overrides.strict;

    if let Err(e) = settings.init_logging() {
        eprintln!("error: {e}");
        return Err(1);
    }

    match settings.seed_model() {
        Ok(model) => Ok((model, settings.calc_config())),
        Err(e) => {
            eprintln!("error: {e}");
            Err(1)
        }
    }
}

fn load_script(path: &Path) -> Result<Script, i32> {
    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: failed to read {}: {e}", path.display());
            return Err(1);
        }
    };

    parse_script(&source).map_err(|e| {
        eprintln!("{}: {e}", path.display());
        1
    })
}

fn report_fault(report: &RunReport) -> Result<(), i32> {
    report.fault.as_ref().map_or(Ok(()), |fault| {
        eprintln!("error: {fault}");
        Err(1)
    })
}

fn run_run(args: RunArgs) -> Result<(), i32> {
    let script = load_script(&args.script)?;
    let (model, config) = prepare(args.overrides)?;
    let report = run_script(&script, model, config);

    if args.verbose {
        for entry in &report.trace {
            println!("{entry}");
        }
    }

    print!("{}", render_snapshot(&report.final_snapshot));
    report_fault(&report)
}

fn run_test(args: TestArgs) -> Result<(), i32> {
    let script = load_script(&args.script)?;

    if script.expectation_count() == 0 {
        println!("No expectations found in {}", args.script.display());
        return Ok(());
    }

    let (model, config) = prepare(args.overrides)?;
    let report = run_script(&script, model, config);

    for result in &report.expectation_results {
        if !result.passed {
            println!("{result}");
        }
    }
    if let Some(fault) = &report.fault {
        eprintln!("error: {fault}");
    }

    let summary = report.summary();
    println!();
    println!("Test Summary: {summary} ({} keys pressed)", summary.events);

    if report.all_passed() {
        Ok(())
    } else {
        Err(1)
    }
}

fn run_interactive(overrides: Overrides) -> Result<(), i32> {
    let (model, config) = prepare(overrides)?;
    let stdin = io::stdin();

    match run_repl(stdin.lock(), io::stdout(), model, config) {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("error: {e}");
            Err(1)
        }
    }
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Command(Command::Run(args))) => match run_run(args) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Ok(ParseResult::Command(Command::Test(args))) => match run_test(args) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Ok(ParseResult::Command(Command::Repl(overrides))) => match run_interactive(overrides) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Err(error) => {
            if error.starts_with("Usage:") {
                println!("{error}");
            } else {
                eprintln!("error: {error}");
                eprintln!("{USAGE_TEXT}");
            }
            1
        }
    };

    std::process::exit(exit_code);
}
