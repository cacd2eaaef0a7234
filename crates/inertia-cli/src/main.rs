// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use inertia_analyze::{RenderOptions, analyze_signal, render_text};
use inertia_cli::{
    DEFAULT_BASELINE_N, DEFAULT_BASELINE_SEED, baseline_rows, format_baseline_table, init_logging,
};
use inertia_core::{AnalysisConfig, Diagnostics, FitMode, InertiaError, InertiaResult};
use inertia_io::{LoadedSignal, load_signal};
use serde::Serialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Debug)]
struct Cli {
    verbose: u8,
    command: Command,
}

#[derive(Debug)]
enum Command {
    Analyze(AnalyzeArgs),
    Render(RenderArgs),
    Baseline(BaselineArgs),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Analyze(_) => "analyze",
            Self::Render(_) => "render",
            Self::Baseline(_) => "baseline",
        }
    }
}

/// Flags whose next token is always consumed as their value.
const VALUE_FLAGS: &[&str] = &[
    "--input",
    "--output",
    "--bins",
    "--fit-mode",
    "--max-degree",
    "--effort",
    "--width",
    "--height",
    "--seed",
    "--n",
];

#[derive(Debug, Default)]
struct AnalyzeArgs {
    input: PathBuf,
    config: AnalysisConfig,
    plot: bool,
    output: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct RenderArgs {
    input: PathBuf,
    config: AnalysisConfig,
    options: RenderOptions,
}

#[derive(Debug)]
struct BaselineArgs {
    seed: u64,
    n: usize,
    config: AnalysisConfig,
    json: bool,
    output: Option<PathBuf>,
}

impl Default for BaselineArgs {
    fn default() -> Self {
        Self {
            seed: DEFAULT_BASELINE_SEED,
            n: DEFAULT_BASELINE_N,
            config: AnalysisConfig::default(),
            json: false,
            output: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Inertia(#[from] InertiaError),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0}")]
    InvalidInput(String),
}

impl CliError {
    fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Inertia(err) => err.code(),
            Self::Io { .. } => "io_error",
            Self::Json { .. } => "json_error",
            Self::InvalidInput(_) => "invalid_input",
        }
    }
}

#[derive(Serialize)]
struct InputSummary {
    path: String,
    format: String,
    rows: usize,
    cols: usize,
    n: usize,
}

impl InputSummary {
    fn from_loaded(loaded: &LoadedSignal) -> Self {
        Self {
            path: loaded.path.display().to_string(),
            format: loaded.format.to_string(),
            rows: loaded.shape.0,
            cols: loaded.shape.1,
            n: loaded.len(),
        }
    }
}

#[derive(Serialize)]
struct MetricsOutput {
    #[serde(rename = "I_bar")]
    i_bar: f64,
    #[serde(rename = "I_comp")]
    i_comp: f64,
    entropy: f64,
}

#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    command: &'static str,
    input: InputSummary,
    metrics: MetricsOutput,
    config: &'a AnalysisConfig,
    diagnostics: &'a Diagnostics,
}

#[derive(Serialize)]
struct BaselineOutput {
    command: &'static str,
    seed: u64,
    n: usize,
    config: AnalysisConfig,
    rows: Vec<inertia_cli::BaselineRow>,
}

#[derive(Serialize)]
struct ErrorEnvelope {
    error: ErrorPayload,
}

#[derive(Serialize)]
struct ErrorPayload {
    code: String,
    message: String,
}

fn main() {
    if let Err(err) = run() {
        emit_structured_error(&err);
        process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let Some(cli) = parse_cli(env::args().skip(1).collect())? else {
        return Ok(());
    };
    init_logging(cli.verbose);

    let command = cli.command.name();
    tracing::debug!(command, verbose = cli.verbose, "command started");
    let outcome = match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Render(args) => handle_render(args),
        Command::Baseline(args) => handle_baseline(args),
    };
    match &outcome {
        Ok(()) => tracing::info!(command, "command finished"),
        Err(err) => tracing::warn!(command, code = err.code(), "command failed"),
    }
    outcome
}

fn parse_cli(args: Vec<String>) -> Result<Option<Cli>, CliError> {
    let mut verbose = 0u8;
    let mut kept: Vec<String> = Vec::with_capacity(args.len());
    for arg in args {
        let value_position = kept
            .last()
            .is_some_and(|prev| VALUE_FLAGS.contains(&prev.as_str()));
        let count = if value_position {
            0
        } else {
            verbosity_count(&arg)
        };
        if count == 0 {
            kept.push(arg);
        } else {
            verbose = verbose.saturating_add(count);
        }
    }
    let args = kept;

    if args.is_empty() {
        print_root_help();
        return Ok(None);
    }

    if matches!(args[0].as_str(), "-h" | "--help") {
        print_root_help();
        return Ok(None);
    }
    if matches!(args[0].as_str(), "-V" | "--version") {
        print_version();
        return Ok(None);
    }

    let command_name = args[0].clone();
    let rest = &args[1..];

    if rest
        .iter()
        .any(|arg| matches!(arg.as_str(), "-h" | "--help"))
    {
        print_command_help(command_name.as_str())?;
        return Ok(None);
    }

    let command = match command_name.as_str() {
        "analyze" => Command::Analyze(parse_analyze_args(rest)?),
        "render" => Command::Render(parse_render_args(rest)?),
        "baseline" => Command::Baseline(parse_baseline_args(rest)?),
        _ => {
            return Err(CliError::invalid_input(format!(
                "unknown command '{command_name}'; expected one of: analyze, render, baseline"
            )));
        }
    };

    Ok(Some(Cli { verbose, command }))
}

fn verbosity_count(arg: &str) -> u8 {
    if arg == "--verbose" {
        return 1;
    }
    match arg.strip_prefix('-') {
        Some(flags) if !flags.is_empty() && flags.chars().all(|c| c == 'v') => {
            u8::try_from(flags.len()).unwrap_or(u8::MAX)
        }
        _ => 0,
    }
}

/// Applies an analysis-config flag; returns `false` when `flag` is not one.
fn apply_config_flag(
    config: &mut AnalysisConfig,
    flag: &str,
    inline_value: Option<String>,
    tokens: &[String],
    idx: &mut usize,
) -> Result<bool, CliError> {
    match flag {
        "--bins" => {
            let raw = take_flag_value(flag, inline_value, tokens, idx)?;
            config.bins = parse_usize_arg(raw.as_str(), flag)?;
        }
        "--fit-mode" => {
            let raw = take_flag_value(flag, inline_value, tokens, idx)?;
            config.fit_mode = raw.parse::<FitMode>()?;
        }
        "--max-degree" => {
            let raw = take_flag_value(flag, inline_value, tokens, idx)?;
            config.max_degree = parse_usize_arg(raw.as_str(), flag)?;
        }
        "--effort" => {
            let raw = take_flag_value(flag, inline_value, tokens, idx)?;
            config.compression_effort = parse_i32_arg(raw.as_str(), flag)?;
        }
        _ => return Ok(false),
    }
    Ok(true)
}

fn parse_analyze_args(tokens: &[String]) -> Result<AnalyzeArgs, CliError> {
    let mut args = AnalyzeArgs::default();
    let mut idx = 0usize;
    while idx < tokens.len() {
        let (flag, inline_value) = split_flag(tokens[idx].as_str())?;
        match flag {
            "--input" => {
                let raw = take_flag_value(flag, inline_value, tokens, &mut idx)?;
                args.input = PathBuf::from(raw);
            }
            "--output" => {
                let raw = take_flag_value(flag, inline_value, tokens, &mut idx)?;
                args.output = Some(PathBuf::from(raw));
            }
            "--plot" => {
                ensure_no_inline_value(flag, inline_value)?;
                args.plot = true;
            }
            other => {
                if !apply_config_flag(&mut args.config, other, inline_value, tokens, &mut idx)? {
                    return Err(CliError::invalid_input(format!(
                        "unknown analyze option '{other}'"
                    )));
                }
            }
        }
        idx += 1;
    }

    if args.input.as_os_str().is_empty() {
        return Err(CliError::invalid_input("analyze requires --input <path>"));
    }
    Ok(args)
}

fn parse_render_args(tokens: &[String]) -> Result<RenderArgs, CliError> {
    let mut args = RenderArgs::default();
    let mut idx = 0usize;
    while idx < tokens.len() {
        let (flag, inline_value) = split_flag(tokens[idx].as_str())?;
        match flag {
            "--input" => {
                let raw = take_flag_value(flag, inline_value, tokens, &mut idx)?;
                args.input = PathBuf::from(raw);
            }
            "--width" => {
                let raw = take_flag_value(flag, inline_value, tokens, &mut idx)?;
                args.options.width = parse_usize_arg(raw.as_str(), flag)?;
            }
            "--height" => {
                let raw = take_flag_value(flag, inline_value, tokens, &mut idx)?;
                args.options.height = parse_usize_arg(raw.as_str(), flag)?;
            }
            "--no-legend" => {
                ensure_no_inline_value(flag, inline_value)?;
                args.options.show_legend = false;
            }
            other => {
                if !apply_config_flag(&mut args.config, other, inline_value, tokens, &mut idx)? {
                    return Err(CliError::invalid_input(format!(
                        "unknown render option '{other}'"
                    )));
                }
            }
        }
        idx += 1;
    }

    if args.input.as_os_str().is_empty() {
        return Err(CliError::invalid_input("render requires --input <path>"));
    }
    Ok(args)
}

fn parse_baseline_args(tokens: &[String]) -> Result<BaselineArgs, CliError> {
    let mut args = BaselineArgs::default();
    let mut idx = 0usize;
    while idx < tokens.len() {
        let (flag, inline_value) = split_flag(tokens[idx].as_str())?;
        match flag {
            "--seed" => {
                let raw = take_flag_value(flag, inline_value, tokens, &mut idx)?;
                args.seed = parse_u64_arg(raw.as_str(), flag)?;
            }
            "--n" => {
                let raw = take_flag_value(flag, inline_value, tokens, &mut idx)?;
                args.n = parse_usize_arg(raw.as_str(), flag)?;
            }
            "--json" => {
                ensure_no_inline_value(flag, inline_value)?;
                args.json = true;
            }
            "--output" => {
                let raw = take_flag_value(flag, inline_value, tokens, &mut idx)?;
                args.output = Some(PathBuf::from(raw));
            }
            other => {
                if !apply_config_flag(&mut args.config, other, inline_value, tokens, &mut idx)? {
                    return Err(CliError::invalid_input(format!(
                        "unknown baseline option '{other}'"
                    )));
                }
            }
        }
        idx += 1;
    }
    Ok(args)
}

fn split_flag(token: &str) -> Result<(&str, Option<String>), CliError> {
    if !token.starts_with("--") {
        return Err(CliError::invalid_input(format!(
            "unexpected positional argument '{token}'; expected --flag value"
        )));
    }
    if let Some((flag, value)) = token.split_once('=') {
        return Ok((flag, Some(value.to_string())));
    }
    Ok((token, None))
}

fn take_flag_value(
    flag: &str,
    inline_value: Option<String>,
    tokens: &[String],
    idx: &mut usize,
) -> Result<String, CliError> {
    if let Some(value) = inline_value {
        return Ok(value);
    }

    *idx += 1;
    let value = tokens
        .get(*idx)
        .ok_or_else(|| CliError::invalid_input(format!("{flag} requires a value")))?;
    if value.starts_with("--") {
        return Err(CliError::invalid_input(format!(
            "{flag} requires a value, but got option '{value}'"
        )));
    }
    Ok(value.clone())
}

fn ensure_no_inline_value(flag: &str, inline_value: Option<String>) -> Result<(), CliError> {
    if inline_value.is_some() {
        return Err(CliError::invalid_input(format!(
            "{flag} does not accept a value"
        )));
    }
    Ok(())
}

fn parse_usize_arg(raw: &str, flag: &str) -> Result<usize, CliError> {
    raw.parse::<usize>().map_err(|_| {
        CliError::invalid_input(format!(
            "{flag} expects a non-negative integer, got '{raw}'"
        ))
    })
}

fn parse_u64_arg(raw: &str, flag: &str) -> Result<u64, CliError> {
    raw.parse::<u64>().map_err(|_| {
        CliError::invalid_input(format!(
            "{flag} expects a non-negative integer, got '{raw}'"
        ))
    })
}

fn parse_i32_arg(raw: &str, flag: &str) -> Result<i32, CliError> {
    raw.parse::<i32>()
        .map_err(|_| CliError::invalid_input(format!("{flag} expects an integer, got '{raw}'")))
}

fn print_version() {
    println!("inertia {}", env!("CARGO_PKG_VERSION"));
}

fn print_root_help() {
    println!(
        "inertia {}\n\nUSAGE:\n  inertia [-v...] <COMMAND> [OPTIONS]\n\nCOMMANDS:\n  analyze    Compute I_bar, I_comp and entropy for a signal file\n  render     Print an ASCII plot of a signal with its metrics\n  baseline   Run the golden baseline over synthetic signals\n\nGLOBAL OPTIONS:\n  -v, --verbose   Increase log verbosity (repeatable; RUST_LOG applies otherwise)\n  -h, --help      Show help\n  -V, --version   Show version\n\nRun 'inertia <COMMAND> --help' for subcommand options.",
        env!("CARGO_PKG_VERSION")
    );
}

const CONFIG_HELP: &str = "  --bins <usize>                     Default: 50\n  --fit-mode <linear|poly>           Default: linear\n  --max-degree <usize>               Default: 5 (poly mode)\n  --effort <0..=9>                   Default: 9 (maximum)";

fn print_command_help(command: &str) -> Result<(), CliError> {
    match command {
        "analyze" => {
            println!(
                "USAGE:\n  inertia analyze --input <path> [OPTIONS]\n\nOPTIONS:\n  --input <path>                     Required (.csv, .txt, .dat or .npy)\n{CONFIG_HELP}\n  --plot                             Print the text plot to stderr\n  --output <path>                    Write JSON output to file"
            );
            Ok(())
        }
        "render" => {
            println!(
                "USAGE:\n  inertia render --input <path> [OPTIONS]\n\nOPTIONS:\n  --input <path>                     Required (.csv, .txt, .dat or .npy)\n{CONFIG_HELP}\n  --width <usize>                    Default: 72\n  --height <usize>                   Default: 16\n  --no-legend"
            );
            Ok(())
        }
        "baseline" => {
            println!(
                "USAGE:\n  inertia baseline [OPTIONS]\n\nOPTIONS:\n  --seed <u64>                       Default: 0\n  --n <usize>                        Default: 2000\n{CONFIG_HELP}\n  --json                             Emit JSON instead of a table\n  --output <path>                    Write output to file"
            );
            Ok(())
        }
        _ => Err(CliError::invalid_input(format!(
            "unknown command '{command}'; expected one of: analyze, render, baseline"
        ))),
    }
}

fn load_and_analyze(
    input: &Path,
    config: &AnalysisConfig,
) -> Result<(LoadedSignal, InertiaResult), CliError> {
    config.validate()?;
    let loaded = load_signal(input)?;
    let result = analyze_signal(&loaded.signal, config)?;
    Ok((loaded, result))
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), CliError> {
    let (loaded, result) = load_and_analyze(args.input.as_path(), &args.config)?;
    tracing::debug!(
        input = %loaded.path.display(),
        format = %loaded.format,
        n = loaded.len(),
        "input loaded"
    );

    if args.plot {
        eprintln!("{}", render_text(&result, &RenderOptions::default()));
    }

    write_json_output(
        &AnalyzeOutput {
            command: "analyze",
            input: InputSummary::from_loaded(&loaded),
            metrics: MetricsOutput {
                i_bar: result.i_bar(),
                i_comp: result.i_comp(),
                entropy: result.entropy(),
            },
            config: result.config(),
            diagnostics: result.diagnostics(),
        },
        args.output.as_deref(),
    )
}

fn handle_render(args: RenderArgs) -> Result<(), CliError> {
    let (_, result) = load_and_analyze(args.input.as_path(), &args.config)?;
    println!("{}", render_text(&result, &args.options));
    Ok(())
}

fn handle_baseline(args: BaselineArgs) -> Result<(), CliError> {
    args.config.validate()?;
    let rows = baseline_rows(args.seed, args.n, &args.config)?;

    if args.json {
        return write_json_output(
            &BaselineOutput {
                command: "baseline",
                seed: args.seed,
                n: args.n,
                config: args.config,
                rows,
            },
            args.output.as_deref(),
        );
    }

    let table = format_baseline_table(&rows, args.seed, args.n, args.config.bins);
    write_text_output(&table, args.output.as_deref())
}

fn write_text_output(text: &str, output_path: Option<&Path>) -> Result<(), CliError> {
    if let Some(path) = output_path {
        fs::write(path, text)
            .map_err(|source| CliError::io(format!("failed to write '{}'", path.display()), source))
    } else {
        print!("{text}");
        Ok(())
    }
}

fn write_json_output<T: Serialize>(
    payload: &T,
    output_path: Option<&Path>,
) -> Result<(), CliError> {
    let encoded = serde_json::to_string_pretty(payload)
        .map_err(|source| CliError::json("failed to serialize JSON output", source))?;
    write_text_output(&format!("{encoded}\n"), output_path)
}

fn emit_structured_error(err: &CliError) {
    let envelope = ErrorEnvelope {
        error: ErrorPayload {
            code: err.code().to_string(),
            message: err.to_string(),
        },
    };

    match serde_json::to_string_pretty(&envelope) {
        Ok(json) => eprintln!("{json}"),
        Err(_) => eprintln!(
            "{{\"error\":{{\"code\":\"{}\",\"message\":\"{}\"}}}}",
            err.code(),
            err
        ),
    }
}
