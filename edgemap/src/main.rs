use edgemap::filter::{OperatorKind, OperatorRegistry, load_config};
use edgemap::{BatchInput, run_batch};

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use std::path::PathBuf;

// Default values for some of the program arguments.
const DEFAULT_OUT_DIR: &str = "hasil_segmentasi";

/// Entry point of the program.
fn main() -> anyhow::Result<()> {
    let matches = Command::new("edgemap")
        .version(std::env!("CARGO_PKG_VERSION"))
        .about("Edge maps with the Roberts, Prewitt, Sobel and Frei-Chen operators")
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("Multiple levels of verbosity (up to -vvv)"),
        )
        .arg(
            Arg::new("out-dir")
                .long("out-dir")
                .value_name("path")
                .default_value(DEFAULT_OUT_DIR)
                .value_parser(value_parser!(PathBuf))
                .help("Output directory for the edge maps"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("file")
                .value_parser(value_parser!(PathBuf))
                .help("JSON file overriding operator parameters"),
        )
        .arg(
            Arg::new("method")
                .long("method")
                .value_name("name")
                .action(ArgAction::Append)
                .help("Only run this operator (repeatable): Roberts, Prewitt, Sobel, FreiChen"),
        )
        .arg(
            Arg::new("IMAGE")
                .num_args(1..)
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Paths to PNG or JPEG images"),
        )
        .get_matches();
    // Set log verbosity. Warnings are always shown.
    let verbosity = matches.get_count("verbose") as usize + 1;
    stderrlog::new()
        .quiet(false)
        .verbosity(verbosity)
        .show_level(false)
        .color(stderrlog::ColorChoice::Never)
        .init()
        .context("Failed to initialize log verbosity")?;
    // Start program.
    run(get_args(&matches)?)
}

#[derive(Debug)]
/// Type holding command line arguments.
struct Args {
    registry: OperatorRegistry,
    out_dir: PathBuf,
    inputs: Vec<BatchInput>,
}

/// Retrieve the program arguments from clap matches.
fn get_args(matches: &ArgMatches) -> anyhow::Result<Args> {
    let mut registry = OperatorRegistry::standard();

    if let Some(path) = matches.get_one::<PathBuf>("config") {
        let config = load_config(path)?;
        registry = registry
            .with_config(&config)
            .with_context(|| format!("Invalid operator parameters in {}", path.display()))?;
    }

    if let Some(names) = matches.get_many::<String>("method") {
        let kinds = names
            .map(|name| name.parse::<OperatorKind>())
            .collect::<Result<Vec<_>, _>>()?;
        registry = registry.select(&kinds);
    }

    let inputs = matches
        .get_many::<PathBuf>("IMAGE")
        .into_iter()
        .flatten()
        .map(|path| BatchInput::from_path(path.clone()))
        .collect::<Result<Vec<_>, _>>()?;

    let out_dir = matches
        .get_one::<PathBuf>("out-dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));

    Ok(Args {
        registry,
        out_dir,
        inputs,
    })
}

/// Start actual program with command line arguments successfully parsed.
fn run(args: Args) -> anyhow::Result<()> {
    let now = std::time::Instant::now();
    let report = run_batch(&args.inputs, &args.registry, &args.out_dir)?;
    log::warn!(
        "Wrote {} edge maps to {} in {:.1} s",
        report.len(),
        args.out_dir.display(),
        now.elapsed().as_secs_f32()
    );
    Ok(())
}
