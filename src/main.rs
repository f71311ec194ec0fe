use std::path::PathBuf;
use std::process::ExitCode;

use almanac::config::RunConfig;
use almanac::render::{self, RenderOptions};
use almanac::{Mode, SolveOptions};
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

/// Find the lowest location reachable from an almanac's seeds.
#[derive(Parser, Debug)]
#[command(name = "almanac", version, about)]
struct Cli {
    /// Almanac file to solve.
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    input: Option<PathBuf>,

    /// Solve every `*.txt` almanac under this directory.
    #[arg(long, value_name = "DIR")]
    all: Option<PathBuf>,

    /// How to read the seeds line.
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Category the seeds belong to (default: the seeds label, singular).
    #[arg(long, value_name = "CATEGORY")]
    head: Option<String>,

    /// Category to stop at (default: the end of the chain).
    #[arg(long, value_name = "CATEGORY")]
    terminal: Option<String>,

    /// Also write a JSON report per input.
    #[arg(long)]
    json: bool,

    /// Directory for JSON reports (default: next to each input).
    #[arg(long, value_name = "DIR")]
    json_dir: Option<PathBuf>,

    /// Print every seed's path through the chain.
    #[arg(long)]
    trace: bool,

    /// YAML config file (default: ./almanac.yaml when present).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// More logging on stderr; repeat for debug output.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn solve_options(cli: &Cli) -> almanac::Result<SolveOptions> {
    let mut opts = SolveOptions::default();

    let config = match &cli.config {
        Some(path) => Some(RunConfig::load(path)?),
        None => RunConfig::discover(&std::env::current_dir()?)?,
    };
    if let Some(cfg) = config {
        cfg.apply_to(&mut opts);
    }

    // command-line flags win over the config file.
    if let Some(mode) = cli.mode {
        opts.mode = mode;
    }
    if let Some(head) = &cli.head {
        opts.build.head_category = Some(head.clone());
    }
    if let Some(terminal) = &cli.terminal {
        opts.build.terminal_category = Some(terminal.clone());
    }
    if cli.json {
        opts.write_json = true;
    }
    if let Some(dir) = &cli.json_dir {
        opts.json_dir = Some(dir.clone());
    }
    if cli.trace {
        opts.trace = true;
    }
    Ok(opts)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let opts = match solve_options(&cli) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(root) = &cli.all {
        let summary = match almanac::solve_all_in_dir(root, &opts) {
            Ok(summary) => summary,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        };

        let render_opts = RenderOptions {
            show_path: true,
            ..RenderOptions::default()
        };
        for solution in &summary.solved {
            println!("{}", render::render_solution_with_options(solution, &render_opts));
        }
        for (path, e) in &summary.failed {
            eprintln!("error: {}: {e}", path.display());
        }
        return if summary.failed.is_empty() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    let Some(input) = &cli.input else {
        eprintln!("error: no input given");
        return ExitCode::FAILURE;
    };

    let render_opts = RenderOptions {
        show_chain: cli.verbose > 0,
        ..RenderOptions::default()
    };
    match almanac::run(input, &opts, &render_opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
