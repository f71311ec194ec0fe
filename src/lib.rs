pub mod config;
pub mod error;
pub mod model;
pub mod parse;
pub mod render;
pub mod resolve;

pub use error::{AlmanacError, Result};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use time::{OffsetDateTime, macros::format_description};
use walkdir::WalkDir;

use model::{ChainSummary, Diagnostic, ReportFile, Results};

/// Which reading of the seeds line to solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Every seed value is a single point.
    Points,
    /// Seed values are `(start, length)` pairs.
    Ranges,
    #[default]
    Both,
}

impl Mode {
    pub fn includes_points(self) -> bool {
        matches!(self, Mode::Points | Mode::Both)
    }

    pub fn includes_ranges(self) -> bool {
        matches!(self, Mode::Ranges | Mode::Both)
    }
}

/// Options controlling what gets solved and what gets written to disk.
#[derive(Debug, Clone, Default)]
pub struct SolveOptions {
    pub mode: Mode,
    pub build: parse::BuildOptions,
    /// Record each seed's path through the chain.
    pub trace: bool,
    /// Also write a JSON report for every solved file.
    pub write_json: bool,
    /// Where JSON reports go; next to the input when `None`.
    pub json_dir: Option<PathBuf>,
}

/// Everything learned from solving one almanac.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub path: Option<PathBuf>,
    pub chain: ChainSummary,
    pub diagnostics: Vec<Diagnostic>,
    pub results: Results,
    /// One `(category, value)` path per seed when tracing was requested.
    pub traces: Vec<Vec<(String, i64)>>,
}

/// Outcome of a bulk run; one failing file does not stop the others.
#[derive(Debug, Default)]
pub struct BulkSummary {
    pub solved: Vec<Solution>,
    pub failed: Vec<(PathBuf, AlmanacError)>,
}

/// Solve almanac text held in memory.
pub fn solve_str(src: &str, opts: &SolveOptions) -> Result<Solution> {
    let parsed = parse::parse_almanac(src);
    let almanac = parse::build_almanac(&parsed, &opts.build)?;

    let mut results = Results::default();
    if opts.mode.includes_points() {
        results.points = almanac.minimum_location_for_points()?;
    }
    if opts.mode.includes_ranges() {
        results.ranges = almanac.minimum_location_for_ranges()?;
    }

    let traces = if opts.trace {
        almanac
            .seeds()
            .iter()
            .map(|&s| almanac.trace_point(s))
            .collect::<Result<Vec<_>>>()?
    } else {
        vec![]
    };

    Ok(Solution {
        path: None,
        chain: ChainSummary::of(&almanac),
        diagnostics: parsed.diagnostics,
        results,
        traces,
    })
}

/// Single file mode: read, solve, and write the JSON report when asked.
pub fn solve_file(path: &Path, opts: &SolveOptions) -> Result<Solution> {
    solve_file_under(path, None, opts)
}

/// Like [`solve_file`]; `root` is the bulk-mode directory `path` was found under.
fn solve_file_under(path: &Path, root: Option<&Path>, opts: &SolveOptions) -> Result<Solution> {
    let bytes = fs::read(path)?;

    // puzzle inputs are ASCII; fall back to lossy conversion rather than fail on stray bytes.
    let src = String::from_utf8_lossy(&bytes).into_owned();

    let started = Instant::now();
    let mut solution = solve_str(&src, opts)?;
    solution.path = Some(path.to_path_buf());

    tracing::info!(
        path = %path.display(),
        points = solution.results.points,
        ranges = solution.results.ranges,
        ms = started.elapsed().as_secs_f64() * 1000.0,
        "solved"
    );

    if opts.write_json {
        let json_path = report_path(path, root, opts.json_dir.as_deref());
        write_report(&solution, &bytes, &json_path)?;
        tracing::info!(path = %json_path.display(), "wrote report");
    }

    Ok(solution)
}

/// Single file mode: solve and print the answers to stdout.
pub fn run(path: &Path, opts: &SolveOptions, render_opts: &render::RenderOptions) -> Result<()> {
    let solution = solve_file(path, opts)?;
    println!("{}", render::render_solution_with_options(&solution, render_opts));
    Ok(())
}

/// Bulk mode: walk `root` for `*.txt` almanacs and solve each in path order.
pub fn solve_all_in_dir(root: &Path, opts: &SolveOptions) -> Result<BulkSummary> {
    let start_time = Instant::now();

    if !root.exists() {
        return Err(AlmanacError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("input directory not found: {}", root.display()),
        )));
    }

    let mut summary = BulkSummary::default();
    let mut entries = Vec::new();
    for entry in WalkDir::new(root) {
        match entry {
            Ok(e) => {
                if e.file_type().is_file() && e.path().extension().is_some_and(|ext| ext == "txt") {
                    entries.push(e);
                }
            }
            Err(e) => {
                // an unreadable directory fails the run without hiding the rest.
                let path = e.path().unwrap_or(root).to_path_buf();
                tracing::warn!(path = %path.display(), error = %e, "cannot read directory entry");
                summary.failed.push((path, e.into()));
            }
        }
    }

    entries.sort_by(|a, b| a.path().cmp(b.path()));

    let total = entries.len();

    for (i, entry) in entries.iter().enumerate() {
        let path = entry.path();
        match solve_file_under(path, Some(root), opts) {
            Ok(solution) => summary.solved.push(solution),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to solve");
                summary.failed.push((path.to_path_buf(), e));
            }
        }

        let total_ms = start_time.elapsed().as_millis();
        tracing::info!(
            "[{:>4}/{:>4}] [{:02}:{:02}.{:03}] {}",
            i + 1,
            total,
            total_ms / 60_000,
            (total_ms % 60_000) / 1_000,
            total_ms % 1_000,
            path.display()
        );
    }

    tracing::info!(
        solved = summary.solved.len(),
        failed = summary.failed.len(),
        secs = start_time.elapsed().as_secs_f64(),
        "bulk run done"
    );
    Ok(summary)
}

/// Where the JSON report for `input` goes.
///
/// Without `json_dir` the report sits next to the input. With it, inputs found
/// under a bulk-mode `root` keep their path relative to that root, so
/// `a/day5.txt` and `b/day5.txt` do not share a report.
pub fn report_path(input: &Path, root: Option<&Path>, json_dir: Option<&Path>) -> PathBuf {
    let Some(dir) = json_dir else {
        return input.with_extension("json");
    };
    let relative = root
        .and_then(|r| input.strip_prefix(r).ok())
        .filter(|rel| rel.file_name().is_some())
        .map(Path::to_path_buf)
        .or_else(|| input.file_name().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("almanac"));
    dir.join(relative).with_extension("json")
}

/// Build the JSON envelope for a solution.
pub fn build_report(solution: &Solution, src_bytes: &[u8]) -> ReportFile {
    let fmt = format_description!("[year]-[month]-[day]");
    let generated_on = OffsetDateTime::now_utc()
        .format(&fmt)
        .unwrap_or_else(|_| "1970-01-01".to_string());

    ReportFile {
        schema_version: model::SCHEMA_VERSION,
        solver: model::SolverInfo {
            name: model::SOLVER_NAME.to_string(),
            version: model::SOLVER_VERSION.to_string(),
        },
        generated_on,
        source: model::SourceInfo {
            path: solution
                .path
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            md5: Some(format!("{:x}", md5::compute(src_bytes))),
            byte_len: src_bytes.len() as u64,
        },
        diagnostics: solution.diagnostics.clone(),
        chain: solution.chain.clone(),
        results: solution.results,
    }
}

fn write_report(solution: &Solution, src_bytes: &[u8], json_path: &Path) -> Result<()> {
    if let Some(parent) = json_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    // prettify JSON so it's easy to inspect / diff.
    let json = serde_json::to_string_pretty(&build_report(solution, src_bytes))?;
    fs::write(json_path, json)?;
    Ok(())
}
