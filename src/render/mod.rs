//! Solution -> human-readable text for the command line.
//!
//! Only answers and traces go to stdout; logging goes through `tracing`.

use crate::Solution;

/// Rendering options that control what gets printed.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Print the file name above the answers (bulk mode).
    pub show_path: bool,
    /// Print the chain of categories before the answers.
    pub show_chain: bool,
}

pub fn render_solution(solution: &Solution) -> String {
    render_solution_with_options(solution, &RenderOptions::default())
}

pub fn render_solution_with_options(solution: &Solution, opts: &RenderOptions) -> String {
    let mut lines: Vec<String> = Vec::new();

    if opts.show_path
        && let Some(path) = &solution.path
    {
        lines.push(format!("== {}", path.display()));
    }

    if opts.show_chain {
        lines.push(render_chain(solution));
    }

    if let Some(points) = solution.results.points {
        lines.push(format!("points: {points}"));
    }
    if let Some(ranges) = solution.results.ranges {
        lines.push(format!("ranges: {ranges}"));
    }
    if solution.results.points.is_none() && solution.results.ranges.is_none() {
        lines.push("no seeds reach the terminal category".to_string());
    }

    for trace in &solution.traces {
        lines.push(render_trace(trace));
    }

    lines.join("\n")
}

fn render_chain(solution: &Solution) -> String {
    let chain = &solution.chain;
    let mut out = chain.head.clone();
    for stage in &chain.stages {
        out.push_str(" -> ");
        out.push_str(&stage.destination);
    }
    out
}

/// `seed 79 -> soil 81 -> ... -> location 82`
pub fn render_trace(trace: &[(String, i64)]) -> String {
    trace
        .iter()
        .map(|(category, value)| format!("{category} {value}"))
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChainSummary, Results, StageSummary};
    use std::path::PathBuf;

    fn solution(results: Results) -> Solution {
        Solution {
            path: Some(PathBuf::from("day5.txt")),
            chain: ChainSummary {
                head: "seed".to_string(),
                terminal: "location".to_string(),
                seed_count: 2,
                stages: vec![StageSummary {
                    source: "seed".to_string(),
                    destination: "location".to_string(),
                    declared: 1,
                    synthesized: 2,
                }],
            },
            diagnostics: vec![],
            results,
            traces: vec![vec![("seed".to_string(), 79), ("location".to_string(), 82)]],
        }
    }

    #[test]
    fn renders_answers_then_traces() {
        let s = solution(Results {
            points: Some(35),
            ranges: Some(46),
        });
        assert_eq!(
            render_solution(&s),
            "points: 35\nranges: 46\nseed 79 -> location 82"
        );
    }

    #[test]
    fn header_lines_are_optional() {
        let s = solution(Results {
            points: None,
            ranges: Some(46),
        });
        let opts = RenderOptions {
            show_path: true,
            show_chain: true,
        };
        let out = render_solution_with_options(&s, &opts);
        assert!(out.starts_with("== day5.txt\nseed -> location\nranges: 46"), "{out}");
        assert!(!out.contains("points:"), "{out}");
    }

    #[test]
    fn empty_results_say_so() {
        let mut s = solution(Results::default());
        s.traces.clear();
        assert_eq!(render_solution(&s), "no seeds reach the terminal category");
    }
}
