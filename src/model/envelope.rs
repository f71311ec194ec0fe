use crate::model::{Almanac, Diagnostic};
use serde::{Deserialize, Serialize};

/// Top-level JSON report written next to a solved almanac.
///
/// Carries enough metadata (schema version, source digest, diagnostics, chain
/// shape) to tell two runs over the same input apart when debugging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFile {
    /// Schema version for this JSON payload.
    pub schema_version: u32,

    pub solver: SolverInfo,

    /// `YYYY-MM-DD` of the run.
    pub generated_on: String,

    pub source: SourceInfo,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,

    pub chain: ChainSummary,

    pub results: Results,
}

/// Identifies the program that produced the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Hex MD5 of the almanac text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,

    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSummary {
    pub head: String,
    pub terminal: String,
    pub seed_count: usize,
    pub stages: Vec<StageSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSummary {
    pub source: String,
    pub destination: String,
    /// Elements read from the almanac.
    pub declared: usize,
    /// Identity elements added to cover the domain.
    pub synthesized: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Results {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranges: Option<i64>,
}

impl ChainSummary {
    pub fn of(almanac: &Almanac) -> Self {
        Self {
            head: almanac.head().to_string(),
            terminal: almanac.terminal().to_string(),
            seed_count: almanac.seeds().len(),
            stages: almanac
                .chain()
                .into_iter()
                .map(|m| StageSummary {
                    source: m.source().to_string(),
                    destination: m.destination().to_string(),
                    declared: m.declared_count(),
                    synthesized: m.synthesized_count(),
                })
                .collect(),
        }
    }
}
