use std::io::Write;

use pagerank_solver::{PageRankConfig, PowerIterationMetadata, SolveResult};
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Serialize)]
struct Report<'a> {
    scores: &'a [f64],
    normalized: Option<Vec<f64>>,
    sweeps: usize,
    threads: usize,
    last_delta: f64,
    config: &'a PageRankConfig,
}

/// One score per line, six decimals, `;`-terminated.
pub fn write_plain<W: Write>(out: &mut W, scores: &[f64]) -> std::io::Result<()> {
    for score in scores {
        writeln!(out, "{:.6};", score)?;
    }
    Ok(())
}

pub fn write_json<W: Write>(
    out: &mut W,
    config: &PageRankConfig,
    result: &SolveResult<f64, PowerIterationMetadata>,
) -> Result<()> {
    let report = Report {
        scores: &result.x,
        normalized: result.normalized(),
        sweeps: result.metadata.sweeps,
        threads: result.metadata.threads,
        last_delta: result.metadata.last_delta,
        config,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
