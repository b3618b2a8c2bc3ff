//! Transition matrix sources: the text format and random generation.

use std::fs;
use std::path::Path;

use log::{debug, info};
use pagerank_solver::{ComputationError, DenseMatrix, PageRankError, SourceError};

/// Dumping factor and transition matrix read from a text source.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSource {
    pub dumping_factor: f64,
    pub transition: DenseMatrix,
}

fn is_delimiter(c: char) -> bool {
    c == ';' || c.is_whitespace()
}

fn parse_value(line: usize, token: &str) -> Result<f64, SourceError> {
    token.parse().map_err(|_| SourceError::Malformed {
        line,
        token: token.to_string(),
    })
}

/// Parses the text format: the first line holds the dumping factor, every
/// following non-blank line one matrix row with values separated by `;`
/// and/or whitespace. The number of rows fixes the square dimension.
pub fn parse_matrix_text(name: &str, text: &str) -> Result<ParsedSource, PageRankError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (first, dump_line) = lines
        .next()
        .ok_or_else(|| SourceError::Empty(name.to_string()))?;
    let dumping_factor = parse_value(first, dump_line)?;

    let mut rows = Vec::new();
    let mut row_lines = Vec::new();
    for (number, line) in lines {
        let row = line
            .split(is_delimiter)
            .filter(|token| !token.is_empty())
            .map(|token| parse_value(number, token))
            .collect::<Result<Vec<f64>, _>>()?;
        rows.push(row);
        row_lines.push(number);
    }

    if rows.is_empty() {
        return Err(SourceError::Malformed {
            line: first + 1,
            token: "no matrix rows".to_string(),
        }
        .into());
    }
    let n = rows.len();
    if let Some((row, line)) = rows.iter().zip(&row_lines).find(|(row, _)| row.len() != n) {
        return Err(SourceError::Malformed {
            line: *line,
            token: format!("{} values in a {}x{} matrix", row.len(), n, n),
        }
        .into());
    }

    let transition = DenseMatrix::from_rows(&rows)?;
    debug!("Parsed a {}x{} matrix from {}", n, n, name);
    Ok(ParsedSource {
        dumping_factor,
        transition,
    })
}

/// Reads and parses a matrix file.
pub fn read_matrix_file(path: &Path) -> Result<ParsedSource, PageRankError> {
    let name = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|err| SourceError::Unreadable {
        path: name.clone(),
        reason: err.to_string(),
    })?;
    info!("Reading PageRank data from {}", name);
    parse_matrix_text(&name, &text)
}

/// Generates an `n x n` matrix whose entries are drawn independently and
/// uniformly from [0, 1).
pub fn generate_random(n: usize, seed: Option<u64>) -> Result<DenseMatrix, ComputationError> {
    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let mut matrix = DenseMatrix::new(n, n)?;
    matrix.data_mut().iter_mut().for_each(|v| *v = rng.f64());
    info!("Generated a random {}x{} transition matrix", n, n);
    Ok(matrix)
}
