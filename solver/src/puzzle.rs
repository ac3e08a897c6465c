//! Plain-text puzzle files.
//!
//! One grid row per line. `.` or `0` is an empty cell and `1` to `8` an island of that value.
//! Bridge markers are `-` and `=` for one or two horizontal bridges, `|` and `H` for one or two vertical bridges.
//! A `#` starts a comment running to the end of the line; lines left blank are skipped.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: io::Error,
    },
    #[error("unexpected character {found:?} on line {line}, column {column}")]
    UnexpectedChar {
        line: usize,
        column: usize,
        found: char,
    },
    #[error("line {line} has {found} cells, expected {expected}")]
    RaggedLine {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("the puzzle has no rows")]
    Empty,
}

fn cell_code(c: char) -> Option<i32> {
    match c {
        '.' => Some(0),
        '0'..='8' => c.to_digit(10).map(|d| d as i32),
        '|' => Some(-1),
        'H' => Some(-2),
        '-' => Some(-3),
        '=' => Some(-4),
        _ => None,
    }
}

/// Parse puzzle text into rows of cell codes.
pub fn parse_puzzle(text: &str) -> Result<Vec<Vec<i32>>, PuzzleError> {
    let mut rows: Vec<Vec<i32>> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let row = line.chars()
            .enumerate()
            .map(|(column, c)| cell_code(c).ok_or(PuzzleError::UnexpectedChar { line: index + 1, column: column + 1, found: c }))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(PuzzleError::RaggedLine { line: index + 1, expected: first.len(), found: row.len() });
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(PuzzleError::Empty);
    }

    Ok(rows)
}

/// Read and parse the puzzle file at `path`.
pub fn read_puzzle(path: &Path) -> Result<Vec<Vec<i32>>, PuzzleError> {
    let text = fs::read_to_string(path).map_err(|source| PuzzleError::Io { path: path.to_path_buf(), source })?;
    parse_puzzle(&text)
}
