//src/matrix.rs

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{AgcError, Result};

/// The nucleotide identity matrix shipped with the crate.
pub const BUNDLED_MATCH_MATRIX: &str = include_str!("../data/MATCH");

const NO_INDEX: u8 = u8::MAX;

/// Anything that can score a pair of residues.
pub trait ScoringMatrix {
    fn score(&self, a: u8, b: u8) -> i32;
}

/// A substitution matrix read from an NCBI-style text table:
///
/// ```text
/// # comment
///    A  T  G  C
/// A  1 -1 -1 -1
/// T -1  1 -1 -1
/// ...
/// ```
///
/// Symbols are case-insensitive. A pair involving a symbol missing from the
/// table scores the lowest value in the table.
#[derive(Debug, Clone)]
pub struct SubstitutionMatrix {
    symbols: Vec<u8>,
    index: [u8; 256],
    scores: Vec<i32>,
    unknown_score: i32,
}

impl SubstitutionMatrix {
    /// Loads a matrix file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let matrix: Self = text.parse()?;
        log::info!(
            "Loaded substitution matrix {} ({} symbols)",
            path.as_ref().display(),
            matrix.symbols().len()
        );
        Ok(matrix)
    }

    /// The matrix embedded from `data/MATCH`.
    pub fn bundled() -> Result<Self> {
        BUNDLED_MATCH_MATRIX.parse()
    }

    /// Symbols in header order, uppercased.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    fn lookup(&self, b: u8) -> Option<usize> {
        match self.index[b.to_ascii_uppercase() as usize] {
            NO_INDEX => None,
            i => Some(i as usize),
        }
    }
}

impl ScoringMatrix for SubstitutionMatrix {
    #[inline]
    fn score(&self, a: u8, b: u8) -> i32 {
        match (self.lookup(a), self.lookup(b)) {
            (Some(i), Some(j)) => self.scores[i * self.symbols.len() + j],
            _ => self.unknown_score,
        }
    }
}

fn parse_error(line: usize, message: impl Into<String>) -> AgcError {
    AgcError::MatrixParse {
        line,
        message: message.into(),
    }
}

fn parse_symbol(token: &str, line: usize) -> Result<u8> {
    match token.as_bytes() {
        [b] if b.is_ascii_graphic() => Ok(b.to_ascii_uppercase()),
        _ => Err(parse_error(line, format!("invalid symbol '{token}'"))),
    }
}

impl FromStr for SubstitutionMatrix {
    type Err = AgcError;

    fn from_str(text: &str) -> Result<Self> {
        let mut rows = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        let (header_line, header) = rows
            .next()
            .ok_or_else(|| parse_error(0, "no header row"))?;
        let symbols = header
            .split_whitespace()
            .map(|tok| parse_symbol(tok, header_line))
            .collect::<Result<Vec<u8>>>()?;
        if symbols.is_empty() || symbols.len() >= NO_INDEX as usize {
            return Err(parse_error(header_line, "unexpected number of symbols"));
        }

        let mut index = [NO_INDEX; 256];
        for (i, &sym) in symbols.iter().enumerate() {
            if index[sym as usize] != NO_INDEX {
                return Err(parse_error(
                    header_line,
                    format!("duplicate symbol '{}'", sym as char),
                ));
            }
            index[sym as usize] = i as u8;
            index[sym.to_ascii_lowercase() as usize] = i as u8;
        }

        let n = symbols.len();
        let mut scores = vec![0i32; n * n];
        let mut seen = vec![false; n];
        for (line_no, line) in rows {
            let mut fields = line.split_whitespace();
            let row_sym = parse_symbol(fields.next().unwrap_or_default(), line_no)?;
            let row = match index[row_sym as usize] {
                NO_INDEX => {
                    return Err(parse_error(
                        line_no,
                        format!("row symbol '{}' not in header", row_sym as char),
                    ))
                }
                i => i as usize,
            };
            if seen[row] {
                return Err(parse_error(
                    line_no,
                    format!("duplicate row '{}'", row_sym as char),
                ));
            }

            let values = fields
                .map(|tok| {
                    tok.parse::<i32>()
                        .map_err(|_| parse_error(line_no, format!("invalid score '{tok}'")))
                })
                .collect::<Result<Vec<i32>>>()?;
            if values.len() != n {
                return Err(parse_error(
                    line_no,
                    format!("expected {} scores, found {}", n, values.len()),
                ));
            }
            scores[row * n..(row + 1) * n].copy_from_slice(&values);
            seen[row] = true;
        }

        if let Some(missing) = seen.iter().position(|&s| !s) {
            return Err(parse_error(
                0,
                format!("missing row for '{}'", symbols[missing] as char),
            ));
        }

        let unknown_score = scores.iter().copied().min().unwrap_or(0);
        Ok(Self {
            symbols,
            index,
            scores,
            unknown_score,
        })
    }
}
