// alignment.rs - Phylip alignment loading and columnar site storage

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::symbols::Symbol;

/// One alignment column: sequence identifier to the multiset of symbols
/// observed at that position.
///
/// Observed alignments carry exactly one symbol per identifier. Simulated
/// replicate alignments may repeat an identifier (one row per underlying
/// sequence replicate), in which case the symbols accumulate into a multiset.
pub type Site = HashMap<String, Vec<Symbol>>;

/// A sequence alignment stored column-wise, one `Site` per position
#[derive(Debug, Clone)]
pub struct Alignment {
    pub num_seqs: usize,
    pub num_cols: usize,
    pub sites: Vec<Site>,
}

impl Alignment {
    pub fn new(num_seqs: usize, num_cols: usize) -> Self {
        Self {
            num_seqs,
            num_cols,
            sites: vec![Site::new(); num_cols],
        }
    }

    /// Add a sequence row to the alignment, one site at a time.
    /// Repeated identifiers append their symbols to the per-site multiset.
    pub fn store(&mut self, seq_id: &str, seq: &str) -> Result<(), String> {
        for (pos, c) in seq.chars().enumerate() {
            if pos >= self.num_cols {
                return Err(format!(
                    "Sequence '{}' is longer than the declared {} columns",
                    seq_id, self.num_cols
                ));
            }
            self.sites[pos]
                .entry(seq_id.to_string())
                .or_default()
                .push(Symbol::from_char(c));
        }
        Ok(())
    }

    /// Identifiers present in the alignment (taken from the first site)
    pub fn seq_ids(&self) -> Vec<String> {
        match self.sites.first() {
            Some(site) => site.keys().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// The site at column `i`; valid for `0 <= i < num_cols`
    pub fn get_site(&self, i: usize) -> &Site {
        &self.sites[i]
    }
}

/// Split a phylip sequence line into its identifier (first 10 characters,
/// trimmed) and its whitespace-stripped sequence payload.
pub(crate) fn split_phy_line(line: &str) -> (String, String) {
    let cut = line
        .char_indices()
        .nth(10)
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    let (id_part, seq_part) = line.split_at(cut);
    let seq: String = seq_part.chars().filter(|c| !c.is_whitespace()).collect();
    (id_part.trim().to_string(), seq)
}

/// Parse a phylip header line into (num_seqs, num_cols)
pub(crate) fn parse_phy_header(line: &str) -> Result<(usize, usize), String> {
    let mut fields = line.split_whitespace();
    let num_seqs = fields
        .next()
        .and_then(|f| f.parse::<usize>().ok())
        .ok_or_else(|| format!("Invalid phylip header: '{}'", line))?;
    let num_cols = fields
        .next()
        .and_then(|f| f.parse::<usize>().ok())
        .ok_or_else(|| format!("Invalid phylip header: '{}'", line))?;
    Ok((num_seqs, num_cols))
}

/// Read a relaxed phylip alignment.
///
/// The first non-blank line carries the sequence and column counts; every
/// following non-blank line is a sequence row (identifier in the first 10
/// characters). Interleaved files work because repeated identifiers append
/// position by position.
pub fn read_phy<P: AsRef<Path>>(path: P) -> Result<Alignment, String> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read alignment '{}': {}", path.display(), e))?;

    let mut aln: Option<Alignment> = None;
    for line in content.lines() {
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }
        match aln {
            None => {
                let (num_seqs, num_cols) = parse_phy_header(line)?;
                aln = Some(Alignment::new(num_seqs, num_cols));
            }
            Some(ref mut a) => {
                let (seq_id, seq) = split_phy_line(line);
                if seq_id.is_empty() {
                    return Err(format!(
                        "Sequence line without identifier in '{}'",
                        path.display()
                    ));
                }
                a.store(&seq_id, &seq)?;
            }
        }
    }

    aln.ok_or_else(|| format!("Alignment file '{}' is empty", path.display()))
}
