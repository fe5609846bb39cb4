// replicates.rs - Simulated replicate alignment bank loading

use std::fs;
use std::path::Path;

use crate::data::alignment::{parse_phy_header, split_phy_line, Alignment};

/// Matched left/right sequences of simulated alignments, one pair per
/// bootstrap replicate. Read-only once loaded.
#[derive(Debug, Clone)]
pub struct ReplicateBank {
    pub left: Vec<Alignment>,
    pub right: Vec<Alignment>,
}

impl ReplicateBank {
    /// Load both sides and check they describe the same number of replicates
    pub fn load<P: AsRef<Path>>(left_path: P, right_path: P) -> Result<Self, String> {
        let left = read_phy_bank(&left_path)?;
        let right = read_phy_bank(&right_path)?;
        if left.is_empty() {
            return Err(format!(
                "Replicate bank '{}' contains no alignments",
                left_path.as_ref().display()
            ));
        }
        if left.len() != right.len() {
            return Err(format!(
                "Replicate banks differ in length: {} left vs {} right replicates",
                left.len(),
                right.len()
            ));
        }
        Ok(Self { left, right })
    }

    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Cap the bank at the first `n` replicates
    pub fn truncate(&mut self, n: usize) {
        self.left.truncate(n);
        self.right.truncate(n);
    }

    /// Every replicate must have the observed alignment's column count
    pub fn validate_columns(&self, left_cols: usize, right_cols: usize) -> Result<(), String> {
        for (r, aln) in self.left.iter().enumerate() {
            if aln.num_cols != left_cols {
                return Err(format!(
                    "Left replicate {} has {} columns, expected {}",
                    r, aln.num_cols, left_cols
                ));
            }
        }
        for (r, aln) in self.right.iter().enumerate() {
            if aln.num_cols != right_cols {
                return Err(format!(
                    "Right replicate {} has {} columns, expected {}",
                    r, aln.num_cols, right_cols
                ));
            }
        }
        Ok(())
    }
}

/// Read a bank of concatenated sequential phylip records from one file.
///
/// Each record starts with its own `num_seqs num_cols` header followed by
/// exactly `num_seqs` sequence rows. Rows sharing an identifier group into
/// per-site symbol multisets, as in the single-alignment reader.
pub fn read_phy_bank<P: AsRef<Path>>(path: P) -> Result<Vec<Alignment>, String> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read replicate bank '{}': {}", path.display(), e))?;

    let mut bank = Vec::new();
    let mut lines = content
        .lines()
        .map(|l| l.trim_end_matches(['\n', '\r']))
        .filter(|l| !l.trim().is_empty());

    while let Some(header) = lines.next() {
        let (num_seqs, num_cols) = parse_phy_header(header)
            .map_err(|e| format!("Replicate {} in '{}': {}", bank.len(), path.display(), e))?;
        let mut aln = Alignment::new(num_seqs, num_cols);
        for row in 0..num_seqs {
            let line = lines.next().ok_or_else(|| {
                format!(
                    "Replicate {} in '{}' is truncated: expected {} sequence rows, got {}",
                    bank.len(),
                    path.display(),
                    num_seqs,
                    row
                )
            })?;
            let (seq_id, seq) = split_phy_line(line);
            if seq_id.is_empty() {
                return Err(format!(
                    "Replicate {} in '{}': sequence row without identifier",
                    bank.len(),
                    path.display()
                ));
            }
            aln.store(&seq_id, &seq)?;
        }
        bank.push(aln);
    }

    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_read_phy_bank_multiple_records() {
        let f = write_temp(
            "2 3\nseq1      ACD\nseq2      AFD\n\
             2 3\nseq1      GGG\nseq2      GCG\n",
        );
        let bank = read_phy_bank(f.path()).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank[0].num_cols, 3);
        assert_eq!(bank[1].get_site(1)["seq2"].len(), 1);
    }

    #[test]
    fn test_read_phy_bank_truncated_record() {
        let f = write_temp("2 3\nseq1      ACD\n");
        assert!(read_phy_bank(f.path()).is_err());
    }

    #[test]
    fn test_bank_length_mismatch() {
        let left = write_temp("1 2\ns1        AC\n1 2\ns1        AD\n");
        let right = write_temp("1 2\ns1        AC\n");
        assert!(ReplicateBank::load(left.path(), right.path()).is_err());
    }

    #[test]
    fn test_validate_columns() {
        let left = write_temp("1 2\ns1        AC\n");
        let right = write_temp("1 3\ns1        ACD\n");
        let bank = ReplicateBank::load(left.path(), right.path()).unwrap();
        assert!(bank.validate_columns(2, 3).is_ok());
        assert!(bank.validate_columns(2, 2).is_err());
    }
}
