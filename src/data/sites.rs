// sites.rs - Site selection and gapped-site filtering

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::core::symbols::Symbol;
use crate::data::alignment::Alignment;

/// Which columns of an alignment to analyze.
///
/// The literal `all` from the command line resolves once into the full
/// column range; an explicit file of 0-based indices resolves into that set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteSelection {
    All,
    Explicit(Vec<usize>),
}

impl SiteSelection {
    /// Build from a CLI/control-file value: the literal `all` or a path to a
    /// whitespace-delimited file of 0-based column indices.
    pub fn from_spec(spec: &str) -> Result<Self, String> {
        if spec.eq_ignore_ascii_case("all") {
            return Ok(SiteSelection::All);
        }
        read_sites(spec)
    }

    /// Resolve to a concrete ordered index set for an alignment of
    /// `num_cols` columns
    pub fn resolve(&self, num_cols: usize) -> Vec<usize> {
        match self {
            SiteSelection::All => (0..num_cols).collect(),
            SiteSelection::Explicit(sites) => sites.clone(),
        }
    }
}

/// Read a whitespace-delimited file of 0-based site indices
pub fn read_sites<P: AsRef<Path>>(path: P) -> Result<SiteSelection, String> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read site list '{}': {}", path.display(), e))?;

    let mut sites = Vec::new();
    for field in content.split_whitespace() {
        let idx = field
            .parse::<usize>()
            .map_err(|_| format!("Invalid site index '{}' in '{}'", field, path.display()))?;
        sites.push(idx);
    }
    Ok(SiteSelection::Explicit(sites))
}

/// Check every kept index against the alignment's column range
pub fn check_site_range(keep: &[usize], num_cols: usize, label: &str) -> Result<(), String> {
    for &i in keep {
        if i >= num_cols {
            return Err(format!(
                "{} site index {} is out of range (alignment has {} columns)",
                label, i, num_cols
            ));
        }
    }
    Ok(())
}

/// Drop sites whose gap fraction over the given sequence ids meets the
/// threshold. Returns the surviving indices sorted ascending.
///
/// Ids are deduplicated first: an id repeated in the pairing table counts
/// once in the gap fraction.
pub fn remove_gapped_sites(
    keep: &[usize],
    aln: &Alignment,
    seq_ids: &[String],
    gap_threshold: f64,
) -> Vec<usize> {
    let unique_ids: HashSet<&str> = seq_ids.iter().map(String::as_str).collect();
    let mut kept: Vec<usize> = keep
        .iter()
        .copied()
        .filter(|&site_i| {
            let site = aln.get_site(site_i);
            let mut total = 0usize;
            let mut gaps = 0usize;
            for seq_id in &unique_ids {
                if let Some(symbols) = site.get(*seq_id) {
                    total += symbols.len();
                    gaps += symbols.iter().filter(|s| **s == Symbol::Gap).count();
                }
            }
            if total == 0 {
                return false; // no relevant sequences at all
            }
            (gaps as f64 / total as f64) < gap_threshold
        })
        .collect();
    kept.sort_unstable();
    kept.dedup();
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn aln_from_rows(rows: &[(&str, &str)], num_cols: usize) -> Alignment {
        let mut aln = Alignment::new(rows.len(), num_cols);
        for (id, seq) in rows {
            aln.store(id, seq).unwrap();
        }
        aln
    }

    #[test]
    fn test_from_spec_all_resolves_full_range() {
        let sel = SiteSelection::from_spec("all").unwrap();
        assert_eq!(sel, SiteSelection::All);
        assert_eq!(sel.resolve(4), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_read_sites_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"0 2\n5\n").unwrap();
        let sel = SiteSelection::from_spec(f.path().to_str().unwrap()).unwrap();
        assert_eq!(sel.resolve(10), vec![0, 2, 5]);
    }

    #[test]
    fn test_read_sites_rejects_garbage() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"0 x 2\n").unwrap();
        assert!(read_sites(f.path()).is_err());
    }

    #[test]
    fn test_check_site_range() {
        assert!(check_site_range(&[0, 3], 4, "virus").is_ok());
        assert!(check_site_range(&[4], 4, "virus").is_err());
    }

    #[test]
    fn test_remove_gapped_sites() {
        // column 1 is half gaps, column 0 and 2 are clean
        let aln = aln_from_rows(&[("s1", "A-C"), ("s2", "AAC")], 3);
        let ids = vec!["s1".to_string(), "s2".to_string()];
        let kept = remove_gapped_sites(&[0, 1, 2], &aln, &ids, 0.3);
        assert_eq!(kept, vec![0, 2]);
        // a laxer threshold keeps everything
        let kept = remove_gapped_sites(&[0, 1, 2], &aln, &ids, 0.6);
        assert_eq!(kept, vec![0, 1, 2]);
    }

    #[test]
    fn test_remove_gapped_counts_duplicated_ids_once() {
        // s1 is half gaps; listing it twice must not inflate the fraction
        let aln = aln_from_rows(&[("s1", "-A"), ("s2", "AA")], 2);
        let ids = vec!["s1".to_string(), "s1".to_string(), "s2".to_string()];
        // site 0 fraction is 1/2, not 2/3: it survives a 0.6 threshold
        let kept = remove_gapped_sites(&[0, 1], &aln, &ids, 0.6);
        assert_eq!(kept, vec![0, 1]);
    }

    #[test]
    fn test_remove_gapped_ignores_unlisted_ids() {
        let aln = aln_from_rows(&[("s1", "AC"), ("s2", "--")], 2);
        let ids = vec!["s1".to_string()];
        let kept = remove_gapped_sites(&[0, 1], &aln, &ids, 0.3);
        assert_eq!(kept, vec![0, 1]);
    }
}
