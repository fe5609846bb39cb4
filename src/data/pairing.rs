// pairing.rs - Sequence ID pairing table and taxon identity lookup

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Ordered table of (left-id, right-id) sequence correspondences.
///
/// Duplicate left ids are tolerated; each occurrence simply contributes its
/// counts again during probability building.
#[derive(Debug, Clone)]
pub struct PairingTable {
    pub pairs: Vec<(String, String)>,
}

impl PairingTable {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Keep only pairs whose ids appear in both alignments
    pub fn keep_common(&self, left_ids: &[String], right_ids: &[String]) -> PairingTable {
        let left_set: HashSet<&str> = left_ids.iter().map(String::as_str).collect();
        let right_set: HashSet<&str> = right_ids.iter().map(String::as_str).collect();
        let pairs = self
            .pairs
            .iter()
            .filter(|(l, r)| left_set.contains(l.as_str()) && right_set.contains(r.as_str()))
            .cloned()
            .collect();
        PairingTable { pairs }
    }

    /// Ids on the left side, in table order
    pub fn left_ids(&self) -> Vec<String> {
        self.pairs.iter().map(|(l, _)| l.clone()).collect()
    }

    /// Ids on the right side, in table order
    pub fn right_ids(&self) -> Vec<String> {
        self.pairs.iter().map(|(_, r)| r.clone()).collect()
    }
}

/// Read a two-column tab-delimited file of paired sequence ids.
/// Lines starting with '#' or without a tab are skipped.
pub fn read_seqid_pairs<P: AsRef<Path>>(path: P) -> Result<PairingTable, String> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read pairing file '{}': {}", path.display(), e))?;

    let mut pairs = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('#') || !line.contains('\t') {
            continue;
        }
        let mut fields = line.split('\t');
        let left = fields.next().unwrap_or("").trim();
        let right = fields.next().unwrap_or("").trim();
        if !left.is_empty() && !right.is_empty() {
            pairs.push((left.to_string(), right.to_string()));
        }
    }

    Ok(PairingTable { pairs })
}

/// Explicit sequence-id to taxon-id lookup, threaded through the bootstrap
/// grouping step instead of a process-wide registry. Unmapped ids resolve
/// to themselves, so the identity map covers the common case where replicate
/// rows already carry taxon ids.
#[derive(Debug, Clone, Default)]
pub struct TaxonMap {
    map: HashMap<String, String>,
}

impl TaxonMap {
    /// Lookup where every sequence id is its own taxon id
    pub fn identity() -> Self {
        Self::default()
    }

    /// Read a two-column tab-delimited seqID -> taxonID file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read taxon map '{}': {}", path.display(), e))?;

        let mut map = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.starts_with('#') || !line.contains('\t') {
                continue;
            }
            let mut fields = line.split('\t');
            let seq_id = fields.next().unwrap_or("").trim();
            let taxon = fields.next().unwrap_or("").trim();
            if !seq_id.is_empty() && !taxon.is_empty() {
                map.insert(seq_id.to_string(), taxon.to_string());
            }
        }
        Ok(Self { map })
    }

    pub fn resolve<'a>(&'a self, seq_id: &'a str) -> &'a str {
        self.map.get(seq_id).map(String::as_str).unwrap_or(seq_id)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_seqid_pairs_skips_comments_and_untabbed() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"# header\nvirA\thostA\nno tab here\nvirB\thostB\n")
            .unwrap();
        let table = read_seqid_pairs(f.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.pairs[0], ("virA".to_string(), "hostA".to_string()));
        assert_eq!(table.pairs[1], ("virB".to_string(), "hostB".to_string()));
    }

    #[test]
    fn test_keep_common_filters_both_sides() {
        let table = PairingTable {
            pairs: vec![
                ("v1".into(), "h1".into()),
                ("v2".into(), "h2".into()),
                ("v3".into(), "h3".into()),
            ],
        };
        let left = vec!["v1".to_string(), "v2".to_string()];
        let right = vec!["h2".to_string(), "h3".to_string()];
        let common = table.keep_common(&left, &right);
        assert_eq!(common.pairs, vec![("v2".to_string(), "h2".to_string())]);
    }

    #[test]
    fn test_taxon_map_identity_fallback() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"rep_01\ttaxA\nrep_02\ttaxA\n").unwrap();
        let map = TaxonMap::from_file(f.path()).unwrap();
        assert_eq!(map.resolve("rep_01"), "taxA");
        assert_eq!(map.resolve("rep_02"), "taxA");
        assert_eq!(map.resolve("unmapped"), "unmapped");
        assert_eq!(TaxonMap::identity().resolve("seqX"), "seqX");
    }
}
