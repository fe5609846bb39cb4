// scan.rs - Pairwise column scan over the L x R site grid

use std::collections::HashMap;

use crate::core::stats::{compute_stats, SiteStats};
use crate::data::alignment::Alignment;
use crate::data::pairing::PairingTable;
use crate::data::sites::check_site_range;

/// Observed statistics keyed by (left column index, right column index).
/// Insertion order is irrelevant; output formatting sorts the keys.
pub type ResultTable = HashMap<(usize, usize), SiteStats>;

/// Compute statistics for every (i in left_keep, j in right_keep) pair.
///
/// Out-of-range indices are a caller error, rejected before any work is
/// done. The scan itself is sequential: the grid is read-only and each cell
/// is cheap.
pub fn scan_all(
    left_keep: &[usize],
    right_keep: &[usize],
    left_aln: &Alignment,
    right_aln: &Alignment,
    pairing: &PairingTable,
) -> Result<ResultTable, String> {
    check_site_range(left_keep, left_aln.num_cols, "left")?;
    check_site_range(right_keep, right_aln.num_cols, "right")?;
    if pairing.is_empty() {
        return Err("Pairing table is empty; nothing to scan".to_string());
    }

    let mut table = ResultTable::with_capacity(left_keep.len() * right_keep.len());
    for &i in left_keep {
        let left_site = left_aln.get_site(i);
        for &j in right_keep {
            let right_site = right_aln.get_site(j);
            table.insert((i, j), compute_stats(left_site, right_site, pairing));
        }
    }
    Ok(table)
}
