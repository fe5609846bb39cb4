// probability.rs - Marginal and joint distributions from paired sites

use std::collections::HashMap;
use std::hash::Hash;

use crate::core::symbols::Symbol;
use crate::data::alignment::Site;
use crate::data::pairing::PairingTable;

/// Symbol-frequency distribution for one alignment side
pub type MarginalDist = HashMap<Symbol, f64>;

/// Distribution over paired (left-symbol, right-symbol) outcomes
pub type JointDist = HashMap<(Symbol, Symbol), f64>;

/// Build the left marginal, right marginal and joint distributions for one
/// pair of sites.
///
/// A pairing contributes only when both sides carry a defined, non-missing
/// symbol; otherwise the combination is skipped from all three tables, so
/// missing data never acquires probability mass. With multiset sites (grouped
/// replicate rows) every cross combination of the two symbol lists counts
/// once. A site pair where nothing survives yields empty distributions, the
/// explicit degenerate result downstream statistics handle.
pub fn site_probabilities(
    left_site: &Site,
    right_site: &Site,
    pairing: &PairingTable,
) -> (MarginalDist, MarginalDist, JointDist) {
    let mut left_counts: HashMap<Symbol, usize> = HashMap::new();
    let mut right_counts: HashMap<Symbol, usize> = HashMap::new();
    let mut joint_counts: HashMap<(Symbol, Symbol), usize> = HashMap::new();

    for (left_id, right_id) in &pairing.pairs {
        let (Some(left_syms), Some(right_syms)) =
            (left_site.get(left_id), right_site.get(right_id))
        else {
            continue;
        };
        for &a in left_syms {
            if a.is_missing() {
                continue;
            }
            for &b in right_syms {
                if b.is_missing() {
                    continue;
                }
                *left_counts.entry(a).or_insert(0) += 1;
                *right_counts.entry(b).or_insert(0) += 1;
                *joint_counts.entry((a, b)).or_insert(0) += 1;
            }
        }
    }

    (
        normalize(left_counts),
        normalize(right_counts),
        normalize(joint_counts),
    )
}

/// Normalize a count table by its own total; an all-zero table becomes the
/// empty distribution instead of dividing by zero.
fn normalize<K: Eq + Hash>(counts: HashMap<K, usize>) -> HashMap<K, f64> {
    let total: usize = counts.values().sum();
    if total == 0 {
        return HashMap::new();
    }
    counts
        .into_iter()
        .map(|(k, c)| (k, c as f64 / total as f64))
        .collect()
}
