// stats.rs - Entropy-based information statistics for one column pair

use std::collections::HashMap;
use std::hash::Hash;

use crate::core::probability::site_probabilities;
use crate::data::alignment::Site;
use crate::data::pairing::PairingTable;

/// The statistic tuple for one (left column, right column) pair.
/// Entropies are in bits. `z_min` and `z_joint` are NaN when their
/// denominator is zero (fully conserved or fully missing column); the NaN
/// propagates unchanged to output and bootstrap handling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteStats {
    pub h_left: f64,
    pub h_right: f64,
    pub h_joint: f64,
    pub mi: f64,
    pub vi: f64,
    pub z_min: f64,
    pub z_joint: f64,
}

/// The four bootstrap-eligible statistic slots (everything after the joint
/// entropy in the tuple)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatSlot {
    Mi,
    Vi,
    ZMin,
    ZJoint,
}

impl StatSlot {
    pub const ALL: [StatSlot; 4] = [StatSlot::Mi, StatSlot::Vi, StatSlot::ZMin, StatSlot::ZJoint];

    /// Output column name, matching the stats file header
    pub fn name(&self) -> &'static str {
        match self {
            StatSlot::Mi => "MutInf",
            StatSlot::Vi => "VarInf",
            StatSlot::ZMin => "Zmin_MutInf",
            StatSlot::ZJoint => "Zjoint_MutInf",
        }
    }

    /// VI is distance-like: a replicate supports the observed signal when
    /// its simulated value is at least as small. The similarity slots count
    /// replicates at least as large.
    pub fn is_distance(&self) -> bool {
        matches!(self, StatSlot::Vi)
    }

    /// Pick this slot's value out of a statistic tuple
    pub fn of(&self, stats: &SiteStats) -> f64 {
        match self {
            StatSlot::Mi => stats.mi,
            StatSlot::Vi => stats.vi,
            StatSlot::ZMin => stats.z_min,
            StatSlot::ZJoint => stats.z_joint,
        }
    }
}

/// Shannon entropy in bits over the support of a distribution.
/// Zero-probability entries contribute nothing (log2(0) is never evaluated)
/// and the empty distribution has entropy 0 by convention.
///
/// Probabilities are summed in sorted order, not map iteration order, so
/// identical inputs give bit-identical results across calls.
pub fn entropy<K: Eq + Hash>(dist: &HashMap<K, f64>) -> f64 {
    let mut probs: Vec<f64> = dist.values().copied().filter(|&p| p > 0.0).collect();
    probs.sort_unstable_by(f64::total_cmp);
    let mut h = 0.0;
    for p in probs {
        h -= p * p.log2();
    }
    h
}

/// Compute the statistic tuple from the three distributions. Pure function.
pub fn site_stats<L, R>(
    left: &HashMap<L, f64>,
    right: &HashMap<R, f64>,
    joint: &HashMap<(L, R), f64>,
) -> SiteStats
where
    L: Eq + Hash,
    R: Eq + Hash,
{
    let h_left = entropy(left);
    let h_right = entropy(right);
    let h_joint = entropy(joint);

    let mi = h_left + h_right - h_joint;
    let vi = 2.0 * h_joint - h_left - h_right;

    let h_min = h_left.min(h_right);
    let z_min = if h_min == 0.0 { f64::NAN } else { mi / h_min };
    let z_joint = if h_joint == 0.0 { f64::NAN } else { mi / h_joint };

    SiteStats {
        h_left,
        h_right,
        h_joint,
        mi,
        vi,
        z_min,
        z_joint,
    }
}

/// Build the distributions for one site pair and compute its statistics
pub fn compute_stats(left_site: &Site, right_site: &Site, pairing: &PairingTable) -> SiteStats {
    let (left, right, joint) = site_probabilities(left_site, right_site, pairing);
    site_stats(&left, &right, &joint)
}
