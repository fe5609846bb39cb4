// mod.rs - Core information-statistics engine

pub mod bootstrap;
pub mod probability;
pub mod scan;
pub mod stats;
pub mod symbols;

// Re-export main types for convenience
pub use bootstrap::{bootstrap, CancelToken, PValueTable};
pub use probability::{site_probabilities, JointDist, MarginalDist};
pub use scan::{scan_all, ResultTable};
pub use stats::{compute_stats, entropy, site_stats, SiteStats, StatSlot};
pub use symbols::{Symbol, AMINO_ACIDS};

/// Floating tolerance for probability sums and bootstrap exceedance
/// comparisons
pub const EPS: f64 = 2e-6;
