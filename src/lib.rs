// lib.rs - infcalc library root

//! # infcalc - Information statistics for paired alignment columns
//!
//! This library estimates information-theoretic association (mutual
//! information, variation of information and normalized variants) between
//! every pair of columns drawn from two independently aligned sets of
//! sequences (e.g. a virus alignment and a host alignment), linked by an
//! external sequence ID pairing table. An optional bootstrap phase estimates
//! empirical p-values against a bank of simulated replicate alignments using
//! a bounded worker pool with a single counting aggregator.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use infcalc::prelude::*;
//!
//! let vir_aln = read_phy("virus.phy")?;
//! let host_aln = read_phy("host.phy")?;
//! let pairing = read_seqid_pairs("virushost.pair")?
//!     .keep_common(&vir_aln.seq_ids(), &host_aln.seq_ids());
//!
//! let vir_keep = SiteSelection::All.resolve(vir_aln.num_cols);
//! let host_keep = SiteSelection::All.resolve(host_aln.num_cols);
//!
//! let table = scan_all(&vir_keep, &host_keep, &vir_aln, &host_aln, &pairing)?;
//! write_stats("results.out", &table, "infcalc ...")?;
//! # Ok::<(), String>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, Config};
    pub use crate::core::{bootstrap, scan_all, CancelToken, PValueTable, ResultTable};
    pub use crate::core::{compute_stats, entropy, site_probabilities, site_stats};
    pub use crate::core::{SiteStats, StatSlot, Symbol, EPS};
    pub use crate::data::{read_phy, read_phy_bank, read_seqid_pairs, read_sites};
    pub use crate::data::{check_site_range, remove_gapped_sites, Alignment, PairingTable};
    pub use crate::data::{ReplicateBank, Site, SiteSelection, TaxonMap};
    pub use crate::output::{jobname, write_pvalues, write_stats};
}

// Re-export main types at the root level for convenience
pub use crate::cli::Args;
pub use crate::core::{CancelToken, PValueTable, ResultTable, SiteStats, StatSlot, Symbol, EPS};
pub use crate::data::{Alignment, PairingTable, ReplicateBank, SiteSelection, TaxonMap};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "infcalc v{} - Information statistics for paired alignment columns",
        VERSION
    )
}
