// mod.rs - Data structures module

pub mod alignment;
pub mod pairing;
pub mod replicates;
pub mod sites;

// Re-export main types for convenience
pub use alignment::{read_phy, Alignment, Site};
pub use pairing::{read_seqid_pairs, PairingTable, TaxonMap};
pub use replicates::{read_phy_bank, ReplicateBank};
pub use sites::{check_site_range, read_sites, remove_gapped_sites, SiteSelection};
