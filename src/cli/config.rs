// config.rs - Control file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub vir_aln: Option<String>,
    pub host_aln: Option<String>,
    pub seqid_pairs: Option<String>,
    pub outdir: Option<String>,

    // Site selection
    pub vir_keep: Option<String>,
    pub host_keep: Option<String>,
    pub gap_threshold: Option<f64>,

    // Bootstrap
    pub vir_sim: Option<String>,
    pub host_sim: Option<String>,
    pub seqid_taxon: Option<String>,
    pub boot_reps: Option<usize>,
    pub threads: Option<usize>,

    // Flags
    pub dry_run: Option<bool>,
}

impl Config {
    /// Load configuration from TOML control file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read control file '{}': {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse control file '{}': {}", path.display(), e))?;

        println!("📄 Loaded control file: {}", path.display());
        Ok(config)
    }

    /// Generate a sample control file with comments
    pub fn generate_sample() -> String {
        r#"# infcalc.toml - Control file for infcalc
# Command line arguments will override these settings

# Input alignments (phylip) and the virus-host sequence ID pairing
vir_aln = "virus.phy"
host_aln = "host.phy"
seqid_pairs = "virushost.pair"

# Output directory for the .out and .pval files
outdir = "./"

# Site selection: 'all' or a file of 0-based column indices
vir_keep = "all"
host_keep = "all"

# Sites with a gap fraction at or above this threshold are dropped
gap_threshold = 0.3

# Bootstrap significance (optional; both banks required together)
# vir_sim = "virus.sim.phy"
# host_sim = "host.sim.phy"
# seqid_taxon = "seqid_to_taxon.tsv"
# boot_reps = 1000
threads = 1
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_file_parses_toml() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"vir_aln = \"v.phy\"\nthreads = 4\ngap_threshold = 0.5\n")
            .unwrap();
        let config = Config::from_file(f.path()).unwrap();
        assert_eq!(config.vir_aln.as_deref(), Some("v.phy"));
        assert_eq!(config.threads, Some(4));
        assert_eq!(config.gap_threshold, Some(0.5));
        assert!(config.host_aln.is_none());
    }

    #[test]
    fn test_sample_config_round_trips() {
        let sample = Config::generate_sample();
        let config: Config = toml::from_str(&sample).unwrap();
        assert_eq!(config.vir_keep.as_deref(), Some("all"));
        assert_eq!(config.threads, Some(1));
    }
}
