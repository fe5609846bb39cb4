// merge.rs - Merge control file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over control file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.vir_aln.is_none() {
            self.vir_aln = config.vir_aln;
        }
        if self.host_aln.is_none() {
            self.host_aln = config.host_aln;
        }
        if self.seqid_pairs.is_none() {
            self.seqid_pairs = config.seqid_pairs;
        }
        if self.outdir == "./" && config.outdir.is_some() {
            self.outdir = config.outdir.unwrap();
        }

        // Site selection (only override defaults, not explicit CLI values)
        if self.vir_keep == "all" && config.vir_keep.is_some() {
            self.vir_keep = config.vir_keep.unwrap();
        }
        if self.host_keep == "all" && config.host_keep.is_some() {
            self.host_keep = config.host_keep.unwrap();
        }
        if self.gap_threshold == 0.3 && config.gap_threshold.is_some() {
            self.gap_threshold = config.gap_threshold.unwrap();
        }

        // Bootstrap
        if self.vir_sim.is_none() {
            self.vir_sim = config.vir_sim;
        }
        if self.host_sim.is_none() {
            self.host_sim = config.host_sim;
        }
        if self.seqid_taxon.is_none() {
            self.seqid_taxon = config.seqid_taxon;
        }
        if self.boot_reps.is_none() {
            self.boot_reps = config.boot_reps;
        }
        if self.threads == 1 && config.threads.is_some() {
            self.threads = config.threads.unwrap();
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load control file and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_args() -> Args {
        Args {
            vir_aln: None,
            host_aln: None,
            seqid_pairs: None,
            vir_keep: "all".to_string(),
            host_keep: "all".to_string(),
            vir_sim: None,
            host_sim: None,
            seqid_taxon: None,
            outdir: "./".to_string(),
            threads: 1,
            gap_threshold: 0.3,
            boot_reps: None,
            control_file: None,
            dry_run: false,
            generate_config: false,
        }
    }

    #[test]
    fn test_config_fills_unset_values() {
        let config = Config {
            vir_aln: Some("v.phy".to_string()),
            threads: Some(8),
            ..Config::default()
        };
        let args = default_args().merge_with_config(config);
        assert_eq!(args.vir_aln.as_deref(), Some("v.phy"));
        assert_eq!(args.threads, 8);
    }

    #[test]
    fn test_cli_values_take_precedence() {
        let mut args = default_args();
        args.vir_aln = Some("cli.phy".to_string());
        args.threads = 2;
        let config = Config {
            vir_aln: Some("config.phy".to_string()),
            threads: Some(8),
            ..Config::default()
        };
        let args = args.merge_with_config(config);
        assert_eq!(args.vir_aln.as_deref(), Some("cli.phy"));
        assert_eq!(args.threads, 2);
    }
}
