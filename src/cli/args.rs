// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// infcalc - Information statistics for paired alignment columns
pub struct Args {
    /// path to the virus-side phylip alignment
    #[argh(option)]
    pub vir_aln: Option<String>,

    /// path to the host-side phylip alignment
    #[argh(option)]
    pub host_aln: Option<String>,

    /// two-column tab-delimited file pairing virus and host sequence IDs
    #[argh(option)]
    pub seqid_pairs: Option<String>,

    /// virus sites to analyze: 'all' or a file of 0-based indices (default: all)
    #[argh(option, default = "String::from(\"all\")")]
    pub vir_keep: String,

    /// host sites to analyze: 'all' or a file of 0-based indices (default: all)
    #[argh(option, default = "String::from(\"all\")")]
    pub host_keep: String,

    /// replicate bank simulating the virus alignment (concatenated phylip records)
    #[argh(option)]
    pub vir_sim: Option<String>,

    /// replicate bank simulating the host alignment (concatenated phylip records)
    #[argh(option)]
    pub host_sim: Option<String>,

    /// optional two-column file mapping replicate sequence IDs to taxon IDs
    #[argh(option)]
    pub seqid_taxon: Option<String>,

    /// output directory (default: ./)
    #[argh(option, short = 'o', default = "String::from(\"./\")")]
    pub outdir: String,

    /// worker threads for the bootstrap phase (default: 1)
    #[argh(option, short = 'T', default = "1")]
    pub threads: usize,

    /// drop sites whose gap fraction meets this threshold (default: 0.3)
    #[argh(option, default = "0.3")]
    pub gap_threshold: f64,

    /// cap on the number of bootstrap replicates taken from the bank
    #[argh(option)]
    pub boot_reps: Option<usize>,

    /// path to TOML control file
    #[argh(option, short = 'c')]
    pub control_file: Option<String>,

    /// validate inputs without computation (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// generate sample control file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
