// validation.rs - Input validation utilities

use std::path::Path;

use crate::cli::args::Args;

/// Validate all command line arguments after control-file merging
pub fn validate_args(args: &Args) -> Result<(), String> {
    let vir_aln = args.vir_aln.as_ref().ok_or("--vir-aln is required")?;
    let host_aln = args.host_aln.as_ref().ok_or("--host-aln is required")?;
    let seqid_pairs = args.seqid_pairs.as_ref().ok_or("--seqid-pairs is required")?;

    check_file_exists(vir_aln, "--vir-aln")?;
    check_file_exists(host_aln, "--host-aln")?;
    check_file_exists(seqid_pairs, "--seqid-pairs")?;

    // Site lists are either the literal 'all' or an existing file
    for (value, flag) in [(&args.vir_keep, "--vir-keep"), (&args.host_keep, "--host-keep")] {
        if !value.eq_ignore_ascii_case("all") {
            check_file_exists(value, flag)?;
        }
    }

    if args.threads == 0 {
        return Err("--threads must be at least 1".to_string());
    }
    if !(0.0..=1.0).contains(&args.gap_threshold) {
        return Err("--gap-threshold must be between 0.0 and 1.0".to_string());
    }
    if let Some(reps) = args.boot_reps {
        if reps == 0 {
            return Err("--boot-reps must be at least 1".to_string());
        }
    }

    // Bootstrap banks come in matched pairs
    match (&args.vir_sim, &args.host_sim) {
        (Some(vir_sim), Some(host_sim)) => {
            check_file_exists(vir_sim, "--vir-sim")?;
            check_file_exists(host_sim, "--host-sim")?;
        }
        (None, None) => {}
        _ => {
            return Err(
                "--vir-sim and --host-sim must be given together (one replicate bank per side)"
                    .to_string(),
            )
        }
    }
    if let Some(taxon_path) = &args.seqid_taxon {
        if args.vir_sim.is_none() {
            return Err("--seqid-taxon only applies to bootstrap runs (needs --vir-sim/--host-sim)".to_string());
        }
        check_file_exists(taxon_path, "--seqid-taxon")?;
    }

    Ok(())
}

fn check_file_exists(path: &str, flag: &str) -> Result<(), String> {
    if !Path::new(path).is_file() {
        return Err(format!("{}: file not found: '{}'", flag, path));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn touch(dir: &tempfile::TempDir, name: &str) -> String {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"x\n").unwrap();
        path.to_str().unwrap().to_string()
    }

    fn valid_args(dir: &tempfile::TempDir) -> Args {
        Args {
            vir_aln: Some(touch(dir, "v.phy")),
            host_aln: Some(touch(dir, "h.phy")),
            seqid_pairs: Some(touch(dir, "vh.pair")),
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
    fn test_valid_args_pass() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_args(&valid_args(&dir)).is_ok());
    }

    #[test]
    fn test_missing_required_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = valid_args(&dir);
        args.vir_aln = None;
        assert!(validate_args(&args).is_err());

        let mut args = valid_args(&dir);
        args.host_aln = Some(dir.path().join("nope.phy").to_str().unwrap().to_string());
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_sim_banks_must_pair() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = valid_args(&dir);
        args.vir_sim = Some(touch(&dir, "v.sim"));
        assert!(validate_args(&args).is_err());
        args.host_sim = Some(touch(&dir, "h.sim"));
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_threshold_and_thread_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = valid_args(&dir);
        args.threads = 0;
        assert!(validate_args(&args).is_err());

        let mut args = valid_args(&dir);
        args.gap_threshold = 1.5;
        assert!(validate_args(&args).is_err());

        let mut args = valid_args(&dir);
        args.boot_reps = Some(0);
        assert!(validate_args(&args).is_err());
    }
}
