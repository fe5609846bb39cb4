// main.rs - CLI entry point

use std::time::Instant;

use infcalc::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --control-file /path/to/infcalc.toml");
        return Ok(());
    }

    // Load control file if specified
    if let Some(config_path) = args.control_file.clone() {
        args = args.with_config_file(&config_path)?;
    }

    validate_args(&args)?;

    println!("🚀 infcalc v{}", env!("CARGO_PKG_VERSION"));
    println!("🧵 Bootstrap threads: {}", args.threads);

    let total_start = Instant::now();

    // These are guaranteed present by validate_args
    let vir_aln_path = args.vir_aln.as_ref().ok_or("--vir-aln is required")?;
    let host_aln_path = args.host_aln.as_ref().ok_or("--host-aln is required")?;
    let seqid_pairs_path = args.seqid_pairs.as_ref().ok_or("--seqid-pairs is required")?;

    // Load alignments
    println!("🧬 Loading alignments...");
    let vir_aln = read_phy(vir_aln_path)?;
    let host_aln = read_phy(host_aln_path)?;
    println!(
        "   Virus: {} sequences × {} columns",
        vir_aln.num_seqs, vir_aln.num_cols
    );
    println!(
        "   Host:  {} sequences × {} columns",
        host_aln.num_seqs, host_aln.num_cols
    );

    // Load pairing table, restricted to ids present in both alignments
    let pairing = read_seqid_pairs(seqid_pairs_path)?
        .keep_common(&vir_aln.seq_ids(), &host_aln.seq_ids());
    if pairing.is_empty() {
        return Err(format!(
            "No usable sequence pairs: nothing in '{}' matches both alignments",
            seqid_pairs_path
        ));
    }
    println!("🔗 Sequence pairs: {}", pairing.len());

    // Resolve site selections and drop heavily gapped sites
    let vir_keep = SiteSelection::from_spec(&args.vir_keep)?.resolve(vir_aln.num_cols);
    let host_keep = SiteSelection::from_spec(&args.host_keep)?.resolve(host_aln.num_cols);
    check_site_range(&vir_keep, vir_aln.num_cols, "virus")?;
    check_site_range(&host_keep, host_aln.num_cols, "host")?;

    let vir_keep = remove_gapped_sites(&vir_keep, &vir_aln, &pairing.left_ids(), args.gap_threshold);
    let host_keep =
        remove_gapped_sites(&host_keep, &host_aln, &pairing.right_ids(), args.gap_threshold);
    println!(
        "🧹 Sites after gap filtering (threshold {}): {} virus × {} host",
        args.gap_threshold,
        vir_keep.len(),
        host_keep.len()
    );
    if vir_keep.is_empty() || host_keep.is_empty() {
        return Err("No sites left to analyze after gap filtering".to_string());
    }

    if args.dry_run {
        println!("✅ Dry run completed successfully");
        println!(
            "📊 Would scan {} column pairs",
            vir_keep.len() * host_keep.len()
        );
        return Ok(());
    }

    // Pairwise column scan
    println!(
        "🔄 Scanning {} × {} = {} column pairs...",
        vir_keep.len(),
        host_keep.len(),
        vir_keep.len() * host_keep.len()
    );
    let scan_start = Instant::now();
    let table = scan_all(&vir_keep, &host_keep, &vir_aln, &host_aln, &pairing)?;
    println!("✅ Scan completed in {:.2}s", scan_start.elapsed().as_secs_f64());

    let job = jobname(vir_aln_path, host_aln_path);
    let out_path = format!("{}/{}.out", args.outdir, job);
    write_stats(&out_path, &table, &command_line)?;

    // Bootstrap significance phase (optional)
    if let (Some(vir_sim), Some(host_sim)) = (&args.vir_sim, &args.host_sim) {
        println!("🎲 Loading replicate banks...");
        let mut bank = ReplicateBank::load(vir_sim, host_sim)?;
        if let Some(reps) = args.boot_reps {
            if reps > bank.len() {
                return Err(format!(
                    "--boot-reps {} exceeds the {} replicates in the bank",
                    reps,
                    bank.len()
                ));
            }
            bank.truncate(reps);
        }
        bank.validate_columns(vir_aln.num_cols, host_aln.num_cols)?;
        println!("   {} replicate pairs", bank.len());

        let taxa = match &args.seqid_taxon {
            Some(path) => TaxonMap::from_file(path)?,
            None => TaxonMap::identity(),
        };

        let boot_start = Instant::now();
        let pvalues = bootstrap(
            &table,
            &bank,
            &vir_keep,
            &host_keep,
            &pairing,
            &taxa,
            args.threads,
            &CancelToken::new(),
        )?;
        println!(
            "✅ Bootstrap completed in {:.2}s ({} replicates)",
            boot_start.elapsed().as_secs_f64(),
            bank.len()
        );

        let pval_path = format!("{}/{}.pval", args.outdir, job);
        write_pvalues(&pval_path, &pvalues, &command_line)?;
    }

    println!(
        "🏁 Done in {:.2}s",
        total_start.elapsed().as_secs_f64()
    );
    Ok(())
}
