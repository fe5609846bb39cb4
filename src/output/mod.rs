// mod.rs - Tab-delimited output writers

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono;

use crate::core::bootstrap::PValueTable;
use crate::core::scan::ResultTable;
use crate::core::stats::StatSlot;

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(file_path).parent() {
        create_dir_all(parent)
            .map_err(|e| format!("Failed to create parent directory '{}': {}", parent.display(), e))?;
    }
    Ok(())
}

fn comment_header(command_line: &str) -> String {
    format!(
        "# Command: {}\n# Generated: {}\n# infcalc v{}\n",
        command_line,
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        env!("CARGO_PKG_VERSION")
    )
}

/// Job name from the two alignment file names: no-extension basenames
/// joined with an underscore
pub fn jobname(vir_aln: &str, host_aln: &str) -> String {
    let base = |p: &str| -> String {
        let name = Path::new(p)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(p);
        name.strip_suffix(".phy").unwrap_or(name).to_string()
    };
    format!("{}_{}", base(vir_aln), base(host_aln))
}

/// Write the per-column-pair statistics table, sorted by (left, right).
/// The seven numeric fields use fixed 6-decimal formatting; NaN z-scores
/// print as NaN and are the downstream consumer's job to special-case.
pub fn write_stats(file_path: &str, table: &ResultTable, command_line: &str) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path, e))?;
    let mut writer = BufWriter::new(file);

    write!(writer, "{}", comment_header(command_line)).map_err(|e| format!("Write error: {}", e))?;
    writeln!(
        writer,
        "Virus_Column\tMammal_Column\tVir_Entropy\tMam_Entropy\tJoint_Entropy\tMutInf\tVarInf\tZmin_MutInf\tZjoint_MutInf"
    )
    .map_err(|e| format!("Write error: {}", e))?;

    let mut coords: Vec<&(usize, usize)> = table.keys().collect();
    coords.sort();
    for &(i, j) in coords {
        let s = &table[&(i, j)];
        writeln!(
            writer,
            "{}\t{}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}",
            i, j, s.h_left, s.h_right, s.h_joint, s.mi, s.vi, s.z_min, s.z_joint
        )
        .map_err(|e| format!("Write error: {}", e))?;
    }

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("✅ Statistics written to: {}", file_path);
    Ok(())
}

/// Write the bootstrap p-value table, one row per (pair, statistic slot).
///
/// The whole file is assembled in memory and written in one shot: either the
/// complete table lands on disk or nothing does. NaN p-values (voided
/// comparisons) print as NA.
pub fn write_pvalues(
    file_path: &str,
    pvalues: &PValueTable,
    command_line: &str,
) -> Result<(), String> {
    ensure_parent_dir(file_path)?;

    let mut content = comment_header(command_line);
    content.push_str("Virus_Column\tMammal_Column\tStatistic\tPvalue\n");

    let mut coords: Vec<(usize, usize)> = pvalues
        .keys()
        .map(|&(i, j, _)| (i, j))
        .collect();
    coords.sort_unstable();
    coords.dedup();
    for (i, j) in coords {
        for slot in StatSlot::ALL {
            let Some(&p) = pvalues.get(&(i, j, slot)) else {
                continue;
            };
            if p.is_nan() {
                content.push_str(&format!("{}\t{}\t{}\tNA\n", i, j, slot.name()));
            } else {
                content.push_str(&format!("{}\t{}\t{}\t{:.6}\n", i, j, slot.name(), p));
            }
        }
    }

    std::fs::write(file_path, content)
        .map_err(|e| format!("Failed to write p-value file '{}': {}", file_path, e))?;
    println!("✅ P-values written to: {}", file_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stats::SiteStats;
    use std::collections::HashMap;

    fn dummy_stats(mi: f64) -> SiteStats {
        SiteStats {
            h_left: 1.0,
            h_right: 1.0,
            h_joint: 2.0 - mi,
            mi,
            vi: 2.0 - 2.0 * mi,
            z_min: mi,
            z_joint: mi / (2.0 - mi),
        }
    }

    #[test]
    fn test_jobname_strips_phy_extension() {
        assert_eq!(jobname("/data/vir1.phy", "sub/host2.phy"), "vir1_host2");
        assert_eq!(jobname("vir1.fasta", "host2"), "vir1.fasta_host2");
    }

    #[test]
    fn test_write_stats_sorted_and_formatted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        let mut table = ResultTable::new();
        table.insert((1, 0), dummy_stats(0.5));
        table.insert((0, 2), dummy_stats(1.0));
        table.insert((0, 1), dummy_stats(0.25));
        write_stats(path.to_str().unwrap(), &table, "infcalc --test").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let rows: Vec<&str> = content
            .lines()
            .filter(|l| !l.starts_with('#') && !l.starts_with("Virus_Column"))
            .collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("0\t1\t"));
        assert!(rows[1].starts_with("0\t2\t"));
        assert!(rows[2].starts_with("1\t0\t"));
        assert!(rows[1].contains("1.000000"));
    }

    #[test]
    fn test_write_pvalues_nan_as_na() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pval");
        let mut pv: PValueTable = HashMap::new();
        pv.insert((0, 0, StatSlot::Mi), 0.4);
        pv.insert((0, 0, StatSlot::Vi), 0.0);
        pv.insert((0, 0, StatSlot::ZMin), f64::NAN);
        pv.insert((0, 0, StatSlot::ZJoint), f64::NAN);
        write_pvalues(path.to_str().unwrap(), &pv, "infcalc --test").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("0\t0\tMutInf\t0.400000"));
        assert!(content.contains("0\t0\tZmin_MutInf\tNA"));
        assert!(content.contains("0\t0\tZjoint_MutInf\tNA"));
    }
}
