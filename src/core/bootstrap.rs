// bootstrap.rs - Empirical significance sampling over a replicate bank
//
// One worker task per replicate, admitted in strict FIFO order by a bounded
// pool: worker k starts only after worker k - num_threads has been joined.
// Workers emit typed increment messages on a shared channel; a single
// aggregator owns the exceedance counters, so the hot counting path needs
// no lock. The aggregator finishes after observing one Done sentinel per
// launched worker.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;

use indicatif::{ProgressBar, ProgressStyle};

use crate::core::scan::ResultTable;
use crate::core::stats::{compute_stats, StatSlot};
use crate::core::EPS;
use crate::data::alignment::{Alignment, Site};
use crate::data::pairing::{PairingTable, TaxonMap};
use crate::data::replicates::ReplicateBank;
use crate::data::sites::check_site_range;

/// Empirical p-values keyed by (left column, right column, statistic slot).
/// NaN marks pairs whose observed statistic was itself NaN: the comparison
/// is voided rather than run against zero.
pub type PValueTable = HashMap<(usize, usize, StatSlot), f64>;

/// Message sent from workers to the aggregator
enum BootstrapMessage {
    /// Replicate statistic at least as extreme as the observed one
    Increment {
        left: usize,
        right: usize,
        slot: StatSlot,
    },
    /// End-of-work sentinel, exactly one per worker
    Done,
}

/// Cooperative cancellation signal for the bootstrap run. When raised, no
/// further workers are admitted; active workers drain to their sentinels and
/// the run reports a partial-result error instead of finalizing p-values.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Estimate empirical p-values for every scanned column pair and every
/// bootstrap-eligible statistic slot.
///
/// Either all N replicates complete and exact p-values are returned, or a
/// run-level error is reported and nothing is finalized.
pub fn bootstrap(
    table: &ResultTable,
    bank: &ReplicateBank,
    left_keep: &[usize],
    right_keep: &[usize],
    pairing: &PairingTable,
    taxa: &TaxonMap,
    num_threads: usize,
    cancel: &CancelToken,
) -> Result<PValueTable, String> {
    if bank.is_empty() {
        return Err("Replicate bank is empty; cannot bootstrap".to_string());
    }
    if bank.left.len() != bank.right.len() {
        return Err(format!(
            "Replicate bank is unbalanced: {} left vs {} right replicates",
            bank.left.len(),
            bank.right.len()
        ));
    }
    if num_threads == 0 {
        return Err("Bootstrap needs at least one worker thread".to_string());
    }
    if pairing.is_empty() {
        return Err("Pairing table is empty; cannot bootstrap".to_string());
    }
    let n = bank.len();
    for r in 0..n {
        check_site_range(left_keep, bank.left[r].num_cols, &format!("left replicate {}", r))?;
        check_site_range(right_keep, bank.right[r].num_cols, &format!("right replicate {}", r))?;
    }

    let pb = ProgressBar::new(n as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {per_sec} ETA: {eta}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let (tx, rx) = mpsc::channel::<BootstrapMessage>();

    let (counters, done, launched, failures) = thread::scope(|scope| {
        let pb_agg = pb.clone();
        // Sole owner of the counters and sole channel consumer. Terminates
        // after n sentinels, or on disconnect if a worker dies without one.
        let aggregator = scope.spawn(move || {
            let mut counters: HashMap<(usize, usize, StatSlot), usize> = HashMap::new();
            let mut done = 0usize;
            while done < n {
                match rx.recv() {
                    Ok(BootstrapMessage::Increment { left, right, slot }) => {
                        *counters.entry((left, right, slot)).or_insert(0) += 1;
                    }
                    Ok(BootstrapMessage::Done) => {
                        done += 1;
                        pb_agg.inc(1);
                    }
                    Err(_) => break,
                }
            }
            (counters, done)
        });

        let mut active: VecDeque<thread::ScopedJoinHandle<'_, ()>> = VecDeque::new();
        let mut launched = 0usize;
        let mut failures = 0usize;
        for r in 0..n {
            if cancel.is_cancelled() {
                break;
            }
            // Strict FIFO admission: join the oldest worker before starting
            // the next one once the pool is full.
            while active.len() >= num_threads {
                if let Some(handle) = active.pop_front() {
                    if handle.join().is_err() {
                        failures += 1;
                    }
                }
            }
            let worker_tx = tx.clone();
            let rep_left = &bank.left[r];
            let rep_right = &bank.right[r];
            active.push_back(scope.spawn(move || {
                run_replicate(
                    rep_left, rep_right, left_keep, right_keep, pairing, taxa, table, &worker_tx,
                );
            }));
            launched += 1;
        }
        while let Some(handle) = active.pop_front() {
            if handle.join().is_err() {
                failures += 1;
            }
        }
        drop(tx);

        match aggregator.join() {
            Ok((counters, done)) => Ok((counters, done, launched, failures)),
            Err(_) => Err("Bootstrap aggregator task panicked".to_string()),
        }
    })?;

    if failures > 0 {
        return Err(format!(
            "Bootstrap failed: {} worker task(s) died before emitting their sentinel",
            failures
        ));
    }
    if launched < n {
        return Err(format!(
            "Bootstrap cancelled after {} of {} replicates; no p-values finalized",
            done, n
        ));
    }
    if done != n {
        return Err(format!(
            "Bootstrap aggregator observed {} of {} completion sentinels",
            done, n
        ));
    }
    pb.finish_and_clear();

    let mut pvalues = PValueTable::with_capacity(table.len() * StatSlot::ALL.len());
    for (&(i, j), observed) in table {
        for slot in StatSlot::ALL {
            let p = if slot.of(observed).is_nan() {
                f64::NAN
            } else {
                let count = counters.get(&(i, j, slot)).copied().unwrap_or(0);
                count as f64 / n as f64
            };
            pvalues.insert((i, j, slot), p);
        }
    }
    Ok(pvalues)
}

/// Reduce one replicate alignment to per-column groupings: replicate rows
/// collapse onto their taxon identity, pooling symbols into one multiset
/// per kept column.
fn group_sites(aln: &Alignment, keep: &[usize], taxa: &TaxonMap) -> HashMap<usize, Site> {
    keep.iter()
        .map(|&i| {
            let mut grouped = Site::new();
            for (seq_id, symbols) in aln.get_site(i) {
                grouped
                    .entry(taxa.resolve(seq_id).to_string())
                    .or_default()
                    .extend(symbols.iter().copied());
            }
            (i, grouped)
        })
        .collect()
}

/// One worker: compute this replicate's statistics for every scanned pair,
/// emit an increment per exceedance, then emit the sentinel exactly once.
fn run_replicate(
    rep_left: &Alignment,
    rep_right: &Alignment,
    left_keep: &[usize],
    right_keep: &[usize],
    pairing: &PairingTable,
    taxa: &TaxonMap,
    table: &ResultTable,
    tx: &Sender<BootstrapMessage>,
) {
    let grouped_left = group_sites(rep_left, left_keep, taxa);
    let grouped_right = group_sites(rep_right, right_keep, taxa);

    for &i in left_keep {
        let Some(left_site) = grouped_left.get(&i) else {
            continue;
        };
        for &j in right_keep {
            let Some(right_site) = grouped_right.get(&j) else {
                continue;
            };
            // A pair without an observed entry is a local fault: skip the
            // comparison (non-exceedance), keep the worker alive.
            let Some(observed) = table.get(&(i, j)) else {
                continue;
            };
            let simulated = compute_stats(left_site, right_site, pairing);
            for slot in StatSlot::ALL {
                let obs = slot.of(observed);
                if obs.is_nan() {
                    continue; // voided; reported as a NaN p-value
                }
                let mut sim = slot.of(&simulated);
                if sim.is_nan() {
                    sim = 0.0;
                }
                let diff = obs - sim;
                let exceeds = if slot.is_distance() {
                    diff >= -EPS
                } else {
                    diff <= EPS
                };
                if exceeds {
                    let _ = tx.send(BootstrapMessage::Increment {
                        left: i,
                        right: j,
                        slot,
                    });
                }
            }
        }
    }

    // Sentinel exactly once, even when every comparison above was skipped;
    // the aggregator deadlocks otherwise.
    let _ = tx.send(BootstrapMessage::Done);
}
