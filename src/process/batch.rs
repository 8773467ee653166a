//! Batch processing across many files.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use rayon::prelude::*;

use crate::error::{RipError, Result};
use crate::types::{ProcessingOptions, SizePolicy};

use super::processor::SpriteProcessor;
use super::report::{write_report, BatchReport, ReportEntry, REPORT_FILENAME};

/// Runs the processor over a file list on a fixed-size worker pool.
pub struct BatchController<'a> {
    options: &'a ProcessingOptions,
    policy: &'a SizePolicy,
    jobs: usize,
    interrupt: Arc<AtomicBool>,
}

/// Entries gathered so far, with their input positions.
#[derive(Default)]
struct Collected {
    entries: Vec<(usize, ReportEntry)>,
    report: BatchReport,
}

impl<'a> BatchController<'a> {
    pub fn new(options: &'a ProcessingOptions, policy: &'a SizePolicy) -> Self {
        Self {
            options,
            policy,
            jobs: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Number of worker threads. `1` processes files strictly in order.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Share an interrupt flag; once set, no further files are started.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = flag;
        self
    }

    /// Process every file, calling `on_entry` as each one finishes.
    ///
    /// Returns entries in input order. If interrupted, the report holds
    /// only the files that finished and is flagged as interrupted.
    pub fn run<F>(&self, files: &[PathBuf], on_entry: F) -> Result<BatchReport>
    where
        F: Fn(&ReportEntry) + Sync,
    {
        let started = Instant::now();
        let collected = Mutex::new(Collected::default());

        let work = |(index, path): (usize, &PathBuf)| {
            if self.interrupt.load(Ordering::SeqCst) {
                return;
            }
            let options = self.options.for_file(path, self.policy);
            let entry = SpriteProcessor::new(&options).process(path);
            on_entry(&entry);

            let mut guard = collected.lock().unwrap_or_else(PoisonError::into_inner);
            guard.report.summary.record(&entry);
            guard.entries.push((index, entry));
        };

        if self.jobs == 1 {
            files.iter().enumerate().for_each(work);
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.jobs)
                .build()
                .map_err(|e| RipError::Config {
                    message: format!("Failed to start worker pool: {}", e),
                    help: Some("Try a smaller --jobs value".to_string()),
                })?;
            pool.install(|| files.par_iter().enumerate().for_each(work));
        }

        let Collected {
            mut entries,
            mut report,
        } = collected.into_inner().unwrap_or_else(PoisonError::into_inner);

        entries.sort_by_key(|(index, _)| *index);
        report.files = entries.into_iter().map(|(_, entry)| entry).collect();
        report.summary.interrupted = report.files.len() < files.len();
        report.summary.set_elapsed(started.elapsed());

        log::info!(
            "batch finished: {} of {} files in {:.2}s",
            report.summary.total,
            files.len(),
            report.summary.elapsed_secs
        );

        if self.options.report {
            let path = self.report_path();
            write_report(&report, &path)?;
            log::info!("report written to {}", path.display());
        }

        Ok(report)
    }

    /// Where the JSON report goes when reporting is on.
    pub fn report_path(&self) -> PathBuf {
        self.options.report_dir().join(REPORT_FILENAME)
    }
}
