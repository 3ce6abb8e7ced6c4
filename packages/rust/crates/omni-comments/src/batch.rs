//! Batch Scheduler - Heavy-Duty Parallel Processing
//!
//! Dispatches one File Task Runner per path onto a dedicated rayon pool and
//! streams `(path, outcome)` pairs back in completion order. Workers share
//! nothing but the read-only catalog and the sending half of a channel; every
//! outcome is built fresh per file.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};

use rayon::prelude::*;

use crate::error::SetupError;
use crate::task::{AtomicPersist, Persist, process_file_with};
use crate::types::{FileOutcome, FixConfig};

/// Bounded worker pool for per-file normalization.
#[derive(Clone)]
pub struct BatchScheduler {
    workers: usize,
    persist: Arc<dyn Persist>,
}

impl std::fmt::Debug for BatchScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchScheduler")
            .field("workers", &self.workers)
            .finish_non_exhaustive()
    }
}

impl Default for BatchScheduler {
    fn default() -> Self {
        Self::new(0)
    }
}

impl BatchScheduler {
    /// Create a scheduler; `workers == 0` sizes the pool to the available
    /// parallelism.
    #[must_use]
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            persist: Arc::new(AtomicPersist),
        }
    }

    /// Replace the write strategy (tests inject failing writers here).
    #[must_use]
    pub fn with_persist(mut self, persist: Arc<dyn Persist>) -> Self {
        self.persist = persist;
        self
    }

    /// Effective pool size.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        if self.workers > 0 {
            self.workers
        } else {
            std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
        }
    }

    /// Start processing `paths`.
    ///
    /// Returns immediately; iterate the returned `BatchRun` to collect
    /// outcomes as they complete. Dropping it stops dispatch of files that
    /// have not started yet.
    ///
    /// # Errors
    /// `SetupError::WorkerPool` when the thread pool cannot be built.
    pub fn run(&self, paths: Vec<PathBuf>, config: &FixConfig) -> Result<BatchRun, SetupError> {
        let workers = self.worker_count();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("omni-comments-{i}"))
            .build()
            .map_err(|e| SetupError::WorkerPool(e.to_string()))?;

        let total = paths.len();
        let (tx, rx) = mpsc::channel();
        let config = config.clone();
        let persist = Arc::clone(&self.persist);

        tracing::info!(files = total, workers, mode = ?config.mode, "starting batch");

        pool.spawn(move || {
            let stopped = paths.into_par_iter().try_for_each_with(tx, |tx, path| {
                let outcome = process_file_with(&path, &config, persist.as_ref());
                tx.send((path, outcome))
            });
            if stopped.is_err() {
                tracing::info!("result receiver dropped; remaining files not dispatched");
            }
        });

        Ok(BatchRun {
            rx,
            total,
            received: 0,
            _pool: pool,
        })
    }
}

/// Outcomes of a running batch, in completion order.
#[derive(Debug)]
pub struct BatchRun {
    rx: Receiver<(PathBuf, FileOutcome)>,
    total: usize,
    received: usize,
    _pool: rayon::ThreadPool,
}

impl BatchRun {
    /// Number of paths dispatched.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Number of outcomes received so far.
    #[must_use]
    pub const fn received(&self) -> usize {
        self.received
    }
}

impl Iterator for BatchRun {
    type Item = (PathBuf, FileOutcome);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.rx.recv().ok()?;
        self.received += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.total - self.received))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RunMode;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_batch_preview_leaves_files() {
        let dir = TempDir::new().expect("Create temp dir");

        let file1 = dir.path().join("test1.ts");
        File::create(&file1)
            .expect("Create file")
            .write_all(b"/ === A ===\n")
            .expect("Write content");

        let file2 = dir.path().join("test2.ts");
        File::create(&file2)
            .expect("Create file")
            .write_all(b"// fine\n")
            .expect("Write content");

        let run = BatchScheduler::new(2)
            .run(vec![file1.clone(), file2], &FixConfig::default())
            .expect("Start batch");
        assert_eq!(run.total(), 2);

        let outcomes: Vec<_> = run.collect();
        assert_eq!(outcomes.len(), 2);
        assert!(
            outcomes
                .iter()
                .any(|(p, o)| *p == file1 && matches!(o, FileOutcome::WouldFix { .. }))
        );

        let content = std::fs::read_to_string(&file1).expect("Read file");
        assert_eq!(content, "/ === A ===\n");
    }

    #[test]
    fn test_batch_apply() {
        let dir = TempDir::new().expect("Create temp dir");

        let file = dir.path().join("test.ts");
        File::create(&file)
            .expect("Create file")
            .write_all(b"=====\n")
            .expect("Write content");

        let config = FixConfig {
            mode: RunMode::Apply,
            ..Default::default()
        };
        let outcomes: Vec<_> = BatchScheduler::default()
            .run(vec![file.clone()], &config)
            .expect("Start batch")
            .collect();

        assert!(matches!(outcomes[0].1, FileOutcome::Fixed { .. }));
        let content = std::fs::read_to_string(&file).expect("Read file");
        assert_eq!(content, "// =====\n");
    }

    #[test]
    fn test_empty_batch_finishes() {
        let run = BatchScheduler::new(1)
            .run(Vec::new(), &FixConfig::default())
            .expect("Start batch");
        assert_eq!(run.count(), 0);
    }
}
