//! Tests for batch module - parallel runs over discovered trees.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use omni_comments::{
    BatchScheduler, FileError, FileOutcome, FixCategory, FixConfig, Persist, RunMode, summarize,
};
use omni_io::{DiscoverOptions, IoError, discover_files};

fn apply() -> FixConfig {
    FixConfig {
        mode: RunMode::Apply,
        ..Default::default()
    }
}

fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Write content");
    path
}

#[test]
fn test_bad_encodings_do_not_stop_the_run() {
    let dir = TempDir::new().expect("Create temp dir");
    for i in 0..100 {
        let content: &[u8] = match i {
            7 | 42 | 99 => b"/ caf\xe9 ===\n",
            _ if i % 2 == 0 => b"/ === SECTION ===\nconst a = 1;\n",
            _ => b"// already fine\n",
        };
        write(dir.path(), &format!("file_{i:03}.ts"), content);
    }

    let paths = discover_files(dir.path(), &DiscoverOptions::default()).expect("Discover");
    assert_eq!(paths.len(), 100);

    let outcomes: Vec<_> = BatchScheduler::new(4)
        .run(paths, &FixConfig::default())
        .expect("Start batch")
        .collect();

    assert_eq!(outcomes.len(), 100);
    let errors: Vec<_> = outcomes.iter().filter(|(_, o)| o.is_error()).collect();
    assert_eq!(errors.len(), 3);
    assert!(errors.iter().all(|(_, o)| matches!(
        o,
        FileOutcome::Error(FileError::Read(IoError::Encoding(_)))
    )));

    let report = summarize(outcomes, RunMode::Preview, 10, Duration::ZERO);
    assert_eq!(report.files_processed(), 100);
    assert_eq!(report.files_errored, 3);
    assert_eq!(report.files_would_fix + report.files_unchanged, 97);
    assert_eq!(report.files_fixed, 0);
}

#[test]
fn test_outcome_independent_of_siblings() {
    let content = "/ === A ===\n===\nTITLE\n===\n  / note\n";

    let alone_dir = TempDir::new().expect("Create temp dir");
    let alone = write(alone_dir.path(), "a.ts", content.as_bytes());
    let alone_outcome = BatchScheduler::new(1)
        .run(vec![alone.clone()], &apply())
        .expect("Start batch")
        .next()
        .expect("One outcome");

    let mixed_dir = TempDir::new().expect("Create temp dir");
    let a = write(mixed_dir.path(), "a.ts", content.as_bytes());
    let b = write(mixed_dir.path(), "b.ts", b"\x00\x01binary");
    let mixed: Vec<_> = BatchScheduler::new(2)
        .run(vec![a.clone(), b.clone()], &apply())
        .expect("Start batch")
        .collect();

    let mixed_a = mixed.iter().find(|(p, _)| *p == a).expect("Outcome for a");
    let mixed_b = mixed.iter().find(|(p, _)| *p == b).expect("Outcome for b");

    assert!(matches!(
        mixed_b.1,
        FileOutcome::Error(FileError::Read(IoError::BinaryFile))
    ));
    assert_eq!(alone_outcome.1.tally(), mixed_a.1.tally());
    assert_eq!(
        std::fs::read_to_string(&alone).expect("Read alone"),
        std::fs::read_to_string(&a).expect("Read mixed")
    );
    assert_eq!(alone_outcome.1.tally().get(FixCategory::MultilineSections), 1);
}

#[test]
fn test_write_failures_are_per_file() {
    struct RejectB;
    impl Persist for RejectB {
        fn persist(&self, path: &Path, content: &str) -> Result<(), IoError> {
            if path.ends_with("b.ts") {
                return Err(IoError::System(std::io::Error::other("read-only")));
            }
            omni_io::write_text_atomic(path, content)
        }
    }

    let dir = TempDir::new().expect("Create temp dir");
    let a = write(dir.path(), "a.ts", b"=====\n");
    let b = write(dir.path(), "b.ts", b"=====\n");

    let outcomes: Vec<_> = BatchScheduler::new(2)
        .with_persist(Arc::new(RejectB))
        .run(vec![a.clone(), b.clone()], &apply())
        .expect("Start batch")
        .collect();

    let report = summarize(outcomes, RunMode::Apply, 10, Duration::ZERO);
    assert_eq!(report.files_fixed, 1);
    assert_eq!(report.files_errored, 1);
    assert_eq!(std::fs::read_to_string(&a).expect("Read a"), "// =====\n");
    assert_eq!(std::fs::read_to_string(&b).expect("Read b"), "=====\n");
}

#[test]
fn test_dropping_the_run_is_safe() {
    let dir = TempDir::new().expect("Create temp dir");
    let paths: Vec<_> = (0..50)
        .map(|i| write(dir.path(), &format!("f{i}.ts"), b"/ x\n"))
        .collect();

    let mut run = BatchScheduler::new(2)
        .run(paths, &apply())
        .expect("Start batch");
    let (path, outcome) = run.next().expect("First outcome");
    drop(run);

    assert!(matches!(outcome, FileOutcome::Fixed { .. }));
    assert_eq!(std::fs::read_to_string(&path).expect("Read"), "// x\n");
}
