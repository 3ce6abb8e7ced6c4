use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;

use omni_comments::{
    BatchScheduler, CommentFixerSettings, FileOutcome, FixConfig, ReportBuilder, RunMode,
    RunReport, SetupError, force_file, generate_unified_diff, normalize,
};
use omni_io::DiscoverOptions;

use crate::cli::Cli;

/// CLI flags resolved against settings and built-in defaults.
#[derive(Debug)]
pub(crate) struct RunPlan {
    pub(crate) config: FixConfig,
    pub(crate) discover: DiscoverOptions,
    pub(crate) workers: usize,
    pub(crate) top_files: usize,
    pub(crate) verbose: bool,
    pub(crate) json: bool,
}

impl RunPlan {
    /// CLI overrides settings; settings override defaults.
    pub(crate) fn resolve(cli: &Cli, settings: &CommentFixerSettings) -> Result<Self, SetupError> {
        let effective = CommentFixerSettings {
            exclude: cli.exclude.clone().or_else(|| settings.exclude.clone()),
            extensions: cli.ext.clone().or_else(|| settings.extensions.clone()),
            workers: cli.workers.or(settings.workers),
            max_file_size: settings.max_file_size,
            max_passes: cli.max_passes.or(settings.max_passes),
            top_files: cli.top.or(settings.top_files),
        };

        let mut config = FixConfig {
            mode: if cli.dry_run {
                RunMode::Preview
            } else {
                RunMode::Apply
            },
            max_passes: effective.resolved_max_passes()?,
            ..FixConfig::default()
        };
        if let Some(limit) = effective.max_file_size {
            config.max_file_size = limit;
        }

        let mut discover = DiscoverOptions::default();
        if let Some(exclude) = effective.exclude.clone() {
            discover.skip_dirs = exclude;
        }
        if let Some(extensions) = effective.extensions.clone() {
            discover.extensions = extensions;
        }

        Ok(Self {
            config,
            discover,
            workers: effective.workers.unwrap_or(0),
            top_files: effective.resolved_top_files(),
            verbose: cli.verbose,
            json: cli.json,
        })
    }
}

/// Run over a directory tree.
pub(crate) fn run_tree_mode(root: &Path, plan: &RunPlan) -> anyhow::Result<()> {
    if !root.exists() {
        return Err(SetupError::RootNotFound(root.to_path_buf()).into());
    }
    let started = Instant::now();

    let paths = omni_io::discover_files(root, &plan.discover).map_err(SetupError::from)?;
    if paths.is_empty() {
        return Err(SetupError::NoFilesDiscovered(root.to_path_buf()).into());
    }
    tracing::info!(root = %root.display(), files = paths.len(), "discovered files");

    let run = BatchScheduler::new(plan.workers).run(paths, &plan.config)?;
    let total = run.total();
    let mut builder = ReportBuilder::new(plan.config.mode, plan.top_files);

    for (path, outcome) in run {
        builder.record(&path, &outcome);
        if plan.verbose && !plan.json {
            print_progress(builder.processed(), total, &path, &outcome);
        }
    }

    let report = builder.finish(started.elapsed());
    tracing::info!(
        processed = report.files_processed(),
        errors = report.files_errored,
        fixes = report.totals.total(),
        "run finished"
    );
    emit_report(&report, plan)
}

/// Run over one file, with optional diff and force fallback.
pub(crate) fn run_file_mode(
    path: &Path,
    plan: &RunPlan,
    diff: bool,
    force: bool,
) -> anyhow::Result<()> {
    if !path.exists() {
        return Err(SetupError::RootNotFound(path.to_path_buf()).into());
    }
    let started = Instant::now();

    let original = if diff {
        omni_io::read_text_safe(path, plan.config.max_file_size).ok()
    } else {
        None
    };

    let outcome = omni_comments::process_file(path, &plan.config);
    if plan.verbose && !plan.json {
        print_progress(1, 1, path, &outcome);
    }

    if let Some(original) = original {
        let normalized = normalize(&original, plan.config.max_passes);
        let label = path.to_string_lossy();
        print!("{}", generate_unified_diff(&original, &normalized.text, &label));
    }

    let report = file_report(path, plan, &outcome, force, started);
    emit_report(&report, plan)
}

/// Single-file report; runs the force fallback when the pipeline did not fix.
fn file_report(
    path: &Path,
    plan: &RunPlan,
    outcome: &FileOutcome,
    force: bool,
    started: Instant,
) -> RunReport {
    let mut builder = ReportBuilder::new(plan.config.mode, plan.top_files);
    builder.record(path, outcome);

    if force && !matches!(outcome, FileOutcome::Fixed { .. }) {
        builder.record_forced(run_force(path, &plan.config));
    }

    builder.finish(started.elapsed())
}

/// Force fallback; failures are reported and count as zero.
fn run_force(path: &Path, config: &FixConfig) -> usize {
    match force_file(path, config) {
        Ok(count) => {
            tracing::debug!(path = %path.display(), count, "force fallback finished");
            count
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), error = %error, "force fallback failed");
            println!("Force: {}: {error}", path.display());
            0
        }
    }
}

fn print_progress(n: usize, total: usize, path: &Path, outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Error(error) => {
            println!("[{n}/{total}] {}: {error}", path.display());
        }
        FileOutcome::Unchanged => {
            println!("[{n}/{total}] {}: {}", path.display(), outcome.status());
        }
        FileOutcome::Fixed { tally, .. } | FileOutcome::WouldFix { tally } => {
            println!(
                "[{n}/{total}] {}: {} ({tally})",
                path.display(),
                outcome.status()
            );
        }
    }
}

fn emit_report(report: &RunReport, plan: &RunPlan) -> anyhow::Result<()> {
    if plan.json {
        println!("{}", report.to_json().context("failed to serialize report")?);
    } else {
        print!("{}", report.render(plan.verbose));
    }
    Ok(())
}

/// Where to run: `--file` wins, then PATH, then the current directory.
pub(crate) fn target_of(cli: &Cli) -> anyhow::Result<(PathBuf, bool)> {
    if let Some(file) = &cli.file {
        return Ok((file.clone(), true));
    }
    let root = match &cli.path {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("failed to resolve current directory")?,
    };
    let is_file = root.is_file();
    Ok((root, is_file))
}
