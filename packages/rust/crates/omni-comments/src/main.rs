//! omni-comments CLI: fix a directory tree or a single file.
//!
//! Settings come from `packages/conf/settings.yaml` and the user config
//! directory (`--conf <dir>` to override); CLI flags win over both.
//!
//! Logging: set `RUST_LOG=omni_comments=debug` (or `warn`, `info`) to see
//! logs on stderr. The report itself goes to stdout.

mod cli;
mod run;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use omni_comments::{load_runtime_settings, set_config_home_override};

use crate::cli::Cli;
use crate::run::{RunPlan, run_file_mode, run_tree_mode, target_of};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(conf_dir) = cli.conf.clone() {
        set_config_home_override(conf_dir);
    }

    // Initialize tracing: RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "omni_comments=debug,omni_io=debug"
        } else {
            "omni_comments=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let runtime_settings = load_runtime_settings();
    let plan = RunPlan::resolve(&cli, &runtime_settings.comment_fixer)?;

    let (target, single_file) = target_of(&cli)?;
    if single_file {
        run_file_mode(&target, &plan, cli.diff, cli.force)
    } else {
        run_tree_mode(&target, &plan)
    }
}
