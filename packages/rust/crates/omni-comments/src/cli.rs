use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "omni-comments")]
#[command(
    about = "Fix malformed comment syntax (single-slash comments, bare section titles, naked banners) across a source tree."
)]
pub(crate) struct Cli {
    /// Root directory to scan (default: current directory)
    #[arg(value_name = "PATH")]
    pub(crate) path: Option<PathBuf>,

    /// Process a single file instead of a directory tree
    #[arg(long, value_name = "FILE", conflicts_with = "path")]
    pub(crate) file: Option<PathBuf>,

    /// Report what would change without writing any file
    #[arg(long)]
    pub(crate) dry_run: bool,

    /// Per-file progress, error list in the summary, debug logging
    #[arg(long, short = 'v')]
    pub(crate) verbose: bool,

    /// Directory names to skip (default: node_modules,.git,dist,build,target)
    #[arg(long, value_delimiter = ',', value_name = "DIRS")]
    pub(crate) exclude: Option<Vec<String>>,

    /// File extensions to include (default: ts,tsx)
    #[arg(long, value_delimiter = ',', value_name = "EXTS")]
    pub(crate) ext: Option<Vec<String>>,

    /// Worker threads (default: 0 = available parallelism)
    #[arg(long)]
    pub(crate) workers: Option<usize>,

    /// Convergence cap (default: 3)
    #[arg(long)]
    pub(crate) max_passes: Option<usize>,

    /// Number of files listed under the top-files ranking (default: 10)
    #[arg(long)]
    pub(crate) top: Option<usize>,

    /// Print the run report as JSON
    #[arg(long)]
    pub(crate) json: bool,

    /// If the file was not fixed, double every line-leading single slash
    #[arg(long, requires = "file")]
    pub(crate) force: bool,

    /// Print a unified diff of the changes
    #[arg(long, requires = "file")]
    pub(crate) diff: bool,

    /// Override config directory (holds `omni-dev-fusion/settings.yaml`)
    #[arg(long)]
    pub(crate) conf: Option<PathBuf>,
}
