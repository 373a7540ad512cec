use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use wgscheck::harness::{self, HarnessConfig};
use wgscheck::tool;

/// wgscheck - consistency check for fast vs reference WGS metrics collection
///
/// Runs the external metrics tool twice on the same input, once with the
/// reference subcommand and once with the fast one, then requires the two
/// reports to match outside a few volatile header lines and the reference
/// report to have a fixed line count.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Alignment data file, passed to the tool as I=
    #[clap(value_name = "INPUT")]
    input: PathBuf,

    /// Reference genome, passed to the tool as R=
    #[clap(value_name = "REFERENCE")]
    reference: PathBuf,

    /// Metrics tool executable (default: WGSCHECK_TOOL, then picard on PATH)
    #[clap(long = "tool")]
    tool: Option<String>,

    /// Stop the tool after this many input records
    #[clap(long = "stop-after", default_value = "100000")]
    stop_after: u64,

    /// Expected line count of the reference report. Tied to the cutoff:
    /// changing --stop-after means re-deriving this value.
    #[clap(long = "expected-lines", default_value = "263")]
    expected_lines: u64,

    /// Directory the reports are written to
    #[clap(short = 'd', long = "output-dir", default_value = ".")]
    output_dir: PathBuf,

    /// Suppress command traces
    #[clap(long = "quiet")]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = HarnessConfig {
        tool: tool::resolve_tool(args.tool.as_deref()),
        input: args.input,
        reference: args.reference,
        stop_after: args.stop_after,
        expected_lines: args.expected_lines,
        output_dir: args.output_dir,
        quiet: args.quiet,
    };

    harness::run(&config)
}
