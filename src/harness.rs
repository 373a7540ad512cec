use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::compare::{self, EXCLUDED_LINE_MARKERS};
use crate::exec::Runner;
use crate::tool::{ToolInvocation, Variant};

/// Report written by the reference variant.
pub const REFERENCE_REPORT: &str = "metrics.txt";
/// Report written by the fast variant.
pub const FAST_REPORT: &str = "metrics_fast.txt";

/// Everything one harness run needs, fixed up front from the CLI.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub tool: String,
    pub input: PathBuf,
    pub reference: PathBuf,
    pub stop_after: u64,
    pub expected_lines: u64,
    pub output_dir: PathBuf,
    pub quiet: bool,
}

impl HarnessConfig {
    pub fn reference_report(&self) -> PathBuf {
        self.output_dir.join(REFERENCE_REPORT)
    }

    pub fn fast_report(&self) -> PathBuf {
        self.output_dir.join(FAST_REPORT)
    }

    fn invocation(&self, variant: Variant, output: &Path) -> ToolInvocation {
        ToolInvocation {
            tool: self.tool.clone(),
            variant,
            input: self.input.clone(),
            reference: self.reference.clone(),
            stop_after: self.stop_after,
            output: output.to_path_buf(),
        }
    }
}

/// Delete the given paths. Paths that do not exist are not an error;
/// calling this twice in a row is harmless.
pub fn cleanup_outputs(paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => log::debug!("removed stale output {}", path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| format!("failed to remove {}", path.display()))
            }
        }
    }
    Ok(())
}

/// Run the full comparison: cleanup, the two tool runs, the
/// line-excluding diff, the line-count check. Strictly sequential; the
/// first failed step aborts the run.
///
/// Tool exits are not checked at invocation time. A tool failure leaves
/// a missing or truncated report behind and surfaces in the diff or
/// count step.
pub fn run(config: &HarnessConfig) -> Result<()> {
    let runner = Runner::new(config.quiet);
    let report_a = config.reference_report();
    let report_b = config.fast_report();

    cleanup_outputs(&[report_a.clone(), report_b.clone()])?;

    for (variant, report) in [(Variant::Standard, &report_a), (Variant::Fast, &report_b)] {
        if !config.quiet {
            eprintln!("[wgscheck] running {} variant", variant.subcommand());
        }
        runner.run_detached(&config.invocation(variant, report).command())?;
    }

    compare::compare_reports(&runner, &report_a, &report_b, &EXCLUDED_LINE_MARKERS)?;
    compare::assert_line_count(&runner, &report_a, config.expected_lines)?;

    println!("Success!!");
    Ok(())
}
