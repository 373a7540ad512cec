use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::exec::{CommandLine, Runner};

/// Lines matching any of these markers are volatile across runs and
/// variants (run timestamp, validation-stringency setting, the tool's
/// self-identifying class line) and are excluded from the comparison.
/// Each marker is passed to the diff as its own exclusion pattern.
pub const EXCLUDED_LINE_MARKERS: [&str; 3] =
    ["Started", "VALIDATION_STRINGENCY", "picard.analysis.Collect"];

/// Build the line-excluding diff invocation, one `-I` per pattern.
pub fn diff_command(path_a: &Path, path_b: &Path, excluded: &[&str]) -> CommandLine {
    let mut cmd = CommandLine::new("diff");
    for pattern in excluded {
        cmd = cmd.arg("-I").arg(*pattern);
    }
    cmd.path_arg(path_a).path_arg(path_b)
}

/// Build the line-count invocation for a report.
pub fn line_count_command(path: &Path) -> CommandLine {
    CommandLine::new("wc").arg("-l").path_arg(path)
}

/// Require the two reports to be identical outside the excluded lines.
///
/// A diff exit code of 0 is the only pass; any remaining difference,
/// including extra non-excluded lines in either file, fails the run.
pub fn compare_reports(
    runner: &Runner,
    path_a: &Path,
    path_b: &Path,
    excluded: &[&str],
) -> Result<()> {
    let code = runner.run_for_status(&diff_command(path_a, path_b, excluded))?;
    if code != 0 {
        bail!(
            "reports differ outside excluded lines: {} vs {} (diff exit code {code})",
            path_a.display(),
            path_b.display()
        );
    }
    Ok(())
}

/// Require the report to contain exactly `expected` lines.
///
/// The count comes from the external counting command; a missing file
/// or unparseable count output fails the same way a mismatch does.
pub fn assert_line_count(runner: &Runner, path: &Path, expected: u64) -> Result<()> {
    let output = runner.run_capturing(&line_count_command(path))?;
    let count: u64 = output
        .split_whitespace()
        .next()
        .with_context(|| format!("no line count reported for {}", path.display()))?
        .parse()
        .with_context(|| format!("unparseable line count output: {output:?}"))?;
    if count != expected {
        bail!(
            "expected {expected} lines in {}, found {count}",
            path.display()
        );
    }
    Ok(())
}
