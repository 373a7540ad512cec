/// End-to-end harness tests against a deterministic fake metrics tool.
///
/// The fake tool is a shell stub that parses the real invocation shape
/// (`<tool> <subcommand> I=... O=... R=... STOP_AFTER=...`) and writes a
/// report whose volatile header lines genuinely differ between the two
/// runs, the way the real tool's do.
use anyhow::Result;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use wgscheck::harness::{self, cleanup_outputs, HarnessConfig, FAST_REPORT, REFERENCE_REPORT};

/// Write an executable stub that emits a 7-line header plus the given
/// extra body lines. `$variant` in the body expands to the subcommand
/// the stub was invoked with.
fn write_fake_tool(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake_picard");
    let script = format!(
        "#!/bin/sh\n\
         variant=\"$1\"\n\
         shift\n\
         out=\"\"\n\
         for arg in \"$@\"; do\n\
         \tcase \"$arg\" in\n\
         \t\tO=*) out=\"${{arg#O=}}\" ;;\n\
         \tesac\n\
         done\n\
         {{\n\
         \techo \"## htsjdk.samtools.metrics.StringHeader\"\n\
         \techo \"# picard.analysis.$variant INPUT=reads.sam\"\n\
         \techo \"# Started on: $(date) pid $$\"\n\
         \techo \"# VALIDATION_STRINGENCY=SILENT\"\n\
         \techo \"## METRICS CLASS\tpicard.analysis.WgsMetrics\"\n\
         \techo \"GENOME_TERRITORY\tMEAN_COVERAGE\tSD_COVERAGE\"\n\
         \techo \"1000000\t2.5\t1.1\"\n\
         {body}\n\
         }} > \"$out\"\n"
    );
    fs::write(&path, script).expect("Failed to write fake tool");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake tool executable");
    path
}

fn config(dir: &TempDir, tool: &Path, expected_lines: u64) -> HarnessConfig {
    HarnessConfig {
        tool: tool.display().to_string(),
        input: PathBuf::from("reads.sam"),
        reference: PathBuf::from("hg19.fa"),
        stop_after: 100_000,
        expected_lines,
        output_dir: dir.path().to_path_buf(),
        quiet: true,
    }
}

#[test]
fn test_consistent_variants_pass() -> Result<()> {
    let dir = TempDir::new()?;
    let tool = write_fake_tool(dir.path(), "\techo \"chr1\t100\t30\"");

    harness::run(&config(&dir, &tool, 8))?;

    assert!(dir.path().join(REFERENCE_REPORT).exists());
    assert!(dir.path().join(FAST_REPORT).exists());
    Ok(())
}

#[test]
fn test_divergent_variants_fail() {
    let dir = TempDir::new().unwrap();
    // The body row depends on the subcommand, so the two reports differ
    // outside the excluded header lines.
    let tool = write_fake_tool(dir.path(), "\techo \"body $variant\"");

    let err = harness::run(&config(&dir, &tool, 8)).expect_err("divergent reports must fail");
    assert!(
        err.to_string().contains("differ outside excluded lines"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_wrong_expected_line_count_fails() {
    let dir = TempDir::new().unwrap();
    let tool = write_fake_tool(dir.path(), "\techo \"chr1\t100\t30\"");

    let err = harness::run(&config(&dir, &tool, 263)).expect_err("wrong line count must fail");
    assert!(
        err.to_string().contains("expected 263 lines"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_missing_tool_fails() {
    let dir = TempDir::new().unwrap();
    let tool = dir.path().join("no_such_tool");

    assert!(
        harness::run(&config(&dir, &tool, 8)).is_err(),
        "unlaunchable tool must fail the run"
    );
}

#[test]
fn test_stale_outputs_are_replaced() -> Result<()> {
    let dir = TempDir::new()?;
    let tool = write_fake_tool(dir.path(), "\techo \"chr1\t100\t30\"");

    // Leftovers from an earlier, different run.
    fs::write(dir.path().join(REFERENCE_REPORT), "stale garbage\n")?;
    fs::write(dir.path().join(FAST_REPORT), "other stale garbage\n")?;

    harness::run(&config(&dir, &tool, 8))?;

    let rewritten = fs::read_to_string(dir.path().join(REFERENCE_REPORT))?;
    assert!(!rewritten.contains("stale garbage"));
    Ok(())
}

#[test]
fn test_rerun_gives_same_verdict() -> Result<()> {
    let dir = TempDir::new()?;
    let tool = write_fake_tool(dir.path(), "\techo \"chr1\t100\t30\"");
    let config = config(&dir, &tool, 8);

    harness::run(&config)?;
    harness::run(&config)?;
    Ok(())
}

#[test]
fn test_cleanup_removes_existing_and_tolerates_missing() -> Result<()> {
    let dir = TempDir::new()?;
    let present = dir.path().join(REFERENCE_REPORT);
    let absent = dir.path().join(FAST_REPORT);
    fs::write(&present, "metrics\n")?;

    let paths = vec![present.clone(), absent.clone()];
    cleanup_outputs(&paths)?;
    assert!(!present.exists());
    assert!(!absent.exists());

    // Second call is a no-op, not an error.
    cleanup_outputs(&paths)?;
    Ok(())
}
