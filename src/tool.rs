use std::env;
use std::path::PathBuf;

use crate::exec::CommandLine;

/// Default metrics tool looked up on PATH when nothing else is configured.
pub const DEFAULT_TOOL: &str = "picard";

/// Environment override for the metrics tool executable.
pub const TOOL_ENV_VAR: &str = "WGSCHECK_TOOL";

/// Which metrics-collection variant to invoke.
///
/// The two subcommands are expected to produce reports that are
/// line-for-line identical outside a few volatile header lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Reference implementation, `CollectWgsMetrics`.
    Standard,
    /// Fast implementation under test, `CollectFastWgsMetrics`.
    Fast,
}

impl Variant {
    pub fn subcommand(self) -> &'static str {
        match self {
            Variant::Standard => "CollectWgsMetrics",
            Variant::Fast => "CollectFastWgsMetrics",
        }
    }
}

/// One invocation of the external metrics tool. Immutable once built.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub tool: String,
    pub variant: Variant,
    pub input: PathBuf,
    pub reference: PathBuf,
    pub stop_after: u64,
    pub output: PathBuf,
}

impl ToolInvocation {
    /// Render the invocation as a command line:
    /// `<tool> <subcommand> I=<input> O=<output> R=<reference> STOP_AFTER=<n>`
    pub fn command(&self) -> CommandLine {
        CommandLine::new(&self.tool)
            .arg(self.variant.subcommand())
            .arg(format!("I={}", self.input.display()))
            .arg(format!("O={}", self.output.display()))
            .arg(format!("R={}", self.reference.display()))
            .arg(format!("STOP_AFTER={}", self.stop_after))
    }
}

/// Resolve the metrics tool executable.
///
/// Precedence: explicit `--tool` value, then the WGSCHECK_TOOL
/// environment variable, then `picard` on PATH.
pub fn resolve_tool(explicit: Option<&str>) -> String {
    if let Some(tool) = explicit {
        return tool.to_string();
    }
    env::var(TOOL_ENV_VAR).unwrap_or_else(|_| DEFAULT_TOOL.to_string())
}
