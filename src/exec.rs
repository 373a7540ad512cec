use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// A fully-formed external command line: program plus arguments.
///
/// Built up piecewise so callers never do their own shell quoting; the
/// command is always executed directly, not through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        CommandLine {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.display().to_string())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Single-line rendering for trace output.
    pub fn rendered(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

/// Executes external commands synchronously, one at a time.
///
/// Three modes of execution, matching what callers need back:
/// detached (inherit stdio, exit status ignored here), captured text
/// output, or captured exit code. None of them validates the child's
/// success; callers check exit codes where it matters to them.
pub struct Runner {
    quiet: bool,
}

impl Runner {
    pub fn new(quiet: bool) -> Self {
        Runner { quiet }
    }

    fn trace(&self, line: &str) {
        log::debug!("{line}");
        if !self.quiet {
            eprintln!("[wgscheck] {line}");
        }
    }

    /// Fire-and-forget: the child inherits stdout/stderr and the harness
    /// blocks until it exits. A non-zero exit is not an error at this
    /// layer.
    pub fn run_detached(&self, cmd: &CommandLine) -> Result<()> {
        self.trace(&format!("==> {}", cmd.rendered()));
        let status = cmd
            .to_command()
            .status()
            .with_context(|| format!("failed to launch '{}'", cmd.program()))?;
        log::debug!("'{}' exited with {status}", cmd.program());
        Ok(())
    }

    /// Run and return the child's combined stdout + stderr as text.
    pub fn run_capturing(&self, cmd: &CommandLine) -> Result<String> {
        self.trace(&format!("==> {}", cmd.rendered()));
        let output = cmd
            .to_command()
            .output()
            .with_context(|| format!("failed to launch '{}'", cmd.program()))?;
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        let text = text.trim_end().to_string();
        self.trace(&format!("result: {text}"));
        Ok(text)
    }

    /// Run and return the child's exit code. A child killed by a signal
    /// reports -1.
    pub fn run_for_status(&self, cmd: &CommandLine) -> Result<i32> {
        self.trace(&format!("==> {}", cmd.rendered()));
        let output = cmd
            .to_command()
            .output()
            .with_context(|| format!("failed to launch '{}'", cmd.program()))?;
        let code = output.status.code().unwrap_or(-1);
        self.trace(&format!("result: {code}"));
        Ok(code)
    }
}
