/// Result Presenter
///
/// Success: the judge output is written to the results file and printed.
/// Failure: one generic notification with an offer to open the output log.
/// Error details never appear inline; they live in the output channel.

use crate::channel::OutputChannel;
use crate::prompt::Prompter;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const FAILURE_MESSAGE: &str =
    "Failed to test the solution. Please open the output channel for details.";
pub const OPEN_LOGS_ACTION: &str = "Open logs";

pub struct Presenter<W: Write> {
    out: W,
    result_file: PathBuf,
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W, result_file: &Path) -> Self {
        Self {
            out,
            result_file: result_file.to_path_buf(),
        }
    }

    /// Results view: persist the output, then show it
    pub fn show_result(&mut self, output: &str) -> Result<PathBuf> {
        if let Some(parent) = self.result_file.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&self.result_file, output)
            .with_context(|| format!("Failed to write {}", self.result_file.display()))?;

        writeln!(self.out, "📋 Test result ({}):", self.result_file.display())?;
        writeln!(self.out, "{}", "─".repeat(60))?;
        write!(self.out, "{}", output)?;
        if !output.ends_with('\n') {
            writeln!(self.out)?;
        }
        self.out.flush()?;

        Ok(self.result_file.clone())
    }

    /// Error notification; prints the output log if the user asks for it
    pub async fn report_failure<P: Prompter>(
        &mut self,
        prompter: &mut P,
        channel: &OutputChannel,
    ) -> Result<bool> {
        if !prompter.confirm_action(FAILURE_MESSAGE, OPEN_LOGS_ACTION).await? {
            return Ok(false);
        }

        let log = channel.read_all()?;
        writeln!(self.out, "📜 Output log ({}):", channel.path().display())?;
        writeln!(self.out, "{}", "─".repeat(60))?;
        write!(self.out, "{}", log)?;
        self.out.flush()?;

        Ok(true)
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}
