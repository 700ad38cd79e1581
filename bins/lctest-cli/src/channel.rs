// Output channel: append-only, timestamped log of everything the judge CLI printed
use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct OutputChannel {
    path: PathBuf,
    file: File,
}

impl OutputChannel {
    /// Open (or create) the log file, creating parent directories
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open output log {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one timestamped line. Log write failures are reported via
    /// tracing and never abort the flow.
    pub fn append_line(&mut self, line: &str) {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        if let Err(e) = writeln!(self.file, "[{}] {}", stamp, line) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to write output log");
        }
    }

    /// Append raw process output, one log line per output line
    pub fn append_output(&mut self, stream: &str, text: &str) {
        for line in text.lines() {
            self.append_line(&format!("{}: {}", stream, line));
        }
    }

    pub fn read_all(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read output log {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_appended_with_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/output.log");

        let mut channel = OutputChannel::open(&path).unwrap();
        channel.append_line("$ node cli test \"a.py\"");
        channel.append_output("stderr", "line one\nline two\n");

        let content = channel.read_all().unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("$ node cli test \"a.py\""));
        assert!(lines[1].ends_with("stderr: line one"));
        assert!(lines[2].ends_with("stderr: line two"));
    }

    #[test]
    fn test_reopen_keeps_previous_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.log");

        OutputChannel::open(&path).unwrap().append_line("first");
        let mut channel = OutputChannel::open(&path).unwrap();
        channel.append_line("second");

        let content = channel.read_all().unwrap();
        assert!(content.contains("first"));
        assert!(content.contains("second"));
        assert_eq!(channel.path(), path.as_path());
    }
}
