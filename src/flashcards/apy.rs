use anyhow::{Context, Result, anyhow};
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use super::backend::FlashcardExporter;

/// Answer fed to apy when it asks whether to overwrite duplicate cards
const DUPLICATE_ANSWER: &[u8] = b"n";

/// Anki exporter driving the `apy` command line tool
/// Runs `apy add-from-file <path>` and declines overwriting duplicates
pub struct ApyExporter {
    command: String,
}

impl ApyExporter {
    /// Create an exporter invoking the given executable
    pub fn new(command: impl Into<String>) -> Self {
        ApyExporter {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Default for ApyExporter {
    fn default() -> Self {
        ApyExporter::new("apy")
    }
}

impl FlashcardExporter for ApyExporter {
    fn add_from_file(&self, path: &Path) -> Result<()> {
        let mut child = Command::new(&self.command)
            .arg("add-from-file")
            .arg(path)
            .stdin(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn {}. Is it installed?", self.command))?;

        // A closed pipe means the tool never asked about duplicates
        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(DUPLICATE_ANSWER) {
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    log::debug!("{} closed stdin before reading the answer", self.command);
                }
                result => result
                    .with_context(|| format!("Failed to write to {} stdin", self.command))?,
            }
        }

        let status = child
            .wait()
            .with_context(|| format!("Failed to wait for {}", self.command))?;

        if !status.success() {
            return Err(anyhow!("{} failed with status: {}", self.command, status));
        }

        log::debug!("Added cards from {:?}", path);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.command
    }
}
