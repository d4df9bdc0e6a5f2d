use std::{
    path::Path,
    process::{Command, Stdio},
};

use tracing::debug;

use crate::error::{Error, Result};

/// Something that opens a note for interactive editing.
pub trait Launcher {
    /// Open `path` and block until editing has finished.
    fn open(&self, path: &Path) -> Result<()>;
}

/// The user's editor, run as `<program> <path>` with inherited stdio.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    program: String,
}

impl ExternalEditor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Launcher for ExternalEditor {
    fn open(&self, path: &Path) -> Result<()> {
        debug!(editor = %self.program, path = %path.display(), "launching editor");

        let status = Command::new(&self.program)
            .arg(path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .status()
            .map_err(|e| Error::Command {
                program: self.program.clone(),
                detail: format!("failed to launch editor: {e}"),
            })?;

        if !status.success() {
            return Err(Error::Command {
                program: self.program.clone(),
                detail: format!("finished with error: {status}"),
            });
        }
        Ok(())
    }
}
