use std::{
    io::Write,
    path::{Path, PathBuf},
    process::Command,
};

use tracing::{debug, warn};

use crate::{
    config::METADATA_DIR_NAME,
    error::{Error, Result},
};

/// One step of the post-edit synchronisation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStep {
    Stage,
    Commit,
    Pull,
    Push,
}

impl SyncStep {
    /// Steps in the order they run.
    pub const ALL: [SyncStep; 4] =
        [SyncStep::Stage, SyncStep::Commit, SyncStep::Pull, SyncStep::Push];

    fn failure_label(self) -> &'static str {
        match self {
            SyncStep::Stage => "staging changes",
            SyncStep::Commit => "committing changes",
            SyncStep::Pull => "pulling from repository",
            SyncStep::Push => "pushing to repository",
        }
    }
}

impl std::fmt::Display for SyncStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SyncStep::Stage => "stage",
            SyncStep::Commit => "commit",
            SyncStep::Pull => "pull",
            SyncStep::Push => "push",
        })
    }
}

/// Outcome of a single pipeline step. `Ok` carries the command output.
#[derive(Debug)]
pub struct StepReport {
    pub step: SyncStep,
    pub result: Result<String>,
}

/// Version-control operations on the note store.
pub trait VersionControl {
    /// URL of the remote the store synchronises with.
    fn remote_url(&self) -> Result<String>;
    fn stage_all(&self) -> Result<String>;
    fn commit(&self, message: &str) -> Result<String>;
    fn pull(&self, remote: &str) -> Result<String>;
    fn push(&self, remote: &str) -> Result<String>;
}

/// Stage, commit, pull and push, in that order.
///
/// Only a failure to resolve the remote URL is returned as an error; every
/// other step runs regardless of earlier failures and is reported on its
/// own.
pub fn sync_changes(
    vcs: &impl VersionControl,
    message: &str,
) -> Result<Vec<StepReport>> {
    let remote = vcs.remote_url()?;
    debug!(%remote, "resolved remote");

    let reports = SyncStep::ALL
        .into_iter()
        .map(|step| {
            let result = match step {
                SyncStep::Stage => vcs.stage_all(),
                SyncStep::Commit => vcs.commit(message),
                SyncStep::Pull => vcs.pull(&remote),
                SyncStep::Push => vcs.push(&remote),
            };
            if let Err(ref err) = result {
                warn!(%step, "{err}");
            }
            StepReport { step, result }
        })
        .collect();

    Ok(reports)
}

/// Print a line per step that failed or produced output.
pub fn format_reports(
    reports: &[StepReport],
    root: &Path,
    out: &mut impl Write,
) -> Result<()> {
    for report in reports {
        match (&report.result, report.step) {
            (Err(err), step) => {
                writeln!(out, "Error {}: {err}", step.failure_label())?;
            }
            (Ok(_), SyncStep::Commit) => {
                writeln!(
                    out,
                    "Changes committed to local repo at {}",
                    root.display()
                )?;
            }
            (Ok(output), _) if !output.is_empty() => {
                writeln!(out, "{output}")?;
            }
            (Ok(_), _) => {}
        }
    }
    Ok(())
}

/// `git` run against `<root>/.git` with `<root>` as the work tree.
#[derive(Debug, Clone)]
pub struct Git {
    root: PathBuf,
    program: String,
}

impl Git {
    pub fn new(root: &Path) -> Self {
        Self::with_program(root, "git")
    }

    pub fn with_program(root: &Path, program: impl Into<String>) -> Self {
        Self {
            root: root.to_path_buf(),
            program: program.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let label = format!("{} {}", self.program, args.join(" "));
        debug!(command = %label, "running");

        let output = Command::new(&self.program)
            .arg("--git-dir")
            .arg(self.root.join(METADATA_DIR_NAME))
            .arg("--work-tree")
            .arg(&self.root)
            .args(args)
            .output()
            .map_err(|e| Error::Command {
                program: label.clone(),
                detail: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = match stderr.trim() {
                "" => output.status.to_string(),
                msg => msg.to_string(),
            };
            return Err(Error::Command {
                program: label,
                detail,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl VersionControl for Git {
    fn remote_url(&self) -> Result<String> {
        self.run(&["config", "--get", "remote.origin.url"])
    }

    fn stage_all(&self) -> Result<String> {
        self.run(&["add", "."])
    }

    fn commit(&self, message: &str) -> Result<String> {
        self.run(&["commit", "-m", message])
    }

    fn pull(&self, remote: &str) -> Result<String> {
        self.run(&["pull", remote])
    }

    fn push(&self, remote: &str) -> Result<String> {
        self.run(&["push", remote])
    }
}
