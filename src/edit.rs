//! Interactive search → select → edit → sync flow.
//!
//! ```text
//! AwaitingSearchTerms → Searching → AwaitingSelection
//!     → Idle                                   (no usable selection)
//!     → Editing → Committing → Syncing → Idle  (valid selection)
//! ```

use std::{
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    editor::Launcher,
    error::Result,
    search::{SearchParams, execute_search, format_outcome},
    select::{OutOfRange, read_selection},
    sync::{StepReport, VersionControl, format_reports, sync_changes},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    AwaitingSearchTerms,
    Searching,
    AwaitingSelection,
    Editing,
    Committing,
    Syncing,
    Idle,
}

/// How a run of the flow ended.
#[derive(Debug)]
pub enum EditOutcome {
    /// Nothing was edited.
    Idle,
    /// The note at `path` was edited and the store synchronised.
    Synced {
        path: PathBuf,
        reports: Vec<StepReport>,
    },
}

/// The edit flow and its external collaborators.
pub struct EditFlow<'a, L, V> {
    pub editor: &'a L,
    pub vcs: &'a V,
    /// Root of the note store, where the repository lives.
    pub repo_root: &'a Path,
    pub out_of_range: OutOfRange,
}

impl<L: Launcher, V: VersionControl> EditFlow<'_, L, V> {
    /// Search `notes_dir`, ask for a selection on `input`, then edit and
    /// sync the chosen note. Prompts and reports go to `out`.
    pub fn run(
        &self,
        notes_dir: &Path,
        params: &SearchParams,
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> Result<EditOutcome> {
        let mut state = FlowState::AwaitingSearchTerms;

        if params.terms.is_empty() {
            writeln!(out, "Enter search string to search titles")?;
            return Ok(self.finish(state));
        }

        state = self.advance(state, FlowState::Searching);
        let outcome = execute_search(notes_dir, params)?;
        format_outcome(&outcome, &params.terms, false, out)?;

        let Some(results) = outcome.results().filter(|r| !r.is_empty()) else {
            return Ok(self.finish(state));
        };

        state = self.advance(state, FlowState::AwaitingSelection);
        writeln!(out, "Edit?")?;
        out.flush()?;

        let Some(index) = read_selection(input, results.len(), self.out_of_range)?
        else {
            return Ok(self.finish(state));
        };
        let Some(entry) = results.get(index) else {
            return Ok(self.finish(state));
        };

        state = self.advance(state, FlowState::Editing);
        if let Err(err) = self.editor.open(&entry.path) {
            warn!("{err}");
            writeln!(out, "{err}")?;
        }

        state = self.advance(state, FlowState::Committing);
        let reports = sync_changes(self.vcs, &entry.title)?;

        state = self.advance(state, FlowState::Syncing);
        format_reports(&reports, self.repo_root, out)?;

        self.advance(state, FlowState::Idle);
        Ok(EditOutcome::Synced {
            path: entry.path.clone(),
            reports,
        })
    }

    fn advance(&self, from: FlowState, to: FlowState) -> FlowState {
        debug!(?from, ?to, "edit flow");
        to
    }

    fn finish(&self, from: FlowState) -> EditOutcome {
        self.advance(from, FlowState::Idle);
        EditOutcome::Idle
    }
}
