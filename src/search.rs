use std::{io::Write, path::Path};

use tracing::{debug, warn};

use crate::{
    error::Result,
    matcher::SearchTerms,
    results::ResultSet,
    title::{display_title, read_title},
    walker::{Candidate, NoteWalker},
};

/// Which part of a note a search looks at.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum,
)]
pub enum SearchMode {
    /// First line of the note
    #[default]
    Title,
    /// Tag line of the note (not implemented)
    Tags,
    /// Whole note content (not implemented)
    All,
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SearchMode::Title => "title",
            SearchMode::Tags => "tags",
            SearchMode::All => "all",
        })
    }
}

/// What to do with a note that cannot be read during a search.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum,
)]
pub enum UnreadablePolicy {
    /// Warn and continue with the next note
    #[default]
    Skip,
    /// Stop the search with an error
    Abort,
}

#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub mode: SearchMode,
    pub terms: SearchTerms,
    pub on_unreadable: UnreadablePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// No terms were given; nothing was walked.
    MissingTerms,
    /// The requested mode is recognised but has no implementation.
    NotImplemented(SearchMode),
    Results {
        results: ResultSet,
        /// Notes that were skipped because they could not be read.
        skipped: usize,
    },
}

impl SearchOutcome {
    /// The result set, if the search actually ran.
    pub fn results(&self) -> Option<&ResultSet> {
        match self {
            SearchOutcome::Results { results, .. } => Some(results),
            _ => None,
        }
    }
}

/// Walk the notes below `root` and collect those whose title matches.
///
/// Entries are appended in walk order with a display title of
/// `<top-level dir>\t<title>`, where the title has its heading markers
/// trimmed. A missing `root` is treated as an empty note store.
pub fn execute_search(
    root: &Path,
    params: &SearchParams,
) -> Result<SearchOutcome> {
    if params.terms.is_empty() {
        return Ok(SearchOutcome::MissingTerms);
    }

    if params.mode != SearchMode::Title {
        return Ok(SearchOutcome::NotImplemented(params.mode));
    }

    if !root.exists() {
        debug!(root = %root.display(), "note directory does not exist yet");
        return Ok(SearchOutcome::Results {
            results: ResultSet::new(),
            skipped: 0,
        });
    }

    collect_matches(NoteWalker::new(root)?, params)
}

/// Match the titles of `candidates` against `params.terms`, applying
/// `params.on_unreadable` to every `Err` item.
pub fn collect_matches<I>(
    candidates: I,
    params: &SearchParams,
) -> Result<SearchOutcome>
where
    I: IntoIterator<Item = Result<Candidate>>,
{
    let mut results = ResultSet::new();
    let mut skipped = 0;

    for item in candidates {
        let read = item.and_then(|candidate| {
            let title = read_title(&candidate.absolute_path)?;
            Ok((candidate, title))
        });

        match read {
            Ok((candidate, title)) => {
                let Some(raw) = params.terms.matches(&title) else {
                    continue;
                };
                let display = format!(
                    "{}\t{}",
                    candidate.top_level_dir().unwrap_or_default(),
                    display_title(raw)
                );
                debug!(path = %candidate.relative_path.display(), "matched");
                results.push(display, candidate.absolute_path);
            }
            Err(err) => match params.on_unreadable {
                UnreadablePolicy::Abort => return Err(err),
                UnreadablePolicy::Skip => {
                    warn!("skipping unreadable note: {err}");
                    skipped += 1;
                }
            },
        }
    }

    debug!(matches = results.len(), skipped, "search finished");
    Ok(SearchOutcome::Results { results, skipped })
}

/// Print a search outcome for a human, or as JSON when `json` is set.
pub fn format_outcome(
    outcome: &SearchOutcome,
    terms: &SearchTerms,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    match outcome {
        SearchOutcome::MissingTerms => {
            writeln!(out, "Enter search string to search titles")?;
        }
        SearchOutcome::NotImplemented(mode) => {
            writeln!(out, "Searching in: {mode}")?;
            writeln!(out, "To be implemented")?;
        }
        SearchOutcome::Results { results, .. } if json => {
            writeln!(out, "{}", results.to_json(terms.as_slice())?)?;
        }
        SearchOutcome::Results { results, .. } => {
            results.render(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::{config::NOTE_FILE_NAME, error::Error};

    fn write_note(root: &Path, stamp: &str, content: &str) -> PathBuf {
        let dir = root.join(stamp);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(NOTE_FILE_NAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn setup_notes() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        write_note(tmp.path(), "20230103090000", "# Rust ownership\n\nbody");
        write_note(tmp.path(), "20230101090000", "# Cooking pasta\n");
        write_note(tmp.path(), "20230102090000", "# Learning RUST macros\n");
        write_note(tmp.path(), ".git", "# Rust in git metadata\n");
        tmp
    }

    fn params(terms: &[&str]) -> SearchParams {
        SearchParams {
            terms: SearchTerms::new(terms.iter().copied()),
            ..Default::default()
        }
    }

    fn titles(outcome: &SearchOutcome) -> Vec<String> {
        outcome
            .results()
            .unwrap()
            .iter()
            .map(|e| e.title.clone())
            .collect()
    }

    #[test]
    fn matches_in_walk_order() {
        let tmp = setup_notes();
        let outcome = execute_search(tmp.path(), &params(&["rust"])).unwrap();

        assert_eq!(
            titles(&outcome),
            vec![
                "20230102090000\tLearning RUST macros",
                "20230103090000\tRust ownership",
            ]
        );
    }

    #[test]
    fn paths_correspond_to_titles() {
        let tmp = setup_notes();
        let outcome = execute_search(tmp.path(), &params(&["rust"])).unwrap();
        let results = outcome.results().unwrap();

        assert_eq!(
            results.path(0).unwrap(),
            tmp.path().join("20230102090000").join(NOTE_FILE_NAME)
        );
        assert_eq!(
            results.path(1).unwrap(),
            tmp.path().join("20230103090000").join(NOTE_FILE_NAME)
        );
    }

    #[test]
    fn repeated_searches_are_identical() {
        let tmp = setup_notes();
        let p = params(&["rust", "pasta"]);
        let first = execute_search(tmp.path(), &p).unwrap();
        let second = execute_search(tmp.path(), &p).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.results().unwrap().len(), 3);
    }

    #[test]
    fn metadata_directory_is_never_matched() {
        let tmp = setup_notes();
        let outcome = execute_search(tmp.path(), &params(&["git"])).unwrap();
        assert!(outcome.results().unwrap().is_empty());
    }

    #[test]
    fn empty_terms_short_circuit() {
        // The root does not exist: walking it would fail.
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing");
        let outcome = execute_search(&missing, &params(&[])).unwrap();
        assert_eq!(outcome, SearchOutcome::MissingTerms);
        assert!(outcome.results().is_none());
    }

    #[test]
    fn tags_and_all_are_not_implemented() {
        let tmp = setup_notes();
        for mode in [SearchMode::Tags, SearchMode::All] {
            let p = SearchParams {
                mode,
                ..params(&["rust"])
            };
            let outcome = execute_search(tmp.path(), &p).unwrap();
            assert_eq!(outcome, SearchOutcome::NotImplemented(mode));
        }
    }

    #[test]
    fn missing_root_is_empty_store() {
        let tmp = tempfile::tempdir().unwrap();
        let outcome =
            execute_search(&tmp.path().join("zets"), &params(&["x"])).unwrap();
        assert!(outcome.results().unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_note_is_skipped_by_default() {
        let tmp = setup_notes();
        let dir = tmp.path().join("20230104090000");
        std::fs::create_dir(&dir).unwrap();
        std::os::unix::fs::symlink(
            tmp.path().join("does-not-exist"),
            dir.join(NOTE_FILE_NAME),
        )
        .unwrap();

        let outcome = execute_search(tmp.path(), &params(&["rust"])).unwrap();
        match outcome {
            SearchOutcome::Results { results, skipped } => {
                assert_eq!(results.len(), 2);
                assert_eq!(skipped, 1);
            }
            other => panic!("expected results, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_note_aborts_when_asked() {
        let tmp = setup_notes();
        let dir = tmp.path().join("20230104090000");
        std::fs::create_dir(&dir).unwrap();
        std::os::unix::fs::symlink(
            tmp.path().join("does-not-exist"),
            dir.join(NOTE_FILE_NAME),
        )
        .unwrap();

        let p = SearchParams {
            on_unreadable: UnreadablePolicy::Abort,
            ..params(&["rust"])
        };
        let err = execute_search(tmp.path(), &p).unwrap_err();
        assert!(matches!(err, Error::ReadTitle { .. }));
    }

    #[test]
    fn vanished_directory_is_skipped_by_default() {
        let tmp = setup_notes();
        let walker = NoteWalker::new(tmp.path()).unwrap();
        std::fs::remove_dir_all(tmp.path().join("20230102090000")).unwrap();

        let outcome = collect_matches(walker, &params(&["rust"])).unwrap();
        match outcome {
            SearchOutcome::Results { results, skipped } => {
                assert_eq!(skipped, 1);
                assert_eq!(results.len(), 1);
                assert_eq!(
                    results.get(0).unwrap().title,
                    "20230103090000\tRust ownership"
                );
            }
            other => panic!("expected results, got {other:?}"),
        }
    }

    #[test]
    fn vanished_directory_aborts_when_asked() {
        let tmp = setup_notes();
        let walker = NoteWalker::new(tmp.path()).unwrap();
        std::fs::remove_dir_all(tmp.path().join("20230102090000")).unwrap();

        let p = SearchParams {
            on_unreadable: UnreadablePolicy::Abort,
            ..params(&["rust"])
        };
        let err = collect_matches(walker, &p).unwrap_err();
        assert!(matches!(err, Error::Walk { .. }));
    }

    #[test]
    fn format_results_human() {
        let tmp = setup_notes();
        let p = params(&["pasta"]);
        let outcome = execute_search(tmp.path(), &p).unwrap();

        let mut out = Vec::new();
        format_outcome(&outcome, &p.terms, false, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[0] 20230101090000\tCooking pasta\n"
        );
    }

    #[test]
    fn format_empty_results_prints_nothing() {
        let tmp = setup_notes();
        let p = params(&["nothing-matches-this"]);
        let outcome = execute_search(tmp.path(), &p).unwrap();

        let mut out = Vec::new();
        format_outcome(&outcome, &p.terms, false, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn format_missing_terms_prompts() {
        let mut out = Vec::new();
        format_outcome(
            &SearchOutcome::MissingTerms,
            &SearchTerms::default(),
            false,
            &mut out,
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Enter search string to search titles\n"
        );
    }

    #[test]
    fn format_not_implemented_names_mode() {
        let mut out = Vec::new();
        format_outcome(
            &SearchOutcome::NotImplemented(SearchMode::Tags),
            &SearchTerms::new(["x"]),
            false,
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Searching in: tags"));
        assert!(text.contains("To be implemented"));
    }

    #[test]
    fn format_json_output() {
        let tmp = setup_notes();
        let p = params(&["Pasta"]);
        let outcome = execute_search(tmp.path(), &p).unwrap();

        let mut out = Vec::new();
        format_outcome(&outcome, &p.terms, true, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["terms"][0], "Pasta");
        assert_eq!(value["results"][0]["index"], 0);
        assert_eq!(value["results"][0]["title"], "20230101090000\tCooking pasta");
    }
}
