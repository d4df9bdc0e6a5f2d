use std::{ffi::OsString, path::PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::{
    matcher::SearchTerms,
    search::{SearchMode, SearchParams, UnreadablePolicy},
    select::OutOfRange,
};

#[derive(Debug, Parser)]
#[command(
    name = "zet",
    about = "Create, search and edit timestamped zettelkasten notes",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Override the note store root (defaults to $ZETDIR)
    #[arg(long, global = true)]
    pub zetdir: Option<PathBuf>,

    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new note directory and file, then open it in $EDITOR
    New(NewArgs),
    /// Display usage information
    Help,
    /// List notes whose title contains any of the search terms
    Search(SearchArgs),
    /// Search titles, open the selected note in $EDITOR, then commit and sync
    Edit(EditArgs),
    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsArgs),
}

// -- New --

#[derive(Debug, Parser)]
pub struct NewArgs {
    /// Words of the note title
    pub title: Vec<String>,
}

impl NewArgs {
    pub fn title(&self) -> String {
        self.title.join(" ")
    }
}

// -- Search --

#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Search terms; a note matches if its title contains any of them
    pub terms: Vec<String>,

    /// Part of the note to search
    #[arg(long = "in", value_enum, default_value_t = SearchMode::Title)]
    pub mode: SearchMode,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// What to do with notes that cannot be read
    #[arg(long, value_enum, default_value_t = UnreadablePolicy::Skip)]
    pub on_unreadable: UnreadablePolicy,
}

impl SearchArgs {
    pub fn params(&self) -> SearchParams {
        SearchParams {
            mode: self.mode,
            terms: SearchTerms::new(self.terms.iter().cloned()),
            on_unreadable: self.on_unreadable,
        }
    }
}

// -- Edit --

#[derive(Debug, Parser)]
pub struct EditArgs {
    /// Search terms; a note matches if its title contains any of them
    pub terms: Vec<String>,

    /// What to do when the selected number is not listed
    #[arg(long, value_enum, default_value_t = OutOfRange::Ignore)]
    pub out_of_range: OutOfRange,

    /// What to do with notes that cannot be read
    #[arg(long, value_enum, default_value_t = UnreadablePolicy::Skip)]
    pub on_unreadable: UnreadablePolicy,
}

impl EditArgs {
    pub fn params(&self) -> SearchParams {
        SearchParams {
            mode: SearchMode::Title,
            terms: SearchTerms::new(self.terms.iter().cloned()),
            on_unreadable: self.on_unreadable,
        }
    }
}

// -- Completions --

#[derive(Debug, Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Generate shell completions and print to stdout.
    pub fn generate(&self) {
        let mut cmd = Cli::command();
        clap_complete::generate(
            self.shell,
            &mut cmd,
            "zet",
            &mut std::io::stdout(),
        );
    }
}

/// Rewrite the single-dash `-in` flag to `--in`.
///
/// clap would otherwise read `-in` as the short flags `-i -n`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if arg.as_os_str() == "-in" {
                OsString::from("--in")
            } else {
                arg
            }
        })
        .collect()
}

/// Print the long usage text to stdout.
pub fn print_help() -> std::io::Result<()> {
    Cli::command().print_long_help()
}
