//! zet - a small zettelkasten tool for timestamped markdown notes.
//!
//! Notes live in `<root>/zets/<yyyymmddHHMMSS>/README.md`, with the first
//! line of each file acting as its title. The library walks that tree,
//! matches titles against search terms and exposes the hits as an indexed
//! [`ResultSet`] that the interactive edit flow selects from.
//!
//! # Quick start
//!
//! ```no_run
//! use zet::{Config, SearchTerms};
//! use zet::search::{self, SearchParams, SearchOutcome};
//!
//! let config = Config::resolve(None).unwrap();
//! let params = SearchParams {
//!     terms: SearchTerms::new(["rust"]),
//!     ..Default::default()
//! };
//!
//! let outcome = search::execute_search(&config.notes_dir(), &params).unwrap();
//! if let SearchOutcome::Results { results, .. } = outcome {
//!     for (i, entry) in results.iter().enumerate() {
//!         println!("[{i}] {} -> {}", entry.title, entry.path.display());
//!     }
//! }
//! ```

pub mod cli;
pub mod config;
pub mod edit;
pub mod editor;
pub mod error;
pub mod matcher;
pub mod note;
pub mod results;
pub mod search;
pub mod select;
pub mod sync;
pub mod title;
pub mod walker;

pub use config::Config;
pub use error::{Error, Result};
pub use matcher::SearchTerms;
pub use results::{ResultEntry, ResultSet};
pub use walker::NoteWalker;
