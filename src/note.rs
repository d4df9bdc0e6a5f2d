use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    config::{Config, NOTE_FILE_NAME},
    error::Result,
};

/// The two renderings of a note's creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteStamp {
    /// `yyyymmddHHMMSS`, used as the note directory name.
    pub id: String,
    /// `yyyy-mm-dd HH:MM:SS`, used in the index file.
    pub human: String,
}

impl NoteStamp {
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(time: DateTime<Utc>) -> Self {
        Self {
            id: time.format("%Y%m%d%H%M%S").to_string(),
            human: time.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Render the index line for a note.
pub fn index_line(stamp: &NoteStamp, title: &str, link_base: &str) -> String {
    format!(
        "* {} [{title}]({link_base}/{}/{NOTE_FILE_NAME})",
        stamp.human, stamp.id
    )
}

/// Append `line` to the index file, creating the file if needed.
pub fn append_index_line(index_file: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(index_file)?;
    writeln!(file, "{line}")?;
    Ok(())
}

/// Create `<notes dir>/<stamp>/README.md` with `title` as its heading and
/// record it in the index file. Returns the path of the new note file.
///
/// An existing note with the same stamp is never overwritten.
pub fn create_note(
    config: &Config,
    title: &str,
    stamp: &NoteStamp,
) -> Result<PathBuf> {
    let dir = config.notes_dir().join(&stamp.id);
    fs::create_dir_all(&dir)?;

    let path = dir.join(NOTE_FILE_NAME);
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)?;
    writeln!(file, "# {title}")?;

    append_index_line(
        &config.index_file(),
        &index_line(stamp, title, config.link_base()),
    )?;

    info!(path = %path.display(), "created note");
    Ok(path)
}
