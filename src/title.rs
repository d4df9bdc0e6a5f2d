use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::error::{Error, Result};

/// Characters stripped from both ends of a title for display.
pub const TITLE_MARKERS: &[char] = &['#', ' '];

/// Read the first line of the file at `path`, without its line terminator.
///
/// Invalid UTF-8 is replaced rather than rejected. An empty file yields an
/// empty title.
pub fn read_title(path: &Path) -> Result<String> {
    let read_err = |source| Error::ReadTitle {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_err)?;
    let mut reader = BufReader::new(file);
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line).map_err(read_err)?;

    if line.ends_with(b"\n") {
        line.pop();
        if line.ends_with(b"\r") {
            line.pop();
        }
    }

    Ok(String::from_utf8_lossy(&line).into_owned())
}

/// Strip heading markers and padding from a raw title.
pub fn display_title(raw: &str) -> &str {
    raw.trim_matches(TITLE_MARKERS)
}
