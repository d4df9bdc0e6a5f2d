use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use tracing::trace;

use crate::{
    config::{METADATA_DIR_NAME, NOTE_FILE_NAME},
    error::{Error, Result},
};

/// A note file discovered under the walk root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Path relative to the walk root.
    pub relative_path: PathBuf,
    /// The walk root joined with `relative_path`.
    pub absolute_path: PathBuf,
}

impl Candidate {
    /// Name of the directory directly below the root that contains this
    /// candidate. For notes this is the timestamp identifier.
    pub fn top_level_dir(&self) -> Option<&str> {
        let mut components = self.relative_path.components();
        let first = components.next()?;
        // A single component means the file sits directly in the root.
        components.next()?;
        first.as_os_str().to_str()
    }
}

enum Pending {
    Dir(PathBuf),
    File(PathBuf),
    Failed(Error),
}

/// Lazy, depth-first walk over the note files below a root directory.
///
/// Entries of every directory are visited in byte-wise lexicographic order,
/// so the sequence is stable for a fixed filesystem state. Directories named
/// [`METADATA_DIR_NAME`] are pruned with their whole subtree, symlinked
/// directories are never followed and only files named [`NOTE_FILE_NAME`]
/// are yielded.
///
/// Unreadable subdirectories and entries are yielded as `Err` items; the
/// walk continues past them if the caller keeps iterating.
pub struct NoteWalker {
    root: PathBuf,
    stack: Vec<Pending>,
}

impl NoteWalker {
    /// Open `root` for walking. Fails if the root itself cannot be read.
    pub fn new(root: &Path) -> Result<Self> {
        let mut walker = Self {
            root: root.to_path_buf(),
            stack: Vec::new(),
        };
        let children = walker.read_children(Path::new(""))?;
        walker.stack.extend(children);
        Ok(walker)
    }

    /// Read the children of `relative_dir`, ordered so that popping from
    /// the stack yields them in ascending name order.
    fn read_children(&self, relative_dir: &Path) -> Result<Vec<Pending>> {
        let dir = if relative_dir.as_os_str().is_empty() {
            self.root.clone()
        } else {
            self.root.join(relative_dir)
        };
        let entries = fs::read_dir(&dir).map_err(|source| Error::Walk {
            path: dir.clone(),
            source,
        })?;

        let mut named: Vec<(OsString, Pending)> = Vec::new();
        let mut failed: Vec<Pending> = Vec::new();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    failed.push(Pending::Failed(Error::Walk {
                        path: dir.clone(),
                        source,
                    }));
                    continue;
                }
            };

            let name = entry.file_name();
            let relative = relative_dir.join(&name);
            let file_type = match entry.file_type() {
                Ok(ft) => ft,
                Err(source) => {
                    failed.push(Pending::Failed(Error::Walk {
                        path: entry.path(),
                        source,
                    }));
                    continue;
                }
            };

            if file_type.is_dir() {
                if name == METADATA_DIR_NAME {
                    trace!(path = %relative.display(), "pruning metadata directory");
                    continue;
                }
                named.push((name, Pending::Dir(relative)));
            } else if (file_type.is_file() || file_type.is_symlink())
                && name == NOTE_FILE_NAME
            {
                named.push((name, Pending::File(relative)));
            }
        }

        // Descending so the smallest name ends up on top of the stack.
        named.sort_by(|a, b| b.0.cmp(&a.0));

        let mut ordered: Vec<Pending> =
            named.into_iter().map(|(_, pending)| pending).collect();
        ordered.extend(failed);
        Ok(ordered)
    }
}

impl Iterator for NoteWalker {
    type Item = Result<Candidate>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(pending) = self.stack.pop() {
            match pending {
                Pending::Failed(err) => return Some(Err(err)),
                Pending::File(relative_path) => {
                    let absolute_path = self.root.join(&relative_path);
                    return Some(Ok(Candidate {
                        relative_path,
                        absolute_path,
                    }));
                }
                Pending::Dir(relative_dir) => {
                    match self.read_children(&relative_dir) {
                        Ok(children) => self.stack.extend(children),
                        Err(err) => return Some(Err(err)),
                    }
                }
            }
        }
        None
    }
}
