use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Name of the single content file inside every note directory.
pub const NOTE_FILE_NAME: &str = "README.md";

/// Directory (relative to the root) holding one subdirectory per note.
pub const NOTES_DIR_NAME: &str = "zets";

/// Version-control metadata directory, pruned from every walk.
pub const METADATA_DIR_NAME: &str = ".git";

const DEFAULT_LINK_BASE: &str = "zets";

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    editor: Option<String>,
    link_base: String,
}

impl Config {
    /// Resolve the configuration from the process environment.
    ///
    /// The note store root comes from, in order of priority:
    /// 1. An explicit path (from --zetdir)
    /// 2. The ZETDIR environment variable
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        Self::from_lookup(explicit, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::resolve`] but reads variables through `lookup`.
    pub fn from_lookup<F>(explicit: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let root = match explicit {
            Some(path) => path.to_path_buf(),
            None => non_empty("ZETDIR").map(PathBuf::from).ok_or_else(|| {
                Error::Config(
                    "configure ZETDIR environment variable and try again"
                        .into(),
                )
            })?,
        };

        if !root.is_dir() {
            return Err(Error::Config(format!(
                "note store root is not a readable directory: {}",
                root.display()
            )));
        }

        let link_base = non_empty("ZET_LINK_BASE")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_LINK_BASE.to_string());

        Ok(Self {
            root,
            editor: non_empty("EDITOR"),
            link_base,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The editor program, required by commands that open notes.
    pub fn editor(&self) -> Result<&str> {
        self.editor.as_deref().ok_or_else(|| {
            Error::Config(
                "configure EDITOR environment variable and try again".into(),
            )
        })
    }

    pub fn link_base(&self) -> &str {
        &self.link_base
    }

    pub fn notes_dir(&self) -> PathBuf {
        self.root.join(NOTES_DIR_NAME)
    }

    pub fn index_file(&self) -> PathBuf {
        self.root.join(NOTE_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(
        vars: &[(&str, &str)],
    ) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn resolve_from_zetdir() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_string_lossy().to_string();
        let config = Config::from_lookup(
            None,
            lookup_from(&[("ZETDIR", root.as_str()), ("EDITOR", "vi")]),
        )
        .unwrap();

        assert_eq!(config.root(), tmp.path());
        assert_eq!(config.editor().unwrap(), "vi");
        assert_eq!(config.notes_dir(), tmp.path().join("zets"));
        assert_eq!(config.index_file(), tmp.path().join("README.md"));
        assert_eq!(config.link_base(), "zets");
    }

    #[test]
    fn explicit_path_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::from_lookup(
            Some(tmp.path()),
            lookup_from(&[("ZETDIR", "/definitely/not/here")]),
        )
        .unwrap();

        assert_eq!(config.root(), tmp.path());
    }

    #[test]
    fn missing_zetdir_is_config_error() {
        let err = Config::from_lookup(None, lookup_from(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("ZETDIR"));
    }

    #[test]
    fn empty_zetdir_counts_as_missing() {
        let err = Config::from_lookup(None, lookup_from(&[("ZETDIR", "")]))
            .unwrap_err();
        assert!(err.to_string().contains("ZETDIR"));
    }

    #[test]
    fn nonexistent_root_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        let err =
            Config::from_lookup(Some(missing.as_path()), lookup_from(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn editor_is_only_required_on_demand() {
        let tmp = tempfile::tempdir().unwrap();
        let config =
            Config::from_lookup(Some(tmp.path()), lookup_from(&[])).unwrap();
        let err = config.editor().unwrap_err();
        assert!(err.to_string().contains("EDITOR"));
    }

    #[test]
    fn link_base_trailing_slash_is_trimmed() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::from_lookup(
            Some(tmp.path()),
            lookup_from(&[(
                "ZET_LINK_BASE",
                "https://example.com/zet/tree/main/zets/",
            )]),
        )
        .unwrap();
        assert_eq!(
            config.link_base(),
            "https://example.com/zet/tree/main/zets"
        );
    }
}
