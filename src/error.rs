use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Config(String),

    #[error("cannot read directory {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read title of {}: {source}", path.display())]
    ReadTitle {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid selection {input}: expected an index below {len}")]
    InvalidSelection { input: i64, len: usize },

    #[error("{program} failed: {detail}")]
    Command { program: String, detail: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
