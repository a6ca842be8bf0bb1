use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("no data section found (missing '{sentinel}' header row)")]
    MissingHeader { sentinel: &'static str },
}

pub type Result<T> = std::result::Result<T, ReadError>;
