/// Errors raised by the index itself. I/O around the index uses `anyhow`.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum IndexError {
    /// Table size or load factor threshold cannot produce a working table.
    #[error("invalid index configuration: {0}")]
    InvalidConfig(String),
}
