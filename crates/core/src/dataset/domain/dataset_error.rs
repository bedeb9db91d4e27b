use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("failed to list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("entry name is not valid UTF-8: {0:?}")]
    InvalidName(OsString),
}
