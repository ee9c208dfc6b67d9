//! Build error types.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that stop a conversion run. None of them are retried.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("filesystem error at `{}`", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{file}` does not match <chapter>-<section>-<subsection>-<slug>.md")]
    Parse { file: String },
}

impl BuildError {
    /// Attach `path` to an I/O error, for use with `map_err`.
    pub fn fs(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Filesystem {
            path: path.to_path_buf(),
            source,
        }
    }
}
