//! Error conversion helpers for reading input files

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Attach the offending path to an `io::Result`.
///
/// ```ignore
/// let text = std::fs::read_to_string(path).with_path(path)?;
/// ```
pub trait IoResultExt<T> {
    fn with_path(self, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::Read {
            path: path.to_path_buf(),
            source,
        })
    }
}
