//! Error conversion helpers with path context
//!
//! Layout files are read, parsed and written in several places; these
//! extension traits keep the file name attached to whatever went wrong.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Attach path context to an `io::Result`.
pub trait IoResultExt<T> {
    /// # Example
    /// ```ignore
    /// fs.read_to_string(&path)
    ///     .with_path_context("read layout", &path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }
}

/// Turn a JSON decoding failure into a parse error naming the document.
///
/// The serde_json message already ends with the line and column.
pub trait JsonResultExt<T> {
    fn parsed_from(self, path: &Path) -> ApplicationResult<T>;
}

impl<T> JsonResultExt<T> for serde_json::Result<T> {
    fn parsed_from(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_bad_json_when_converting_then_parse_error_names_file() {
        let result: serde_json::Result<serde_json::Value> = serde_json::from_str("{\n  oops");
        let err = result.parsed_from(Path::new("board.json")).unwrap_err();
        assert!(matches!(err, ApplicationError::Parse { .. }));
        let msg = err.to_string();
        assert!(msg.starts_with("cannot parse board.json: "));
        assert!(msg.contains("at line 2 column "));
        assert_eq!(msg.matches("line").count(), 1);
    }
}
