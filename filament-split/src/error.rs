//! Error types for resource splitting

use std::path::PathBuf;
use thiserror::Error;

/// Failures while locating a method body in PHP source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// More than one declaration of the method exists
    #[error("method `{method}` is declared {count} times (lines {lines:?})")]
    Ambiguous {
        /// Method name searched for
        method: String,
        /// Number of declarations found
        count: usize,
        /// 1-based line of each declaration
        lines: Vec<usize>,
    },

    /// The body braces never balance
    #[error("method `{method}` declared on line {line} has an unterminated body")]
    Unterminated {
        /// Method name searched for
        method: String,
        /// 1-based line of the declaration
        line: usize,
    },

    /// The declaration has no body (abstract or interface method)
    #[error("method `{method}` declared on line {line} has no body")]
    MissingBody {
        /// Method name searched for
        method: String,
        /// 1-based line of the declaration
        line: usize,
    },
}

/// Resource splitting error type
#[derive(Debug, Error)]
pub enum SplitError {
    /// Resource name is not a usable identifier
    #[error("invalid resource name '{0}': expected an identifier such as `Employee`")]
    InvalidResourceName(String),

    /// A field group name is not a usable class name
    #[error("invalid field group name '{0}': expected an identifier such as `PersonalFields`")]
    InvalidFieldGroup(String),

    /// The same field group was given twice
    #[error("field group '{0}' is listed more than once")]
    DuplicateFieldGroup(String),

    /// A field group is a PHP reserved word
    #[error("field group '{0}' is a reserved word in PHP")]
    ReservedFieldGroup(String),

    /// A field group would collide with a class name already in scope
    #[error("field group '{group}' clashes with `{name}`, which the form schema already uses")]
    FieldGroupConflict {
        /// Group name as given
        group: String,
        /// Class or alias it collides with
        name: String,
    },

    /// The field group list had no usable entries
    #[error("at least one field group must be specified")]
    NoFieldGroups,

    /// Generator could not be started
    #[error("failed to run generator `{command}`: {source}")]
    GeneratorSpawn {
        /// Rendered command line
        command: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Generator exited with a non-zero status
    #[error("generator `{command}` failed ({})", describe_exit(*.code))]
    GeneratorFailed {
        /// Rendered command line
        command: String,
        /// Exit code, if the process exited normally
        code: Option<i32>,
    },

    /// The generated resource file is absent
    #[error("resource file not found: {0}")]
    ResourceNotFound(PathBuf),

    /// Method scan failed
    #[error("cannot extract from {path}: {source}")]
    Scan {
        /// File being scanned
        path: PathBuf,
        /// Scanner failure
        #[source]
        source: ScanError,
    },

    /// Method missing while strict extraction is enabled
    #[error("method `{method}` not found in {path} (strict extraction is enabled)")]
    MethodNotFound {
        /// Method name searched for
        method: String,
        /// File being scanned
        path: PathBuf,
    },

    /// Template rendering error
    #[error("failed to render template `{name}`: {source}")]
    Template {
        /// Template name
        name: String,
        /// Underlying renderer error
        #[source]
        source: minijinja::Error,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

fn describe_exit(code: Option<i32>) -> String {
    code.map_or_else(|| "terminated by signal".to_string(), |c| format!("exit status {c}"))
}

impl SplitError {
    /// Wrap an I/O error with the path it occurred on
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for resource splitting
pub type Result<T> = std::result::Result<T, SplitError>;
