use crate::options::Stage;
use crate::validate::ValidationError;

/// Message reported when a stage declares both `include` and `exclude`.
pub const ERROR_INCLUDE_EXCLUDE: &str = "Include and exclude arrays cannot coexist. Specify only one";

/// Errors that can occur while filtering a document.
///
/// Every variant is fatal: no partially filtered document is ever returned.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum SieveError {
    /// A stage declares both an `include` and an `exclude` list.
    ///
    /// The message is fixed, the offending stage is available for diagnostics.
    #[display("Include and exclude arrays cannot coexist. Specify only one")]
    #[from(skip)]
    IncludeExcludeConflict {
        /// The stage with the conflicting configuration.
        stage: Stage,
    },

    /// A pattern is not written as `/body/flags`.
    #[display("Invalid pattern '{pattern}': expected '/body/flags'")]
    #[from(skip)]
    InvalidPattern {
        /// The pattern as written in the configuration.
        pattern: String,
    },

    /// A pattern uses a flag without an equivalent.
    #[display("Unsupported flag '{flag}' in pattern '{pattern}'")]
    #[from(skip)]
    UnsupportedFlag {
        /// The pattern as written in the configuration.
        pattern: String,
        /// The offending flag.
        flag: char,
    },

    /// The body of a pattern is not a valid regular expression.
    Regex(regex::Error),

    /// The filter configuration could not be read.
    #[display("Invalid filter configuration: {message}")]
    #[from(skip)]
    InvalidOptions {
        /// Description of the problem.
        message: String,
    },

    /// The source document failed validation.
    Validation(ValidationError),
}
