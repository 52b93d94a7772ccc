//! Delimiter-wrapped regular expressions: `/body/flags`.

use regex::{Regex, RegexBuilder};

use crate::SieveError;

/// A compiled `/body/flags` pattern.
///
/// The body sits between the first and the last `/`, the flags follow the last `/`.
/// Matching searches anywhere in the text; anchor with `^`/`$` when needed.
///
/// Supported flags:
/// - `i`: case-insensitive
/// - `m`: `^` and `$` match at line boundaries
/// - `s`: `.` matches newlines
/// - `u`, `v`: accepted, Unicode matching is always on
/// - `g`, `y`, `d`: accepted, without effect on a single match test
///
/// The body is compiled by the [`regex`] crate, whose dialect differs from
/// ECMAScript regular expressions:
/// - `\d`, `\w`, `\s` and `\b` are Unicode-aware whatever the flags, so
///   `\d` also matches non-ASCII digits; write `[0-9]` or `(?-u:\d)` for ASCII
/// - look-around (`(?=`, `(?!`, `(?<=`, `(?<!`) and backreferences are not
///   supported and fail with [`SieveError::Regex`]
/// - inline flags such as `(?i)` are supported
///
/// # Example
///
/// ```rust
/// use specsieve_core::Pattern;
///
/// let pattern = Pattern::parse("/^pet$/i")?;
/// assert!(pattern.is_match("Pet"));
/// assert!(!pattern.is_match("pets"));
/// # Ok::<(), specsieve_core::SieveError>(())
/// ```
#[derive(Debug, Clone, derive_more::Display)]
#[display("{source}")]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Parses and compiles a `/body/flags` pattern.
    ///
    /// # Errors
    ///
    /// - [`SieveError::InvalidPattern`] if the text has fewer than two `/`
    /// - [`SieveError::UnsupportedFlag`] for an unknown flag
    /// - [`SieveError::Regex`] if the body is not a valid regular expression
    pub fn parse(source: &str) -> Result<Self, SieveError> {
        let invalid = || SieveError::InvalidPattern {
            pattern: source.to_string(),
        };
        let start = source.find('/').ok_or_else(invalid)?;
        let end = source.rfind('/').filter(|end| *end > start).ok_or_else(invalid)?;
        let body = source.get(start + 1..end).ok_or_else(invalid)?;
        let flags = source.get(end + 1..).ok_or_else(invalid)?;

        let mut builder = RegexBuilder::new(body);
        for flag in flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'u' | 'v' | 'g' | 'y' | 'd' => &mut builder,
                _ => {
                    return Err(SieveError::UnsupportedFlag {
                        pattern: source.to_string(),
                        flag,
                    });
                }
            };
        }
        let regex = builder.build()?;

        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// Returns `true` if the pattern matches somewhere in `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The pattern as it was written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}
