//! Error adapter for converting [`CliError`] to miette diagnostics.
//!
//! This module provides the bridge between the standard error types and
//! miette's rich diagnostic formatting. Datamodel syntax errors point at the
//! offending spot of the input; every other error is reported with a code
//! and, where one is useful, a help line.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};
use serde_json::error::Category;

use erd::ErdError;

use crate::{config::ConfigError, error::CliError};

/// Adapter implementing [`MietteDiagnostic`] for a [`CliError`].
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CliError::Io(_) => "erd::io",
            CliError::Config(_) => "erd::config",
            CliError::Input { .. } => "erd::input",
            CliError::Erd(ErdError::NotFound { .. }) => "erd::not_found",
            CliError::Erd(ErdError::Layering(_)) => "erd::layering",
            CliError::Erd(ErdError::Style(_)) => "erd::style",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            CliError::Erd(ErdError::NotFound { .. }) => {
                "every relation must point at a model or type of the datamodel"
            }
            CliError::Config(ConfigError::MissingFile(_)) => {
                "omit --config to fall back to the default configuration"
            }
            CliError::Input { .. } => {
                "expected {\"models\": [...], \"types\": [...]} or a document with a \"datamodel\" key"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self.0 {
            CliError::Input { src, .. } => Some(src as &dyn miette::SourceCode),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let CliError::Input { err, src } = self.0 else {
            return None;
        };

        let span = json_error_span(src, err.line(), err.column());
        let label = LabeledSpan::new_primary_with_span(Some(category_label(err).to_string()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Short label text for the kind of JSON error.
fn category_label(err: &serde_json::Error) -> &'static str {
    match err.classify() {
        Category::Syntax => "invalid JSON here",
        Category::Eof => "input ends here",
        Category::Data => "unexpected value here",
        Category::Io => "read error here",
    }
}

/// Converts a 1-based line/column position into a one-character span.
///
/// serde_json reports line 0 for errors that carry no position (data errors
/// raised after parsing); those point at the start of the input.
fn json_error_span(src: &str, line: usize, column: usize) -> SourceSpan {
    if line == 0 {
        return SourceSpan::new(0.into(), 0);
    }

    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let offset = (line_start + column.saturating_sub(1)).min(src.len());
    let len = usize::from(offset < src.len());

    SourceSpan::new(offset.into(), len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_datamodel;

    #[test]
    fn test_syntax_error_is_labeled() {
        let src = "{\"models\": [\n  {\"name\": }\n]}";
        let err = parse_datamodel(src).unwrap_err();
        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "erd::input");
        assert!(adapter.source_code().is_some());

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        assert_eq!(labels[0].label(), Some("invalid JSON here"));
        let second_line = src.find('\n').unwrap() + 1..src.rfind('\n').unwrap();
        assert!(second_line.contains(&labels[0].offset()));
    }

    #[test]
    fn test_truncated_input_points_at_end() {
        let src = "{\"models\": [";
        let err = parse_datamodel(src).unwrap_err();
        let adapter = ErrorAdapter(&err);

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels[0].label(), Some("input ends here"));
        assert!(labels[0].offset() <= src.len());
    }

    #[test]
    fn test_library_errors_have_codes() {
        let err = CliError::from(ErdError::NotFound {
            model: "User".to_string(),
        });
        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.to_string(), "unable to find model `User`");
        assert_eq!(adapter.code().unwrap().to_string(), "erd::not_found");
        assert!(adapter.help().is_some());
        assert!(adapter.labels().is_none());
        assert!(adapter.source_code().is_none());
    }

    #[test]
    fn test_span_of_first_column() {
        let span = json_error_span("ab\ncd", 2, 1);
        assert_eq!(span.offset(), 3);
        assert_eq!(span.len(), 1);
    }

    #[test]
    fn test_span_without_position() {
        let span = json_error_span("{}", 0, 0);
        assert_eq!(span.offset(), 0);
        assert_eq!(span.len(), 0);
    }
}
