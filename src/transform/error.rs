//! Diagnostics: structured warnings (non-fatal, assembly continues with a
//! defensible default) and errors (fatal, short-circuit the call).

use serde::{Deserialize, Serialize};

use crate::tag::Tags;

/// Severity of a [`Diagnostic`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// A stable, structured description of something the pipeline noticed about
/// a tag set: either descriptive (ambiguous input, defaulted) or structural
/// (malformed input that makes assembly meaningless).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: Code,
    pub message: String,
    pub offending_keys: Tags,
}

/// Stable-across-versions diagnostic codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Code {
    // Errors
    UnknownHighwayClass,
    MalformedLaneCount,
    InconsistentOneway,
    UnitParseFailure,
    NegativeWidth,
    Unsupported,
    RoundTrip,
    // Warnings
    UnconsumedKnownTag,
    TagConflict,
    LaneCountMismatch,
    DeprecatedTagForm,
    AmbiguousDirection,
    UnknownValue,
    Unimplemented,
}

impl Diagnostic {
    #[must_use]
    pub fn warning(code: Code, message: impl Into<String>, offending_keys: Tags) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            offending_keys,
        }
    }

    #[must_use]
    pub fn error(code: Code, message: impl Into<String>, offending_keys: Tags) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            offending_keys,
        }
    }
}

/// An accumulating list of non-fatal [`Diagnostic`]s, returned alongside a
/// successful [`crate::road::Road`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RoadWarnings(Vec<Diagnostic>);

impl RoadWarnings {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        debug_assert_eq!(diagnostic.severity, Severity::Warning);
        self.0.push(diagnostic);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }
}

impl std::fmt::Display for RoadWarnings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines: Vec<String> = self
            .0
            .iter()
            .map(|d| format!("warning[{:?}]: {}", d.code, d.message))
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

/// A fatal error, carrying
/// the diagnostics accumulated up to the point of failure.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoadError {
    pub diagnostic: Diagnostic,
    pub partial_warnings: RoadWarnings,
}

impl RoadError {
    #[must_use]
    pub fn new(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostic,
            partial_warnings: RoadWarnings::default(),
        }
    }

    #[must_use]
    pub fn with_warnings(diagnostic: Diagnostic, partial_warnings: RoadWarnings) -> Self {
        Self {
            diagnostic,
            partial_warnings,
        }
    }

    #[must_use]
    pub fn unsupported(message: impl Into<String>, tags: Tags) -> Self {
        Self::new(Diagnostic::error(Code::Unsupported, message, tags))
    }

    /// Attach the warnings accumulated before this error was raised, so a
    /// caller sees every diagnostic noticed up to the point of failure, not
    /// just the one that was fatal.
    #[must_use]
    pub fn with_partial_warnings(mut self, partial: &RoadWarnings) -> Self {
        self.partial_warnings = partial.clone();
        self
    }
}

impl std::fmt::Display for RoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error[{:?}]: {}", self.diagnostic.code, self.diagnostic.message)
    }
}

impl std::error::Error for RoadError {}

/// Promote an accumulated warning list (e.g. under `error_on_warnings`) into
/// a fatal error carrying the first warning as the headline diagnostic.
impl From<RoadWarnings> for RoadError {
    fn from(warnings: RoadWarnings) -> Self {
        let diagnostic = warnings
            .0
            .first()
            .cloned()
            .unwrap_or_else(|| Diagnostic::error(Code::Unsupported, "warnings promoted to error", Tags::default()));
        Self::with_warnings(diagnostic, warnings)
    }
}
