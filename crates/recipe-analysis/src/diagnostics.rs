//! Diagnostic types for structural errors and warnings.
//!
//! Diagnostics point at recipe steps rather than text ranges; the editor
//! grid highlights whole rows, so a step index is the natural location.

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticSeverity {
    /// Error - the recipe cannot be released or timed.
    Error,
    /// Warning - suspicious but runnable.
    Warning,
}

/// A diagnostic code identifying the type of diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    // Structural errors (E001-E099)
    /// `END_FOR` without an open `FOR`.
    UnmatchedLoopEnd,
    /// `FOR` that is never closed.
    UnclosedLoop,
    /// Loop nesting exceeds the supported depth.
    NestingTooDeep,

    // Loop configuration errors (E101-E199)
    /// Iteration count of zero or less.
    IterationCountNotPositive,
    /// Iteration count too large for the controller's counter.
    IterationCountTooWide,

    // Warnings (W001-W099)
    /// Loop encloses no steps at all.
    EmptyLoopBody,
}

impl DiagnosticCode {
    /// Returns the string code (e.g., "E101").
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            // Structure
            Self::UnmatchedLoopEnd => "E001",
            Self::UnclosedLoop => "E002",
            Self::NestingTooDeep => "E003",
            // Loop configuration
            Self::IterationCountNotPositive => "E101",
            Self::IterationCountTooWide => "E102",
            // Warnings
            Self::EmptyLoopBody => "W001",
        }
    }

    /// Returns the default severity for this diagnostic code.
    #[must_use]
    pub fn severity(&self) -> DiagnosticSeverity {
        match self {
            Self::UnmatchedLoopEnd
            | Self::UnclosedLoop
            | Self::NestingTooDeep
            | Self::IterationCountNotPositive
            | Self::IterationCountTooWide => DiagnosticSeverity::Error,

            Self::EmptyLoopBody => DiagnosticSeverity::Warning,
        }
    }
}

/// Related information for a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    /// The step the related information points at.
    pub step: usize,
    /// The message.
    pub message: String,
}

/// A diagnostic message tied to one recipe step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The diagnostic code.
    pub code: DiagnosticCode,
    /// The severity level.
    pub severity: DiagnosticSeverity,
    /// The step the diagnostic applies to.
    pub step: usize,
    /// The diagnostic message.
    pub message: String,
    /// Related information (e.g., "enclosed by the FOR here").
    pub related: Vec<RelatedInfo>,
}

impl Diagnostic {
    /// Creates a new diagnostic with the code's default severity.
    pub fn new(code: DiagnosticCode, step: usize, message: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            step,
            message: message.into(),
            related: Vec::new(),
        }
    }

    /// Creates an error diagnostic.
    pub fn error(code: DiagnosticCode, step: usize, message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            code,
            step,
            message: message.into(),
            related: Vec::new(),
        }
    }

    /// Creates a warning diagnostic.
    pub fn warning(code: DiagnosticCode, step: usize, message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            code,
            step,
            message: message.into(),
            related: Vec::new(),
        }
    }

    /// Adds related information to the diagnostic.
    #[must_use]
    pub fn with_related(mut self, step: usize, message: impl Into<String>) -> Self {
        self.related.push(RelatedInfo {
            step,
            message: message.into(),
        });
        self
    }

    /// Returns true if this is an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
        };
        write!(
            f,
            "{severity}[{}]: {} (step {})",
            self.code.code(),
            self.message,
            self.step
        )
    }
}

/// Builder for collecting diagnostics.
#[derive(Debug, Default)]
pub struct DiagnosticBuilder {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBuilder {
    /// Creates a new diagnostic builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Adds an error.
    pub fn error(&mut self, code: DiagnosticCode, step: usize, message: impl Into<String>) {
        self.add(Diagnostic::error(code, step, message));
    }

    /// Adds a warning.
    pub fn warning(&mut self, code: DiagnosticCode, step: usize, message: impl Into<String>) {
        self.add(Diagnostic::warning(code, step, message));
    }

    /// Returns true if any errors have been recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Consumes the builder and returns the diagnostics.
    #[must_use]
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
