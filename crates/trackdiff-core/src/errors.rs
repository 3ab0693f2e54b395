use thiserror::Error;

/// Result type alias using CompareError
pub type Result<T> = std::result::Result<T, CompareError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling,
/// log assertions and CLI exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Preconditions
    MissingDocument,
    InvalidDocument,

    // Run lifecycle
    Aborted,
    WorkerSpawn,

    // Integration/IO
    Io,
    Serialization,
    Config,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MissingDocument => "ERR_MISSING_DOCUMENT",
            ExErrorKind::InvalidDocument => "ERR_INVALID_DOCUMENT",
            ExErrorKind::Aborted => "ERR_ABORTED",
            ExErrorKind::WorkerSpawn => "ERR_WORKER_SPAWN",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Config => "ERR_CONFIG",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional context
/// (operation, document role, message, source).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    role: Option<DocumentRole>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            role: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the role of the document the error concerns
    pub fn with_role(mut self, role: DocumentRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the document role context, if any
    pub fn role(&self) -> Option<DocumentRole> {
        self.role
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(role) = self.role {
            write!(f, " (document: {})", role)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Which of the three documents of a comparison an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    Old,
    New,
    Dest,
}

impl std::fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DocumentRole::Old => "old",
            DocumentRole::New => "new",
            DocumentRole::Dest => "dest",
        })
    }
}

/// Error taxonomy for comparison operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    /// One of the three documents of a run was not supplied
    #[error("Missing {role} document")]
    MissingDocument { role: DocumentRole },

    /// The run observed its cancellation flag and unwound
    #[error("Comparison aborted")]
    Aborted,

    /// The worker thread could not be started
    #[error("Failed to spawn comparison worker: {message}")]
    WorkerSpawn { message: String },

    /// A loaded document violates the model invariants
    #[error("Invalid document: {reason}")]
    InvalidDocument { reason: String },

    /// JSON (de)serialization failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<CompareError> for ExError {
    fn from(err: CompareError) -> Self {
        match err {
            CompareError::MissingDocument { role } => ExError::new(ExErrorKind::MissingDocument)
                .with_role(role)
                .with_message(format!("{} document is required", role)),

            CompareError::Aborted => {
                ExError::new(ExErrorKind::Aborted).with_message("comparison was cancelled")
            }

            CompareError::WorkerSpawn { message } => {
                ExError::new(ExErrorKind::WorkerSpawn).with_message(message)
            }

            CompareError::InvalidDocument { reason } => {
                ExError::new(ExErrorKind::InvalidDocument).with_message(reason)
            }

            CompareError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for CompareError {
    fn from(err: serde_json::Error) -> Self {
        CompareError::Serialization {
            message: err.to_string(),
        }
    }
}
