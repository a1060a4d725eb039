use thiserror::Error;

/// Result type alias using VisitError
pub type Result<T> = std::result::Result<T, VisitError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced by the store falls into one of these kinds. Each
/// kind maps to a stable error code usable by front ends and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Missing required field, invalid enum literal, out-of-range month.
    /// Always correctable by the caller.
    ValidationFailed,

    /// Path unwritable, underlying I/O error, lock contention
    StorageUnavailable,

    /// Stored data that no longer decodes against the schema
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::ValidationFailed => "ERR_VALIDATION_FAILED",
            ExErrorKind::StorageUnavailable => "ERR_STORAGE_UNAVAILABLE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus enough context (operation, column,
/// serial number) for a front end to build a precise message.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    field: Option<String>,
    sr_no: Option<i64>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            field: None,
            sr_no: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add column context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add serial number context
    pub fn with_sr_no(mut self, sr_no: i64) -> Self {
        self.sr_no = Some(sr_no);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
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

    /// Get the column context, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Get the serial number context, if any
    pub fn sr_no(&self) -> Option<i64> {
        self.sr_no
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_validation(&self) -> bool {
        self.kind == ExErrorKind::ValidationFailed
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
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        if let Some(sr_no) = self.sr_no {
            write!(f, " (sr_no: {})", sr_no)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Precise validation failures raised at the application boundary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VisitError {
    /// A required column was absent or null
    #[error("Missing required field: {field}")]
    MissingRequiredField { field: String },

    /// A required text column was present but blank
    #[error("Required field {field} cannot be empty")]
    EmptyRequiredField { field: String },

    /// An enum-constrained column received a literal outside its allowed set
    #[error("Invalid value '{value}' for {field}: must be one of {}", .allowed.join(", "))]
    InvalidEnumValue {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    /// A value of the wrong shape for its column (e.g. text for an integer)
    #[error("Invalid value for {field}: expected {expected}, got '{value}'")]
    InvalidFieldType {
        field: String,
        expected: String,
        value: String,
    },

    /// A machine count below zero
    #[error("Count {field} cannot be negative: {value}")]
    NegativeCount { field: String, value: i64 },

    /// A date that does not parse as YYYY-MM-DD or is out of range
    #[error("Invalid date for {field}: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { field: String, value: String },

    /// A month number outside 1..=12
    #[error("Month must be between 1 and 12, got {month}")]
    MonthOutOfRange { month: u32 },
}

impl VisitError {
    /// The column this failure refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            VisitError::MissingRequiredField { field }
            | VisitError::EmptyRequiredField { field }
            | VisitError::InvalidEnumValue { field, .. }
            | VisitError::InvalidFieldType { field, .. }
            | VisitError::NegativeCount { field, .. }
            | VisitError::InvalidDate { field, .. } => Some(field),
            VisitError::MonthOutOfRange { .. } => None,
        }
    }
}

impl From<VisitError> for ExError {
    fn from(err: VisitError) -> Self {
        let mut ex = ExError::new(ExErrorKind::ValidationFailed).with_message(err.to_string());
        if let Some(field) = err.field() {
            ex = ex.with_field(field);
        }
        ex
    }
}
