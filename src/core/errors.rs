use std::time::Duration;

/// Coarse error classification for retry and routing logic.
///
/// Use [`LmError::class`] to get this. `Temporary` errors are generally retryable;
/// `BadResponse` suggests a prompt-engineering problem; `Internal` means a code bug.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorClass {
    /// The request itself was malformed.
    BadRequest,
    /// Transient failure (network, rate limit, timeout, server 5xx) — retry may help.
    Temporary,
    /// The LM responded, but the output couldn't be used — prompt-engineering problem.
    BadResponse,
    /// A bug in the calling code or an unexpected provider response.
    Internal,
}

/// The LM provider failed before returning a usable response.
///
/// All variants except [`Provider`](LmError::Provider) are retryable.
/// Use [`is_retryable`](LmError::is_retryable) for retry logic.
#[derive(Debug, thiserror::Error)]
pub enum LmError {
    /// Could not reach the provider endpoint (DNS, connection refused, etc.).
    #[error("could not reach {endpoint}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The provider returned a rate limit response (HTTP 429).
    #[error("rate limited by provider")]
    RateLimit { retry_after: Option<Duration> },

    /// The provider returned an unexpected HTTP status.
    #[error("invalid response from provider: HTTP {status}")]
    InvalidResponse { status: u16, body: String },

    /// The request exceeded the configured timeout.
    #[error("request timed out after {after:?}")]
    Timeout { after: Duration },

    /// A provider-specific error that doesn't fit the other categories.
    #[error("provider error from {provider}: {message}")]
    Provider { provider: String, message: String },
}

impl LmError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Network { .. } => ErrorClass::Temporary,
            Self::RateLimit { .. } => ErrorClass::Temporary,
            Self::InvalidResponse { status, .. } if *status >= 500 => ErrorClass::Temporary,
            Self::InvalidResponse { .. } => ErrorClass::BadRequest,
            Self::Timeout { .. } => ErrorClass::Temporary,
            Self::Provider { .. } => ErrorClass::Internal,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::RateLimit { .. } => true,
            Self::Timeout { .. } => true,
            Self::InvalidResponse { status, .. } => *status >= 500,
            Self::Provider { .. } => false,
        }
    }
}

/// The grader responded, but no verdict could be extracted from its text.
#[derive(Debug, thiserror::Error)]
pub enum VerdictError {
    /// No line or token matching the expected verdict format was found.
    #[error("no `{expected}` verdict found in grader response")]
    Missing { expected: &'static str },
}

/// Failure from a single grading-strategy invocation.
///
/// A grade can fail at three stages:
///
/// 1. **[`Lm`](GradeError::Lm)** — couldn't reach the LM or it errored. Generally retryable.
/// 2. **[`Verdict`](GradeError::Verdict)** — the LM responded, but no verdict could be
///    parsed out of its text. Includes the raw response for debugging.
/// 3. **[`Trace`](GradeError::Trace)** — a start/end/error trace event could not be
///    recorded against the eval service.
#[derive(Debug, thiserror::Error)]
pub enum GradeError {
    /// The LM provider failed before returning a response.
    #[error("LLM call failed")]
    Lm {
        #[source]
        source: LmError,
    },

    /// The LM responded, but the verdict couldn't be parsed out of its text.
    ///
    /// `raw_response` contains the full grader output for debugging.
    #[error("failed to parse grader verdict")]
    Verdict {
        #[source]
        source: VerdictError,
        raw_response: String,
    },

    /// A trace event for this invocation could not be recorded.
    #[error("failed to record trace event")]
    Trace {
        #[source]
        source: ClientError,
    },
}

impl GradeError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Lm { source } => source.class(),
            Self::Verdict { .. } => ErrorClass::BadResponse,
            Self::Trace { .. } => ErrorClass::Temporary,
        }
    }
}

/// Failure talking to the remote dataset/run/feedback service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Could not reach the service endpoint.
    #[error("could not reach {endpoint}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service returned an unexpected HTTP status.
    #[error("service returned HTTP {status}")]
    Status { status: u16, body: String },

    /// The service responded, but the body couldn't be decoded.
    #[error("could not decode service response")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    /// The named dataset does not exist on the service.
    #[error("dataset `{name}` not found")]
    DatasetNotFound { name: String },

    /// A referenced run does not exist on the service.
    #[error("run `{id}` not found")]
    RunNotFound { id: uuid::Uuid },

    /// A required environment variable is missing.
    #[error("environment variable `{name}` is not set")]
    MissingEnv { name: String },
}

/// The evaluator-selection parameters don't name a loadable grading strategy.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// `labeled_criteria` was requested without naming a criterion.
    #[error("labeled_criteria requires a criteria name")]
    MissingCriteria,

    /// The named criterion has no builtin description.
    #[error("unknown criterion `{name}`")]
    UnknownCriterion { name: String },
}

/// Failure from the dataset-level check routine.
///
/// `InsufficientFeedback` is the harness's own invariant: a fully successful run
/// must produce exactly one scored feedback entry per benchmark example. It is not
/// recoverable; the owning scenario fails outright.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// Fewer (or more) scored feedback entries than benchmark examples were recorded.
    #[error("expected {want} scored `{key}` feedback entries, got {got}")]
    InsufficientFeedback {
        key: &'static str,
        want: usize,
        got: usize,
    },

    #[error("failed to load evaluator")]
    Load {
        #[from]
        source: LoadError,
    },

    #[error(transparent)]
    Client(#[from] ClientError),
}
