//! Error handling shared by the widget crates

use serde::Deserialize;

pub type Result<T> = std::result::Result<T, AppError>;

/// FastAPI-style error body: `{"detail": "..."}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorDetail {
    /// Human readable detail. Validation errors come back as arrays; only
    /// plain strings are surfaced to the end user.
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Backend rejected request ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Backend { status: u16, detail: Option<String> },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Service unavailable: {service}")]
    ServiceUnavailable { service: String },

    #[error("External service error: {service} - {message}")]
    ExternalService { service: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Timeout error: {operation}")]
    Timeout { operation: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl AppError {
    pub fn backend(status: u16, detail: Option<String>) -> Self {
        Self::Backend { status, detail }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn service_unavailable(service: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            service: service.into(),
        }
    }

    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    /// Detail message supplied by the backend, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            AppError::Backend { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Backend { .. } => "BACKEND_REJECTED",
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::ServiceUnavailable { .. } => "SERVICE_UNAVAILABLE",
            AppError::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            AppError::Configuration { .. } => "CONFIG_ERROR",
            AppError::Timeout { .. } => "TIMEOUT",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Url(_) => "URL_ERROR",
        }
    }
}
