// ABOUTME: Unified error handling with stable error codes for the insight engine
// ABOUTME: Defines AppError, ErrorCode, and the AppResult alias used crate-wide
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vital Insight

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Input failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// Durable or local storage operation failed
    #[serde(rename = "STORAGE_ERROR")]
    StorageError,
    /// Document encode/decode failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError,
    /// Remote operation exceeded its deadline
    #[serde(rename = "TIMEOUT")]
    Timeout,
    /// Stored document schema is newer than this build supports
    #[serde(rename = "SCHEMA_UNSUPPORTED")]
    SchemaUnsupported,
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
            Self::Timeout => "The operation timed out",
            Self::SchemaUnsupported => "Stored document schema version is not supported",
            Self::InternalError => "An internal error occurred",
        }
    }
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new error with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Storage failure
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Serialization failure
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Deadline exceeded
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Timeout, message)
    }

    /// Unsupported stored schema version
    #[must_use]
    pub fn schema_unsupported(found: u32, supported: u32) -> Self {
        Self::new(
            ErrorCode::SchemaUnsupported,
            format!("stored schema version {found} exceeds supported version {supported}"),
        )
    }

    /// Internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
