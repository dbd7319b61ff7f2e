// ABOUTME: Structural validation errors for generation requests and catalog snapshots
// ABOUTME: Raised before any random draw; convertible into AppError for HTTP responses
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! # Validation Error Types
//!
//! Only structurally invalid input is rejected. Out-of-range numbers are clamped by the
//! normalizer and never produce one of these errors.

use std::error::Error;
use std::fmt;

/// Structural problems with caller input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The focus/archetype is not one of the supported values
    UnknownFocus {
        /// Value supplied by the caller
        value: String,
    },
    /// A numeric field was NaN or infinite
    NonFiniteField {
        /// Name of the offending field
        field: &'static str,
    },
    /// A required field was absent or blank
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },
    /// A movement catalog snapshot could not be accepted
    MalformedCatalog {
        /// What is wrong with the snapshot
        reason: String,
    },
}

impl ValidationError {
    /// Create an "unknown focus" error
    #[must_use]
    pub fn unknown_focus(value: impl Into<String>) -> Self {
        Self::UnknownFocus {
            value: value.into(),
        }
    }

    /// Create a "non-finite field" error
    #[must_use]
    pub const fn non_finite(field: &'static str) -> Self {
        Self::NonFiniteField { field }
    }

    /// Create a "malformed catalog" error
    #[must_use]
    pub fn malformed_catalog(reason: impl Into<String>) -> Self {
        Self::MalformedCatalog {
            reason: reason.into(),
        }
    }

    /// Name of the input field the error refers to
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::UnknownFocus { .. } => "focus",
            Self::NonFiniteField { field } | Self::MissingField { field } => field,
            Self::MalformedCatalog { .. } => "catalog",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFocus { value } => write!(
                f,
                "Unknown focus '{value}' (expected strength, conditioning, mixed or endurance)"
            ),
            Self::NonFiniteField { field } => {
                write!(f, "Field '{field}' must be a finite number")
            }
            Self::MissingField { field } => write!(f, "Field '{field}' is required"),
            Self::MalformedCatalog { reason } => {
                write!(f, "Movement catalog is malformed: {reason}")
            }
        }
    }
}

impl Error for ValidationError {}
