//! # App Error Type
//!
//! Unified error type for session commands and startup.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in shop-cli                               │
//! │                                                                         │
//! │  Shell line "add 1 ten 1 Mug"                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  AppResult<T>                                                    │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad input? ──── ValidationError ──────────┐                     │  │
//! │  │         │                                  ▼                     │  │
//! │  │  Empty checkout? ─── AppError::EmptyCart ── AppError ──► shell  │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────► shell  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The shell prints "[CODE] message" and keeps reading.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart mutations themselves never fail: only input that can't become a
//! valid line item, configuration problems, and checkout of an empty cart
//! surface here.

use serde::Serialize;
use shop_core::ValidationError;
use thiserror::Error;

/// Result type alias for app operations.
pub type AppResult<T> = Result<T, AppError>;

/// Errors surfaced to the shell (or any other front end).
#[derive(Debug, Error)]
pub enum AppError {
    // =========================================================================
    // Input Errors
    // =========================================================================
    /// Line item data failed validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Shell line didn't match any command.
    #[error("Unknown command: '{0}'. Type 'help' for a list of commands")]
    UnknownCommand(String),

    /// Command matched but its arguments didn't.
    #[error("Usage: {0}")]
    Usage(&'static str),

    // =========================================================================
    // Checkout Errors
    // =========================================================================
    /// Checkout was requested with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoad(#[from] toml::de::Error),

    // =========================================================================
    // I/O Errors
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Machine-readable error codes.
///
/// ## Usage in a Front End
/// ```typescript
/// switch (e.code) {
///   case 'EMPTY_CART':
///     showEmptyCart();
///     break;
///   case 'VALIDATION_ERROR':
///     showForm(e.message);
///     break;
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Shell input wasn't understood
    BadCommand,

    /// Checkout refused
    EmptyCart,

    /// Configuration couldn't be loaded
    ConfigError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// The code as it appears on the wire, e.g. `EMPTY_CART`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::BadCommand => "BAD_COMMAND",
            ErrorCode::EmptyCart => "EMPTY_CART",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl AppError {
    /// Returns the machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::UnknownCommand(_) | AppError::Usage(_) => ErrorCode::BadCommand,
            AppError::EmptyCart => ErrorCode::EmptyCart,
            AppError::InvalidConfig(_) | AppError::ConfigLoad(_) => ErrorCode::ConfigError,
            AppError::Io(_) | AppError::Json(_) => ErrorCode::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_converts_to_app_error() {
        let app_err: AppError = ValidationError::EmptyName.into();
        assert_eq!(app_err.code(), ErrorCode::ValidationError);
        assert_eq!(app_err.to_string(), "item name is required");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::EmptyCart.code(), ErrorCode::EmptyCart);
        assert_eq!(AppError::Usage("rm <id>").code(), ErrorCode::BadCommand);
        assert_eq!(
            AppError::InvalidConfig("x".into()).code(),
            ErrorCode::ConfigError
        );
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::EmptyCart).unwrap();
        assert_eq!(json, "\"EMPTY_CART\"");
        assert_eq!(ErrorCode::EmptyCart.as_str(), "EMPTY_CART");
    }
}
