//! Input validation and sanitization utilities
//!
//! This module provides utilities for validating and sanitizing user input,
//! configuration values, and API parameters.

use crate::error::CliError;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    // Basic URL validation - must start with http:// or https://
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Validate API token format
pub fn validate_token(token: &str) -> crate::Result<()> {
    if token.is_empty() {
        return Err(CliError::InvalidArguments("API token cannot be empty".to_string()).into());
    }

    // Basic length check - Ahrefs API tokens are typically long
    if token.len() < 10 {
        return Err(CliError::InvalidArguments(
            "API token appears to be too short (minimum 10 characters)".to_string(),
        )
        .into());
    }

    Ok(())
}
