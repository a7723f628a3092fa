use crate::error::{AppError, CliError};
use rpassword::read_password;
use std::io::{self, Write};

/// Interactive API token entry for `auth login`.
pub struct TokenInput {
    pub token: String,
}

impl TokenInput {
    /// Collects the token from interactive input without echoing it.
    pub fn collect() -> Result<Self, AppError> {
        print!("API token: ");
        io::stdout().flush().map_err(|e| {
            AppError::Cli(CliError::InvalidArguments(format!(
                "Failed to flush stdout: {}",
                e
            )))
        })?;

        let token = read_password().map_err(|e| {
            AppError::Cli(CliError::InvalidArguments(format!(
                "Failed to read token: {}",
                e
            )))
        })?;

        Ok(Self {
            token: token.trim().to_string(),
        })
    }

    /// Validate that the token is not empty
    pub fn validate(&self) -> Result<(), AppError> {
        if self.token.is_empty() {
            return Err(AppError::Cli(CliError::InvalidArguments(
                "API token cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}
