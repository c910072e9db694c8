//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Authentication configuration.
///
/// Tokens are HS256 JWTs issued by the accounts service; both sides share
/// the secret.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 signing secret
    pub jwt_secret: String,
}

impl AuthConfig {
    /// Validate auth configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if self.jwt_secret.len() < 32 {
            return Err(ValidationError::JwtSecretTooShort);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_secret_fails_validation() {
        let config = AuthConfig {
            jwt_secret: String::new(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn short_secret_fails_validation() {
        let config = AuthConfig {
            jwt_secret: "too-short".to_string(),
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::JwtSecretTooShort)
        ));
    }

    #[test]
    fn long_secret_passes() {
        let config = AuthConfig {
            jwt_secret: "x".repeat(32),
        };
        assert!(config.validate().is_ok());
    }
}
