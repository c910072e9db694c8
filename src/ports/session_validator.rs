//! Session validator port.
//!
//! Validates a bearer token and resolves the caller's identity. The HTTP
//! auth middleware is the only consumer; keeping this a port keeps the
//! middleware provider-agnostic.

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use async_trait::async_trait;

/// Port for validating authentication tokens.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a token and return the authenticated user.
    ///
    /// # Errors
    ///
    /// - `InvalidToken` / `TokenExpired` if the token does not verify
    /// - `ServiceUnavailable` on transient validation failures
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn session_validator_is_object_safe() {
        fn _accepts_dyn(_validator: &dyn SessionValidator) {}
    }
}
