use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::SessionClaims;
use crate::token::TokenCodec;
use crate::token::TokenError;
use crate::token::TokenSubject;

/// Authentication coordinator combining secret verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Process-wide token signing secret
    pub fn new(secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(secret),
        }
    }

    /// Hash a secret for storage.
    pub fn hash_secret(&self, secret: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(secret)
    }

    /// Verify a login attempt and issue a token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Secret does not match the stored hash
    /// * `PasswordError` - Stored hash is unusable
    /// * `TokenError` - Token signing failed
    pub fn authenticate(
        &self,
        secret: &str,
        stored_hash: &str,
        subject: &TokenSubject,
    ) -> Result<String, AuthenticationError> {
        if !self.password_hasher.verify(secret, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_codec.issue(subject)?)
    }

    /// Issue a token without a secret check, e.g. right after signup.
    pub fn issue(&self, subject: &TokenSubject) -> Result<String, TokenError> {
        self.token_codec.issue(subject)
    }

    /// Verify a presented token.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.token_codec.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Role;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::new(SECRET);

        let hash = authenticator
            .hash_secret("secret1")
            .expect("Failed to hash secret");

        let subject = TokenSubject::new("user123", "amaka@example.com", Role::Account);
        let token = authenticator
            .authenticate("secret1", &hash, &subject)
            .expect("Authentication failed");

        let claims = authenticator.verify(&token).expect("Token validation failed");
        assert_eq!(claims.subject(), subject);
    }

    #[test]
    fn test_authenticate_invalid_secret() {
        let authenticator = Authenticator::new(SECRET);
        let hash = authenticator.hash_secret("secret1").unwrap();

        let subject = TokenSubject::new("user123", "amaka@example.com", Role::Account);
        let result = authenticator.authenticate("wrong", &hash, &subject);

        assert_eq!(result, Err(AuthenticationError::InvalidCredentials));
    }

    #[test]
    fn test_issue_and_verify_expert() {
        let authenticator = Authenticator::new(SECRET);

        let subject = TokenSubject::new("expert1", "+2348000000001", Role::Expert);
        let token = authenticator.issue(&subject).unwrap();

        let claims = authenticator.verify(&token).unwrap();
        assert_eq!(claims.role, Role::Expert);
        assert_eq!(claims.contact, "+2348000000001");
    }

    #[test]
    fn test_verify_invalid_token() {
        let authenticator = Authenticator::new(SECRET);
        assert!(authenticator.verify("invalid.token.here").is_err());
    }
}
