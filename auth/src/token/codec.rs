use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::claims::TokenSubject;
use super::errors::TokenError;

/// Lifetime of every session token. There is no refresh; expiry forces a new login.
pub const SESSION_LIFETIME_SECS: i64 = 60 * 60;

/// Issues and verifies signed session tokens.
///
/// Uses HS256 (HMAC with SHA-256). The signing secret is the only state and is
/// fixed at construction.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetime: Duration,
}

impl TokenCodec {
    /// Create a codec signing with `secret`.
    ///
    /// # Arguments
    /// * `secret` - HMAC key, at least 32 bytes recommended
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            lifetime: Duration::seconds(SESSION_LIFETIME_SECS),
        }
    }

    /// Issue a token for `subject`, expiring one hour from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue(&self, subject: &TokenSubject) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`.
    pub fn issue_at(
        &self,
        subject: &TokenSubject,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = SessionClaims::new(subject, issued_at, self.lifetime);

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token against the current clock.
    ///
    /// # Errors
    /// * `Malformed` - Not a decodable token or missing claims
    /// * `BadSignature` - Signed with a different secret or altered
    /// * `Expired` - Current time is past the embedded expiry
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as of `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
        // Expiry is checked below against `now`, without leeway.
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &validation)?.claims;

        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::claims::Role;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn subject() -> TokenSubject {
        TokenSubject::new("user123", "amaka@example.com", Role::Account)
    }

    fn tamper_signature(token: &str) -> String {
        let (head, signature) = token.rsplit_once('.').unwrap();
        let mut chars: Vec<char> = signature.chars().collect();
        let middle = chars.len() / 2;
        chars[middle] = if chars[middle] == 'A' { 'B' } else { 'A' };
        format!("{}.{}", head, chars.into_iter().collect::<String>())
    }

    #[test]
    fn test_issue_and_verify() {
        let codec = TokenCodec::new(SECRET);

        let token = codec.issue(&subject()).expect("Failed to issue token");
        assert_eq!(token.split('.').count(), 3);

        let claims = codec.verify(&token).expect("Failed to verify token");
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.contact, "amaka@example.com");
        assert_eq!(claims.role, Role::Account);
        assert_eq!(claims.exp - claims.iat, SESSION_LIFETIME_SECS);
    }

    #[test]
    fn test_verify_expiry_boundary() {
        let codec = TokenCodec::new(SECRET);
        let issued_at = Utc::now();
        let token = codec.issue_at(&subject(), issued_at).unwrap();

        assert!(codec
            .verify_at(&token, issued_at + Duration::minutes(59))
            .is_ok());
        assert!(codec
            .verify_at(&token, issued_at + Duration::minutes(60))
            .is_ok());
        assert_eq!(
            codec.verify_at(&token, issued_at + Duration::minutes(61)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_verify_token_issued_in_the_past() {
        let codec = TokenCodec::new(SECRET);

        let stale = codec
            .issue_at(&subject(), Utc::now() - Duration::minutes(61))
            .unwrap();
        assert_eq!(codec.verify(&stale), Err(TokenError::Expired));

        let fresh = codec
            .issue_at(&subject(), Utc::now() - Duration::minutes(59))
            .unwrap();
        assert!(codec.verify(&fresh).is_ok());
    }

    #[test]
    fn test_verify_tampered_signature() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.issue(&subject()).unwrap();

        let result = codec.verify(&tamper_signature(&token));
        assert!(result.is_err());
        assert_ne!(result, Err(TokenError::Expired));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let codec1 = TokenCodec::new(b"secret1_at_least_32_bytes_long_key!");
        let codec2 = TokenCodec::new(b"secret2_at_least_32_bytes_long_key!");

        let token = codec1.issue(&subject()).unwrap();

        assert_eq!(codec2.verify(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_verify_malformed_token() {
        let codec = TokenCodec::new(SECRET);

        assert!(matches!(
            codec.verify("invalid.token.here"),
            Err(TokenError::Malformed(_))
        ));
        assert!(matches!(codec.verify(""), Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_verify_rejects_foreign_claims() {
        #[derive(serde::Serialize)]
        struct Foreign {
            sub: String,
            exp: i64,
        }

        let token = encode(
            &Header::new(Algorithm::HS256),
            &Foreign {
                sub: "user123".to_string(),
                exp: Utc::now().timestamp() + 600,
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let codec = TokenCodec::new(SECRET);
        assert!(matches!(codec.verify(&token), Err(TokenError::Malformed(_))));
    }
}
