//! Session authentication primitives.
//!
//! Provides the pieces every FarmPal service needs to authenticate callers:
//! - Secret hashing (Argon2id, PHC strings)
//! - Signed, time-bounded session tokens (HS256 JWT, one hour lifetime)
//! - An `Authenticator` coordinating the two
//!
//! The crate is stateless apart from the signing secret handed in at startup.
//!
//! # Examples
//!
//! ## Secret Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("secret1").unwrap();
//! assert!(hasher.verify("secret1", &hash).unwrap());
//! assert!(!hasher.verify("secret2", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{Role, TokenCodec, TokenSubject};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let subject = TokenSubject::new("user-1", "amaka@example.com", Role::Account);
//! let token = codec.issue(&subject).unwrap();
//! let claims = codec.verify(&token).unwrap();
//! assert_eq!(claims.sub, "user-1");
//! ```
//!
//! ## Login Flow
//! ```
//! use auth::{Authenticator, Role, TokenSubject};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Signup: store only the hash
//! let hash = auth.hash_secret("secret1").unwrap();
//!
//! // Login: verify the secret and issue a token
//! let subject = TokenSubject::new("user-1", "amaka@example.com", Role::Account);
//! let token = auth.authenticate("secret1", &hash, &subject).unwrap();
//!
//! // Every protected request: verify the token
//! let claims = auth.verify(&token).unwrap();
//! assert_eq!(claims.contact, "amaka@example.com");
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Role;
pub use token::SessionClaims;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::TokenSubject;
pub use token::SESSION_LIFETIME_SECS;
