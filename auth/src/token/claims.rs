use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Which identity collection a token subject belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Account,
    Expert,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Account => f.write_str("account"),
            Role::Expert => f.write_str("expert"),
        }
    }
}

/// The identity a session token is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub id: String,
    pub contact: String,
    pub role: Role,
}

impl TokenSubject {
    pub fn new(id: impl ToString, contact: impl ToString, role: Role) -> Self {
        Self {
            id: id.to_string(),
            contact: contact.to_string(),
            role,
        }
    }
}

/// Payload carried by every session token.
///
/// `iat` and `exp` are Unix timestamps in seconds. All fields are required;
/// a token missing any of them fails to decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Identity identifier
    pub sub: String,

    /// Contact address the identity logged in with (email or phone)
    pub contact: String,

    pub role: Role,

    /// Issued at
    pub iat: i64,

    /// Expiration time
    pub exp: i64,
}

impl SessionClaims {
    /// Build claims for `subject`, valid for `lifetime` from `issued_at`.
    pub fn new(subject: &TokenSubject, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        let expiration = issued_at + lifetime;

        Self {
            sub: subject.id.clone(),
            contact: subject.contact.clone(),
            role: subject.role,
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// A token is still valid at exactly its expiry second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }

    pub fn subject(&self) -> TokenSubject {
        TokenSubject {
            id: self.sub.clone(),
            contact: self.contact.clone(),
            role: self.role,
        }
    }
}
