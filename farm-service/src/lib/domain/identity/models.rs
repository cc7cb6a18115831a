use std::fmt;
use std::str::FromStr;

use auth::Role;
use auth::SessionClaims;
use auth::TokenSubject;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::identity::errors::EmailError;
use crate::identity::errors::IdentityError;
use crate::identity::errors::IdentityIdError;
use crate::identity::errors::PhoneError;

/// Identity unique identifier, shared by accounts and experts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityId(pub Uuid);

impl IdentityId {
    /// Generate a new random identity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identity ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdentityIdError> {
        Uuid::parse_str(s)
            .map(IdentityId)
            .map_err(|e| IdentityIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using an RFC 5322 parser and additionally requires a
/// dotted domain (`name@host.tld`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email is not well formed
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_string();
        let parsed = email_address::EmailAddress::from_str(&email)
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))?;

        let domain = parsed.domain();
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(EmailError::InvalidFormat(format!(
                "domain '{}' has no top-level part",
                domain
            )));
        }

        Ok(EmailAddress(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Phone number type
///
/// Digits with an optional leading `+`; spaces, dashes and parentheses are
/// tolerated as separators and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MIN_DIGITS: usize = 5;
    const MAX_DIGITS: usize = 15;

    /// Create a new validated phone number.
    ///
    /// Separators are dropped and the result is stored as `+` followed by
    /// the digits, so differently formatted inputs compare equal.
    ///
    /// # Errors
    /// * `InvalidFormat` - Contains other characters or too few/many digits
    pub fn new(phone: String) -> Result<Self, PhoneError> {
        let phone = phone.trim().to_string();
        let body = phone.strip_prefix('+').unwrap_or(&phone);

        if !body
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'))
        {
            return Err(PhoneError::InvalidFormat(phone));
        }

        let digits: String = body.chars().filter(|c| c.is_ascii_digit()).collect();
        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len()) {
            return Err(PhoneError::InvalidFormat(phone));
        }

        Ok(Self(format!("+{}", digits)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Digits only, as used in international dialing links.
    pub fn digits(&self) -> String {
        self.0.trim_start_matches('+').to_string()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Contact address an identity logs in with.
///
/// The variant selects the collection: emails identify accounts, phone
/// numbers identify experts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContactAddress {
    Email(EmailAddress),
    Phone(PhoneNumber),
}

impl ContactAddress {
    pub fn role(&self) -> Role {
        match self {
            ContactAddress::Email(_) => Role::Account,
            ContactAddress::Phone(_) => Role::Expert,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContactAddress::Email(email) => email.as_str(),
            ContactAddress::Phone(phone) => phone.as_str(),
        }
    }
}

impl fmt::Display for ContactAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinary farmer account.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: IdentityId,
    pub name: String,
    pub email: EmailAddress,
    pub phone: String,
    pub address: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Agricultural expert reachable through the contact directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Expert {
    pub id: IdentityId,
    pub name: String,
    pub phone: PhoneNumber,
    pub expertise: Vec<String>,
    pub languages: Vec<String>,
    pub available: bool,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Stored identity record.
#[derive(Debug, Clone, PartialEq)]
pub enum Identity {
    Account(Account),
    Expert(Expert),
}

impl Identity {
    pub fn id(&self) -> IdentityId {
        match self {
            Identity::Account(account) => account.id,
            Identity::Expert(expert) => expert.id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Identity::Account(account) => &account.name,
            Identity::Expert(expert) => &expert.name,
        }
    }

    pub fn contact(&self) -> ContactAddress {
        match self {
            Identity::Account(account) => ContactAddress::Email(account.email.clone()),
            Identity::Expert(expert) => ContactAddress::Phone(expert.phone.clone()),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Identity::Account(_) => Role::Account,
            Identity::Expert(_) => Role::Expert,
        }
    }

    pub fn password_hash(&self) -> &str {
        match self {
            Identity::Account(account) => &account.password_hash,
            Identity::Expert(expert) => &expert.password_hash,
        }
    }

    /// What a session token for this identity carries.
    pub fn token_subject(&self) -> TokenSubject {
        TokenSubject::new(self.id(), self.contact(), self.role())
    }
}

/// Identity attached to a request once its session token has been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub id: IdentityId,
    pub contact: String,
    pub role: Role,
}

impl TryFrom<SessionClaims> for SessionIdentity {
    type Error = IdentityIdError;

    fn try_from(claims: SessionClaims) -> Result<Self, Self::Error> {
        Ok(Self {
            id: IdentityId::from_string(&claims.sub)?,
            contact: claims.contact,
            role: claims.role,
        })
    }
}

/// A successful login or signup.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub identity: Identity,
}

fn required(value: String, field: &'static str, missing: &mut Vec<&'static str>) -> String {
    let value = value.trim().to_string();
    if value.is_empty() {
        missing.push(field);
    }
    value
}

/// Command to create a new account with validated fields
#[derive(Debug)]
pub struct SignupCommand {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub email: EmailAddress,
    pub password: String,
}

impl SignupCommand {
    /// Validate raw signup input.
    ///
    /// Every field must be non-empty after trimming (the password is checked
    /// but kept verbatim) and the email must be well formed.
    ///
    /// # Errors
    /// * `MissingFields` - One or more fields are empty
    /// * `InvalidEmail` - Email is malformed
    pub fn parse(
        name: String,
        phone: String,
        address: String,
        email: String,
        password: String,
    ) -> Result<Self, IdentityError> {
        let mut missing = Vec::new();
        let name = required(name, "name", &mut missing);
        let phone = required(phone, "phone", &mut missing);
        let address = required(address, "address", &mut missing);
        let email = required(email, "email", &mut missing);
        if password.trim().is_empty() {
            missing.push("password");
        }

        if !missing.is_empty() {
            return Err(IdentityError::MissingFields(missing));
        }

        Ok(Self {
            name,
            phone,
            address,
            email: EmailAddress::new(email)?,
            password,
        })
    }
}

/// Command to register a new expert with validated fields
#[derive(Debug)]
pub struct RegisterExpertCommand {
    pub name: String,
    pub phone: PhoneNumber,
    pub expertise: Vec<String>,
    pub languages: Vec<String>,
    pub password: String,
}

impl RegisterExpertCommand {
    /// Validate raw expert registration input.
    ///
    /// Tags are trimmed and blank tags dropped.
    ///
    /// # Errors
    /// * `MissingFields` - Name, phone or password is empty
    /// * `InvalidPhone` - Phone number is malformed
    pub fn parse(
        name: String,
        phone: String,
        expertise: Vec<String>,
        languages: Vec<String>,
        password: String,
    ) -> Result<Self, IdentityError> {
        let mut missing = Vec::new();
        let name = required(name, "name", &mut missing);
        let phone = required(phone, "phone", &mut missing);
        if password.trim().is_empty() {
            missing.push("password");
        }

        if !missing.is_empty() {
            return Err(IdentityError::MissingFields(missing));
        }

        Ok(Self {
            name,
            phone: PhoneNumber::new(phone)?,
            expertise: clean_tags(expertise),
            languages: clean_tags(languages),
            password,
        })
    }
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}
