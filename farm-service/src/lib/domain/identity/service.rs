use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Role;
use chrono::Utc;

use crate::domain::identity::models::Account;
use crate::domain::identity::models::ContactAddress;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Expert;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::PhoneNumber;
use crate::domain::identity::models::RegisterExpertCommand;
use crate::domain::identity::models::Session;
use crate::domain::identity::models::SessionIdentity;
use crate::domain::identity::models::SignupCommand;
use crate::identity::errors::IdentityError;
use crate::identity::ports::AuthServicePort;
use crate::identity::ports::CredentialStore;

/// Domain service for signup, login and identity lookups.
///
/// Storage and codec failures are translated into `IdentityError` here; nothing
/// below this boundary reaches callers untranslated.
pub struct AuthService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<Authenticator>,
}

impl<CS> AuthService<CS>
where
    CS: CredentialStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `authenticator` - Secret hashing and token issuance, keyed by the process-wide secret
    pub fn new(store: Arc<CS>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            store,
            authenticator,
        }
    }

    fn hash_secret(&self, secret: &str) -> Result<String, IdentityError> {
        self.authenticator
            .hash_secret(secret)
            .map_err(|e| IdentityError::Unknown(format!("Password hashing failed: {}", e)))
    }

    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        self.store.create(identity).await.map_err(|e| match e {
            IdentityError::DuplicateContact(contact) => IdentityError::AlreadyExists(contact),
            other => other,
        })
    }

    async fn login_with(
        &self,
        contact: Option<ContactAddress>,
        raw_contact: &str,
        password: &str,
    ) -> Result<Session, IdentityError> {
        // A malformed address cannot belong to any stored identity.
        let contact = contact.ok_or_else(|| IdentityError::NotFound(raw_contact.to_string()))?;

        let identity = self
            .store
            .find_by_contact(&contact)
            .await?
            .ok_or_else(|| IdentityError::NotFound(contact.to_string()))?;

        let token = self
            .authenticator
            .authenticate(password, identity.password_hash(), &identity.token_subject())
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::info!(
                        identity_id = %identity.id(),
                        "Login rejected: invalid credentials"
                    );
                    IdentityError::InvalidCredentials
                }
                AuthenticationError::PasswordError(err) => {
                    IdentityError::Unknown(format!("Password verification failed: {}", err))
                }
                AuthenticationError::TokenError(err) => {
                    IdentityError::Unknown(format!("Token generation failed: {}", err))
                }
            })?;

        tracing::info!(
            identity_id = %identity.id(),
            role = %identity.role(),
            "Session issued"
        );

        Ok(Session { token, identity })
    }
}

fn require_credentials(
    contact_field: &'static str,
    contact: &str,
    password: &str,
) -> Result<(), IdentityError> {
    let mut missing = Vec::new();
    if contact.trim().is_empty() {
        missing.push(contact_field);
    }
    if password.is_empty() {
        missing.push("password");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(IdentityError::MissingFields(missing))
    }
}

#[async_trait]
impl<CS> AuthServicePort for AuthService<CS>
where
    CS: CredentialStore,
{
    async fn signup(&self, command: SignupCommand) -> Result<Session, IdentityError> {
        let password_hash = self.hash_secret(&command.password)?;

        let account = Account {
            id: IdentityId::new(),
            name: command.name,
            email: command.email,
            phone: command.phone,
            address: command.address,
            password_hash,
            created_at: Utc::now(),
        };

        let identity = self.create(Identity::Account(account)).await?;

        let token = self
            .authenticator
            .issue(&identity.token_subject())
            .map_err(|e| IdentityError::Unknown(format!("Token generation failed: {}", e)))?;

        tracing::info!(identity_id = %identity.id(), "Account created");

        Ok(Session { token, identity })
    }

    async fn login(&self, email: &str, password: &str) -> Result<Session, IdentityError> {
        require_credentials("email", email, password)?;

        let contact = EmailAddress::new(email.to_string())
            .ok()
            .map(ContactAddress::Email);

        self.login_with(contact, email, password).await
    }

    async fn identity(&self, session: &SessionIdentity) -> Result<Identity, IdentityError> {
        self.store
            .find_by_id(session.role, &session.id)
            .await?
            .ok_or_else(|| IdentityError::NotFound(session.id.to_string()))
    }

    async fn register_expert(
        &self,
        command: RegisterExpertCommand,
    ) -> Result<Expert, IdentityError> {
        let password_hash = self.hash_secret(&command.password)?;

        let expert = Expert {
            id: IdentityId::new(),
            name: command.name,
            phone: command.phone,
            expertise: command.expertise,
            languages: command.languages,
            available: true,
            password_hash,
            created_at: Utc::now(),
        };

        match self.create(Identity::Expert(expert)).await? {
            Identity::Expert(expert) => {
                tracing::info!(identity_id = %expert.id, "Expert registered");
                Ok(expert)
            }
            Identity::Account(account) => Err(IdentityError::Unknown(format!(
                "Store returned account {} for an expert registration",
                account.id
            ))),
        }
    }

    async fn login_expert(&self, phone: &str, password: &str) -> Result<Session, IdentityError> {
        require_credentials("phone", phone, password)?;

        let contact = PhoneNumber::new(phone.to_string())
            .ok()
            .map(ContactAddress::Phone);

        self.login_with(contact, phone, password).await
    }

    async fn set_availability(
        &self,
        session: &SessionIdentity,
        available: bool,
    ) -> Result<Expert, IdentityError> {
        if session.role != Role::Expert {
            return Err(IdentityError::WrongRole(
                "Only experts can change availability".to_string(),
            ));
        }

        let expert = self
            .store
            .set_availability(&session.id, available)
            .await?
            .ok_or_else(|| IdentityError::NotFound(session.id.to_string()))?;

        tracing::info!(identity_id = %expert.id, available, "Expert availability changed");

        Ok(expert)
    }
}
