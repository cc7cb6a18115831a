use async_trait::async_trait;
use auth::Role;

use crate::domain::identity::models::ContactAddress;
use crate::domain::identity::models::Expert;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::RegisterExpertCommand;
use crate::domain::identity::models::Session;
use crate::domain::identity::models::SessionIdentity;
use crate::domain::identity::models::SignupCommand;
use crate::identity::errors::IdentityError;

/// Port for authentication and identity operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Create an account and log it in.
    ///
    /// # Arguments
    /// * `command` - Validated signup fields
    ///
    /// # Returns
    /// Token and stored account
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `DatabaseError` - Store operation failed
    async fn signup(&self, command: SignupCommand) -> Result<Session, IdentityError>;

    /// Log an account in by email.
    ///
    /// # Errors
    /// * `MissingFields` - Email or password is empty
    /// * `NotFound` - No account with this email
    /// * `InvalidCredentials` - Password does not match
    async fn login(&self, email: &str, password: &str) -> Result<Session, IdentityError>;

    /// Current projection of an authenticated identity, re-read from the store.
    ///
    /// # Errors
    /// * `NotFound` - Identity was removed after the token was issued
    async fn identity(&self, session: &SessionIdentity) -> Result<Identity, IdentityError>;

    /// Register an expert in the contact directory.
    ///
    /// # Errors
    /// * `AlreadyExists` - Phone number is already registered
    async fn register_expert(&self, command: RegisterExpertCommand)
        -> Result<Expert, IdentityError>;

    /// Log an expert in by phone number.
    ///
    /// # Errors
    /// * `MissingFields` - Phone or password is empty
    /// * `NotFound` - No expert with this phone number
    /// * `InvalidCredentials` - Password does not match
    async fn login_expert(&self, phone: &str, password: &str) -> Result<Session, IdentityError>;

    /// Toggle whether the authenticated expert accepts new contacts.
    ///
    /// # Errors
    /// * `WrongRole` - Session does not belong to an expert
    /// * `NotFound` - Expert no longer exists
    async fn set_availability(
        &self,
        session: &SessionIdentity,
        available: bool,
    ) -> Result<Expert, IdentityError>;
}

/// Persistence of identity records with hashed secrets.
///
/// Contact addresses are unique within their collection (emails among
/// accounts, phone numbers among experts); `create` enforces this atomically.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Persist a new identity.
    ///
    /// # Errors
    /// * `DuplicateContact` - Contact address already exists in that collection
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError>;

    /// Look an identity up by contact address.
    async fn find_by_contact(
        &self,
        contact: &ContactAddress,
    ) -> Result<Option<Identity>, IdentityError>;

    /// Look an identity up by ID within the collection for `role`.
    async fn find_by_id(&self, role: Role, id: &IdentityId)
        -> Result<Option<Identity>, IdentityError>;

    /// Update an expert's availability flag.
    ///
    /// # Returns
    /// Updated expert, or `None` if no expert has this ID
    async fn set_availability(
        &self,
        id: &IdentityId,
        available: bool,
    ) -> Result<Option<Expert>, IdentityError>;
}
