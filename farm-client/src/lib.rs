//! Client library for the FarmPal API.
//!
//! [`SessionContext`] holds the signed-in identity and is passed explicitly to
//! every protected call. The bearer token is persisted through a
//! [`TokenStore`] under the `jwtToken` key.

pub mod api;
pub mod error;
pub mod experts;
pub mod inventory;
pub mod session;
pub mod store;

pub use api::ApiClient;
pub use error::ClientError;
pub use session::AuthOutcome;
pub use session::IdentityStatus;
pub use session::SessionContext;
pub use session::SessionState;
pub use session::SignupForm;
pub use session::UserProfile;
pub use store::FileTokenStore;
pub use store::MemoryTokenStore;
pub use store::TokenStore;
pub use store::TOKEN_KEY;
