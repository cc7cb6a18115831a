pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::Role;
pub use claims::SessionClaims;
pub use claims::TokenSubject;
pub use codec::TokenCodec;
pub use codec::SESSION_LIFETIME_SECS;
pub use errors::TokenError;
