pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::expert;
pub use domain::identity;
pub use domain::inventory;
pub use outbound::repositories;
