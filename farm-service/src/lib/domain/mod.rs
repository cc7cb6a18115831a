pub mod expert;
pub mod identity;
pub mod inventory;
