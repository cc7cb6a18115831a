pub mod identity;
pub mod inventory;
pub mod memory;

pub use identity::PostgresIdentityRepository;
pub use inventory::PostgresInventoryRepository;
pub use memory::InMemoryIdentityRepository;
pub use memory::InMemoryInventoryRepository;
