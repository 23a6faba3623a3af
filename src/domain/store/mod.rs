/// Domain Layer - Store Module
///
/// The store owns the seven auction tables and every multi-table mutation.
/// The `AuctionStore` trait is the seam between business logic and storage,
/// enabling dependency injection and testing; `MemoryStore` is the
/// production implementation.
///
/// ## Transaction semantics
/// Mutations that touch two tables (bid + item counters, buy-now + item
/// quantity, comment + user rating) are atomic with respect to all other
/// store calls.

pub mod memory;
pub mod traits;

// Re-export the production implementation
pub use memory::MemoryStore;
pub use traits::{AuctionStore, StoreError, TableSizes};
