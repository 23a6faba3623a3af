/// Domain Layer - Core Business Logic
///
/// The heart of the auction service: the data model, the pricing rules,
/// request validation, and the store abstraction. Pure business logic with
/// no I/O and no framework dependencies, testable in isolation.
///
/// ## Modules
/// - `entities`: the relational data model (users, items, bids, comments,
///   categories, regions, buy-now purchases)
/// - `pricing`: current price, minimum bid, reserve handling
/// - `validation`: stateless request validation
/// - `store`: the `AuctionStore` trait and its in-memory implementation

pub mod entities;
pub mod pricing;
pub mod store;
pub mod validation;

// Re-export key types
pub use store::{AuctionStore, MemoryStore, StoreError};
