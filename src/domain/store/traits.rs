/// AuctionStore Trait - Domain Layer Abstraction
///
/// Defines the interface every store implementation must satisfy. The
/// methods map one-to-one onto the queries and transactions of the auction
/// schema: reference data (regions, categories), accounts, item listings,
/// bids, buy-now purchases and comments.
///
/// ## Design principles
/// - **Domain-driven**: the interface is written in terms of auction
///   operations, not storage primitives
/// - **Injected clock**: mutations take `now` as a parameter so expiry
///   logic is deterministic under test
/// - **Stateful rules live here**: minimum-bid, remaining-quantity,
///   nickname-uniqueness and existence checks must run under the same
///   lock (or transaction) as the mutation they guard
///
/// ## Implementations
/// - `MemoryStore`: production in-process implementation
/// - A SQL-backed store would implement the same trait

use crate::domain::entities::{Bid, BuyNow, Category, Comment, Item, Region, User};
use crate::shared::protocol::{
    BuyNowRequest, CommentRequest, PlaceBidRequest, RegisterItemRequest, RegisterUserRequest,
};
use thiserror::Error;

/// Store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("user {0} not found")]
    UserNotFound(u64),

    #[error("item {0} not found")]
    ItemNotFound(u64),

    #[error("region {0} not found")]
    RegionNotFound(u64),

    #[error("category {0} not found")]
    CategoryNotFound(u64),

    #[error("nickname '{0}' is already taken")]
    NicknameTaken(String),

    #[error("invalid nickname or password")]
    InvalidCredentials,

    #[error("the auction for item {0} has ended")]
    AuctionClosed(u64),

    #[error("bid {bid} is below the minimum bid {min_bid}")]
    BidTooLow { bid: u64, min_bid: u64 },

    #[error("requested {requested} items but only {available} are available")]
    NotEnoughQuantity { requested: u64, available: u64 },

    #[error("item {0} has no buy-now price")]
    BuyNowUnavailable(u64),
}

/// Row counts per table, for health reporting and gauges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableSizes {
    pub regions: usize,
    pub categories: usize,
    pub users: usize,
    pub items: usize,
    pub open_items: usize,
    pub bids: usize,
    pub comments: usize,
    pub buy_nows: usize,
}

/// Core auction store trait.
pub trait AuctionStore: Send + Sync {
    // --- reference data ---

    /// Adds a region. Reference data has no uniqueness requirement.
    fn add_region(&self, name: &str) -> Region;

    /// Adds a category.
    fn add_category(&self, name: &str) -> Category;

    fn regions(&self) -> Vec<Region>;

    fn categories(&self) -> Vec<Category>;

    fn region(&self, id: u64) -> Result<Region, StoreError>;

    fn category(&self, id: u64) -> Result<Category, StoreError>;

    // --- users ---

    /// Creates a user with zero rating and balance. Fails when the
    /// nickname is already taken.
    fn register_user(&self, req: &RegisterUserRequest, now: u64) -> Result<User, StoreError>;

    fn user(&self, id: u64) -> Result<User, StoreError>;

    /// Nickname + password check. Returns the user on success.
    fn authenticate(&self, nickname: &str, password: &str) -> Result<User, StoreError>;

    // --- items ---

    /// Lists an item: zero bids, zero max bid, start now, end after the
    /// requested duration. Seller and category must exist.
    fn register_item(&self, req: &RegisterItemRequest, now: u64) -> Result<Item, StoreError>;

    fn item(&self, id: u64) -> Result<Item, StoreError>;

    /// Open auctions in a category, ordered by end date ascending.
    fn search_by_category(
        &self,
        category: u64,
        now: u64,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Item>, StoreError>;

    /// Open auctions in a category whose seller lives in the region.
    fn search_by_region(
        &self,
        region: u64,
        category: u64,
        now: u64,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Item>, StoreError>;

    fn items_by_seller(&self, seller: u64) -> Result<Vec<Item>, StoreError>;

    // --- bids ---

    /// Places a bid. Atomically inserts the bid row, increments the item's
    /// bid counter and raises its max bid when exceeded. Rejects bids
    /// below the minimum and bids on closed auctions.
    fn place_bid(&self, item_id: u64, req: &PlaceBidRequest, now: u64) -> Result<Bid, StoreError>;

    /// Bid history for an item, newest first.
    fn bids_for_item(&self, item_id: u64) -> Result<Vec<Bid>, StoreError>;

    fn bids_by_user(&self, user_id: u64) -> Result<Vec<Bid>, StoreError>;

    // --- buy-now ---

    /// Buys a quantity outright. Atomically inserts the purchase row and
    /// decrements the item quantity, closing the auction when it reaches
    /// zero.
    fn buy_now(&self, item_id: u64, req: &BuyNowRequest, now: u64) -> Result<BuyNow, StoreError>;

    fn buy_nows_by_buyer(&self, user_id: u64) -> Result<Vec<BuyNow>, StoreError>;

    // --- comments ---

    /// Stores a comment about `to_user_id`. Atomically inserts the row and
    /// adds the rating delta to the target user's rating.
    fn store_comment(
        &self,
        to_user_id: u64,
        req: &CommentRequest,
        now: u64,
    ) -> Result<Comment, StoreError>;

    /// Comments received by a user, newest first.
    fn comments_for_user(&self, to_user_id: u64) -> Result<Vec<Comment>, StoreError>;

    // --- observability ---

    fn table_sizes(&self, now: u64) -> TableSizes;
}
