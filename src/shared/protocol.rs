//! API protocol types.
//!
//! Every request body and response view exchanged over the HTTP interface
//! lives here. Monetary amounts are u64 cents, never floats; timestamps are
//! u64 nanoseconds since the Unix epoch.

use crate::domain::entities::{Bid, BuyNow, Comment, Item, User};
use serde::{Deserialize, Serialize};

/// Request to register a new user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub firstname: String,
    pub lastname: String,
    pub nickname: String,
    pub password: String,
    pub email: String,
    /// Region the user lives in.
    pub region: u64,
}

/// Credential check, performed before any write flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRequest {
    pub nickname: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user_id: u64,
}

/// Request to put a new item up for auction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterItemRequest {
    pub name: String,
    pub description: String,
    /// Starting price in cents.
    pub initial_price: u64,
    pub quantity: u64,
    /// Reserve price in cents; 0 means no reserve.
    #[serde(default)]
    pub reserve_price: u64,
    /// Buy-now price in cents; 0 means the item cannot be bought outright.
    #[serde(default)]
    pub buy_now: u64,
    /// Auction duration in seconds from now.
    pub duration_secs: u64,
    pub seller: u64,
    pub category: u64,
}

/// Request to place a bid on an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceBidRequest {
    pub user_id: u64,
    /// Openly visible bid amount in cents.
    pub bid: u64,
    /// Upper bound for proxy bidding; must be at least `bid`.
    pub max_bid: u64,
    pub qty: u64,
}

/// Request to buy a quantity of an item at its buy-now price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyNowRequest {
    pub user_id: u64,
    pub qty: u64,
}

/// Request to leave a comment on another user after a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub from_user_id: u64,
    pub item_id: u64,
    /// Rating between -5 and 5.
    pub rating: i64,
    pub comment: String,
}

/// Pagination parameters for search endpoints. Pages are zero-based.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: usize,
    #[serde(default = "Pagination::default_per_page")]
    pub per_page: usize,
}

impl Pagination {
    pub const MAX_PER_PAGE: usize = 100;

    fn default_per_page() -> usize {
        25
    }

    /// Per-page size clamped to the allowed maximum, never zero.
    pub fn limit(&self) -> usize {
        self.per_page.clamp(1, Self::MAX_PER_PAGE)
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.limit())
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: Self::default_per_page(),
        }
    }
}

/// Public view of a user account. The password never leaves the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub firstname: String,
    pub lastname: String,
    pub nickname: String,
    pub email: String,
    pub rating: i64,
    pub balance: u64,
    pub creation_date: u64,
    pub region: u64,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            nickname: user.nickname.clone(),
            email: user.email.clone(),
            rating: user.rating,
            balance: user.balance,
            creation_date: user.creation_date,
            region: user.region,
        }
    }
}

/// One row of a search result listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: u64,
    pub name: String,
    pub initial_price: u64,
    pub max_bid: u64,
    pub nb_of_bids: u64,
    pub end_date: u64,
}

impl From<&Item> for ItemSummary {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            initial_price: item.initial_price,
            max_bid: item.max_bid,
            nb_of_bids: item.nb_of_bids,
            end_date: item.end_date,
        }
    }
}

/// Full item page: the item row plus everything the bid box needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemView {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub initial_price: u64,
    pub quantity: u64,
    pub reserve_price: u64,
    pub buy_now: u64,
    pub nb_of_bids: u64,
    pub max_bid: u64,
    pub start_date: u64,
    pub end_date: u64,
    pub seller: u64,
    pub seller_nickname: String,
    pub category: u64,
    /// Price the item currently stands at.
    pub current_price: u64,
    /// Smallest acceptable next bid.
    pub min_bid: u64,
    /// Bid-box "first bid" figure: the current price once bids exist.
    pub first_bid: Option<u64>,
    pub reserve_met: bool,
    pub closed: bool,
}

/// One entry of an item's bid history, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidHistoryEntry {
    pub bidder_id: u64,
    pub bidder_nickname: String,
    pub bid: u64,
    pub max_bid: u64,
    pub qty: u64,
    pub date: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidHistoryView {
    pub item_id: u64,
    pub item_name: String,
    pub bids: Vec<BidHistoryEntry>,
}

/// A comment as displayed on a user page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub from_user_id: u64,
    pub from_nickname: String,
    pub item_id: u64,
    pub rating: i64,
    pub date: u64,
    pub comment: String,
}

impl CommentView {
    pub fn new(comment: &Comment, from_nickname: String) -> Self {
        Self {
            from_user_id: comment.from_user_id,
            from_nickname,
            item_id: comment.item_id,
            rating: comment.rating,
            date: comment.date,
            comment: comment.comment.clone(),
        }
    }
}

/// User page: profile plus the comments the user received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfoView {
    pub user: UserProfile,
    pub comments: Vec<CommentView>,
}

/// A bid the user placed, joined with the item it was placed on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBidView {
    pub item: ItemSummary,
    pub bid: u64,
    pub max_bid: u64,
    pub qty: u64,
    pub date: u64,
}

impl UserBidView {
    pub fn new(bid: &Bid, item: ItemSummary) -> Self {
        Self {
            item,
            bid: bid.bid,
            max_bid: bid.max_bid,
            qty: bid.qty,
            date: bid.date,
        }
    }
}

/// A completed buy-now purchase, joined with the item bought.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoughtItemView {
    pub item: ItemSummary,
    pub qty: u64,
    /// Total paid: buy-now price times quantity.
    pub total_price: u64,
    pub date: u64,
}

impl BoughtItemView {
    pub fn new(buy: &BuyNow, item: ItemSummary, unit_price: u64) -> Self {
        Self {
            item,
            qty: buy.qty,
            total_price: unit_price.saturating_mul(buy.qty),
            date: buy.date,
        }
    }
}

/// The member page: everything about one user's auction activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutMeView {
    pub user: UserProfile,
    /// Items the user is currently selling (auction still open).
    pub selling: Vec<ItemSummary>,
    /// Items the user listed whose auction has ended.
    pub sold: Vec<ItemSummary>,
    /// Items the user bought outright.
    pub bought: Vec<BoughtItemView>,
    /// Bids the user placed.
    pub bids: Vec<UserBidView>,
    /// Comments the user received.
    pub comments: Vec<CommentView>,
}
