//! The auction data model.
//!
//! Seven tables, exactly the relational schema of a classic auction site:
//! regions, categories, users, items, bids, comments and buy_now. Rows are
//! plain structs; identifiers are u64 and assigned by the store, starting
//! at 1. Money is u64 cents, dates are u64 nanoseconds since the epoch.

use serde::{Deserialize, Serialize};

/// A geographical region users register in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: u64,
    pub name: String,
}

/// An item category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

/// A registered user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub firstname: String,
    pub lastname: String,
    /// Unique login name.
    pub nickname: String,
    pub password: String,
    pub email: String,
    /// Running sum of the ratings of all comments received. Signed:
    /// negative feedback pushes it below zero.
    pub rating: i64,
    pub balance: u64,
    pub creation_date: u64,
    pub region: u64,
}

/// An item up for auction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub initial_price: u64,
    /// Remaining quantity; decremented by buy-now purchases.
    pub quantity: u64,
    /// 0 means no reserve.
    pub reserve_price: u64,
    /// Buy-now unit price; 0 means not offered.
    pub buy_now: u64,
    /// Denormalized count of bids, kept in sync with the bids table.
    pub nb_of_bids: u64,
    /// Denormalized highest bid amount, 0 while there are no bids.
    pub max_bid: u64,
    pub start_date: u64,
    pub end_date: u64,
    pub seller: u64,
    pub category: u64,
}

impl Item {
    /// An auction is open while its end date has not passed.
    pub fn is_open(&self, now: u64) -> bool {
        self.end_date > now
    }
}

/// A bid placed on an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub id: u64,
    pub user_id: u64,
    pub item_id: u64,
    pub qty: u64,
    /// Openly visible amount.
    pub bid: u64,
    /// Proxy-bidding ceiling, >= `bid`.
    pub max_bid: u64,
    pub date: u64,
}

/// A comment left by one user about another, tied to an item transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub from_user_id: u64,
    pub to_user_id: u64,
    pub item_id: u64,
    pub rating: i64,
    pub date: u64,
    pub comment: String,
}

/// An immediate purchase at the item's buy-now price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyNow {
    pub id: u64,
    pub buyer_id: u64,
    pub item_id: u64,
    pub qty: u64,
    pub date: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_open_until_end_date() {
        let item = Item {
            id: 1,
            name: "clock".into(),
            description: String::new(),
            initial_price: 1000,
            quantity: 1,
            reserve_price: 0,
            buy_now: 0,
            nb_of_bids: 0,
            max_bid: 0,
            start_date: 100,
            end_date: 200,
            seller: 1,
            category: 1,
        };

        assert!(item.is_open(150));
        assert!(!item.is_open(200));
        assert!(!item.is_open(250));
    }
}
