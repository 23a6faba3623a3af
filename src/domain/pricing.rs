//! Auction pricing rules.
//!
//! The price an item "currently stands at" drives both display and bid
//! acceptance:
//! - no bids yet: the initial price
//! - single-quantity item: the highest bid
//! - multi-quantity item: the lowest currently-winning bid, found by
//!   walking the bids from highest to lowest and accumulating quantities
//!   until the item quantity is covered
//!
//! The minimum acceptable next bid is the current price plus a fixed
//! increment.

use crate::domain::entities::{Bid, Item};

/// Fixed bid increment in cents (one currency unit).
pub const BID_INCREMENT: u64 = 100;

/// Computes the price the item currently stands at.
///
/// `bids` may be in any order; the multi-quantity walk sorts a local copy
/// by amount descending.
pub fn current_price(item: &Item, bids: &[Bid]) -> u64 {
    if bids.is_empty() || item.max_bid == 0 {
        return item.initial_price;
    }

    if item.quantity > 1 {
        let mut sorted: Vec<&Bid> = bids.iter().collect();
        sorted.sort_by(|a, b| b.bid.cmp(&a.bid));

        // The lowest bid still needed to cover the full quantity wins the
        // last unit and therefore sets the price.
        let mut accumulated = 0u64;
        for bid in sorted {
            accumulated += bid.qty;
            if accumulated >= item.quantity {
                return bid.bid;
            }
        }
        // Demand does not cover the quantity: every bid is winning.
        return item.max_bid;
    }

    item.max_bid
}

/// Smallest bid amount the item will accept next: one increment above the
/// current price, whether that price comes from bids or the initial price.
pub fn min_bid(item: &Item, bids: &[Bid]) -> u64 {
    current_price(item, bids).saturating_add(BID_INCREMENT)
}

/// The bid box's "first bid" figure: nothing while the item has no bids,
/// the current price once it does.
pub fn first_bid(item: &Item, bids: &[Bid]) -> Option<u64> {
    if bids.is_empty() {
        None
    } else {
        Some(current_price(item, bids))
    }
}

/// Whether the seller's reserve price has been met. Items without a
/// reserve (reserve_price == 0) trivially meet it once a bid exists.
pub fn reserve_met(item: &Item, bids: &[Bid]) -> bool {
    if item.reserve_price == 0 {
        return true;
    }
    !bids.is_empty() && current_price(item, bids) >= item.reserve_price
}
