//! Deterministic database seeding.
//!
//! Populates a fresh store with regions, categories, users, items, bids and
//! comments so the service can be benchmarked or demoed without a client
//! driving registrations first. Seeding is reproducible: the same RNG seed
//! always yields the same database.

use crate::domain::pricing::BID_INCREMENT;
use crate::domain::store::{AuctionStore, StoreError};
use crate::shared::metrics::METRICS;
use crate::shared::protocol::{
    CommentRequest, PlaceBidRequest, RegisterItemRequest, RegisterUserRequest,
};
use crate::shared::timestamp::get_fast_timestamp;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Stock region list.
const REGIONS: &[&str] = &[
    "Atlanta", "Boston", "Chicago", "Dallas", "Denver", "Houston", "Los Angeles", "New York",
    "Phoenix", "Seattle",
];

/// Stock category list.
const CATEGORIES: &[&str] = &[
    "Antiques", "Books", "Clothing", "Computers", "Electronics", "Jewelry", "Movies", "Music",
    "Photography", "Sports", "Toys",
];

/// Seeding parameters.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub users: usize,
    pub items: usize,
    /// Average number of bids placed per item.
    pub bids_per_item: usize,
    /// Total number of comments spread across users.
    pub comments: usize,
    /// RNG seed; the same seed always produces the same database.
    pub rng_seed: u64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            users: 100,
            items: 200,
            bids_per_item: 3,
            comments: 50,
            rng_seed: 42,
        }
    }
}

/// Populates the store and updates the table gauges.
pub fn seed<S: AuctionStore>(store: &S, config: &SeedConfig) -> Result<(), StoreError> {
    let mut rng = StdRng::seed_from_u64(config.rng_seed);
    let now = get_fast_timestamp();

    for name in REGIONS {
        store.add_region(name);
    }
    for name in CATEGORIES {
        store.add_category(name);
    }

    for i in 1..=config.users {
        store.register_user(
            &RegisterUserRequest {
                firstname: format!("Great{}", i),
                lastname: format!("User{}", i),
                nickname: format!("user{}", i),
                password: format!("password{}", i),
                email: format!("user{}@bidhouse.example", i),
                region: rng.gen_range(1..=REGIONS.len() as u64),
            },
            now,
        )?;
    }

    for i in 1..=config.items {
        let initial_price = rng.gen_range(1..=500) * 100;
        let has_reserve = rng.gen_bool(0.4);
        let has_buy_now = rng.gen_bool(0.3);
        store.register_item(
            &RegisterItemRequest {
                name: format!("Item #{}", i),
                description: format!("Description of item #{}", i),
                initial_price,
                quantity: if rng.gen_bool(0.1) {
                    rng.gen_range(2..=10)
                } else {
                    1
                },
                reserve_price: if has_reserve {
                    initial_price + rng.gen_range(1..=100) * 100
                } else {
                    0
                },
                buy_now: if has_buy_now {
                    initial_price * 2 + rng.gen_range(1..=100) * 100
                } else {
                    0
                },
                duration_secs: rng.gen_range(1..=7) * 86_400,
                seller: rng.gen_range(1..=config.users as u64),
                category: rng.gen_range(1..=CATEGORIES.len() as u64),
            },
            now,
        )?;
    }

    let total_bids = config.items * config.bids_per_item;
    for _ in 0..total_bids {
        let item_id = rng.gen_range(1..=config.items as u64);
        let item = store.item(item_id)?;
        let amount = item.max_bid.max(item.initial_price) + BID_INCREMENT;
        store.place_bid(
            item_id,
            &PlaceBidRequest {
                user_id: rng.gen_range(1..=config.users as u64),
                bid: amount,
                max_bid: amount + rng.gen_range(0..=10) * BID_INCREMENT,
                qty: 1,
            },
            get_fast_timestamp(),
        )?;
    }

    for _ in 0..config.comments {
        let item_id = rng.gen_range(1..=config.items as u64);
        let item = store.item(item_id)?;
        store.store_comment(
            item.seller,
            &CommentRequest {
                from_user_id: rng.gen_range(1..=config.users as u64),
                item_id,
                rating: rng.gen_range(-5..=5),
                comment: "Automated seed comment".to_string(),
            },
            get_fast_timestamp(),
        )?;
    }

    let sizes = store.table_sizes(get_fast_timestamp());
    METRICS
        .table_rows
        .with_label_values(&["users"])
        .set(sizes.users as f64);
    METRICS
        .table_rows
        .with_label_values(&["items"])
        .set(sizes.items as f64);
    METRICS
        .table_rows
        .with_label_values(&["bids"])
        .set(sizes.bids as f64);
    METRICS
        .table_rows
        .with_label_values(&["comments"])
        .set(sizes.comments as f64);
    METRICS
        .open_auctions
        .with_label_values(&["all"])
        .set(sizes.open_items as f64);

    info!(
        users = sizes.users,
        items = sizes.items,
        bids = sizes.bids,
        comments = sizes.comments,
        "database seeded"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::store::MemoryStore;

    #[test]
    fn test_seed_populates_all_tables() {
        let store = MemoryStore::new();
        let config = SeedConfig {
            users: 10,
            items: 20,
            bids_per_item: 2,
            comments: 5,
            rng_seed: 7,
        };
        seed(&store, &config).unwrap();

        let sizes = store.table_sizes(get_fast_timestamp());
        assert_eq!(sizes.regions, REGIONS.len());
        assert_eq!(sizes.categories, CATEGORIES.len());
        assert_eq!(sizes.users, 10);
        assert_eq!(sizes.items, 20);
        assert_eq!(sizes.bids, 40);
        assert_eq!(sizes.comments, 5);
        assert_eq!(sizes.open_items, 20);
    }

    #[test]
    fn test_seed_is_deterministic() {
        let a = MemoryStore::new();
        let b = MemoryStore::new();
        let config = SeedConfig {
            users: 5,
            items: 8,
            bids_per_item: 1,
            comments: 3,
            rng_seed: 99,
        };
        seed(&a, &config).unwrap();
        seed(&b, &config).unwrap();

        for id in 1..=8u64 {
            let ia = a.item(id).unwrap();
            let ib = b.item(id).unwrap();
            assert_eq!(ia.initial_price, ib.initial_price);
            assert_eq!(ia.seller, ib.seller);
            assert_eq!(ia.category, ib.category);
        }
    }
}
