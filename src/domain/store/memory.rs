/// MemoryStore - production in-process store
///
/// Holds the seven auction tables in plain vectors behind a single
/// `parking_lot::RwLock`. Row ids are one-based vector positions; rows are
/// never deleted, so ids stay stable. The secondary-index maps mirror the
/// indexes the relational schema declares (nickname lookup, items per
/// category and seller, bids per item and user, comments per recipient,
/// purchases per buyer).
///
/// One store-wide lock makes every multi-table mutation a transaction:
/// writers are serialized, readers see either all effects of a mutation or
/// none.

use crate::domain::entities::{Bid, BuyNow, Category, Comment, Item, Region, User};
use crate::domain::pricing;
use crate::domain::store::traits::{AuctionStore, StoreError, TableSizes};
use crate::shared::protocol::{
    BuyNowRequest, CommentRequest, PlaceBidRequest, RegisterItemRequest, RegisterUserRequest,
};
use crate::shared::timestamp::NANOS_PER_SEC;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Default)]
struct Tables {
    regions: Vec<Region>,
    categories: Vec<Category>,
    users: Vec<User>,
    items: Vec<Item>,
    bids: Vec<Bid>,
    comments: Vec<Comment>,
    buy_nows: Vec<BuyNow>,

    // Secondary indexes, one per INDEX of the schema.
    user_by_nickname: HashMap<String, u64>,
    items_by_category: HashMap<u64, Vec<u64>>,
    items_by_seller: HashMap<u64, Vec<u64>>,
    bids_by_item: HashMap<u64, Vec<u64>>,
    bids_by_user: HashMap<u64, Vec<u64>>,
    comments_by_recipient: HashMap<u64, Vec<u64>>,
    buy_nows_by_buyer: HashMap<u64, Vec<u64>>,
}

impl Tables {
    fn user(&self, id: u64) -> Result<&User, StoreError> {
        id.checked_sub(1)
            .and_then(|i| self.users.get(i as usize))
            .ok_or(StoreError::UserNotFound(id))
    }

    fn user_mut(&mut self, id: u64) -> Result<&mut User, StoreError> {
        id.checked_sub(1)
            .and_then(|i| self.users.get_mut(i as usize))
            .ok_or(StoreError::UserNotFound(id))
    }

    fn item(&self, id: u64) -> Result<&Item, StoreError> {
        id.checked_sub(1)
            .and_then(|i| self.items.get(i as usize))
            .ok_or(StoreError::ItemNotFound(id))
    }

    fn item_mut(&mut self, id: u64) -> Result<&mut Item, StoreError> {
        id.checked_sub(1)
            .and_then(|i| self.items.get_mut(i as usize))
            .ok_or(StoreError::ItemNotFound(id))
    }

    /// All bids on an item, in insertion (chronological) order.
    fn item_bids(&self, item_id: u64) -> Vec<Bid> {
        self.bids_by_item
            .get(&item_id)
            .map(|ids| {
                ids.iter()
                    .map(|&id| self.bids[id as usize - 1].clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// In-memory auction store.
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AuctionStore for MemoryStore {
    fn add_region(&self, name: &str) -> Region {
        let mut t = self.tables.write();
        let region = Region {
            id: t.regions.len() as u64 + 1,
            name: name.to_string(),
        };
        t.regions.push(region.clone());
        region
    }

    fn add_category(&self, name: &str) -> Category {
        let mut t = self.tables.write();
        let category = Category {
            id: t.categories.len() as u64 + 1,
            name: name.to_string(),
        };
        t.categories.push(category.clone());
        category
    }

    fn regions(&self) -> Vec<Region> {
        self.tables.read().regions.clone()
    }

    fn categories(&self) -> Vec<Category> {
        self.tables.read().categories.clone()
    }

    fn region(&self, id: u64) -> Result<Region, StoreError> {
        let t = self.tables.read();
        id.checked_sub(1)
            .and_then(|i| t.regions.get(i as usize))
            .cloned()
            .ok_or(StoreError::RegionNotFound(id))
    }

    fn category(&self, id: u64) -> Result<Category, StoreError> {
        let t = self.tables.read();
        id.checked_sub(1)
            .and_then(|i| t.categories.get(i as usize))
            .cloned()
            .ok_or(StoreError::CategoryNotFound(id))
    }

    fn register_user(&self, req: &RegisterUserRequest, now: u64) -> Result<User, StoreError> {
        let mut t = self.tables.write();

        if req.region == 0 || req.region > t.regions.len() as u64 {
            return Err(StoreError::RegionNotFound(req.region));
        }
        if t.user_by_nickname.contains_key(&req.nickname) {
            return Err(StoreError::NicknameTaken(req.nickname.clone()));
        }

        let user = User {
            id: t.users.len() as u64 + 1,
            firstname: req.firstname.clone(),
            lastname: req.lastname.clone(),
            nickname: req.nickname.clone(),
            password: req.password.clone(),
            email: req.email.clone(),
            rating: 0,
            balance: 0,
            creation_date: now,
            region: req.region,
        };
        t.user_by_nickname.insert(user.nickname.clone(), user.id);
        t.users.push(user.clone());
        Ok(user)
    }

    fn user(&self, id: u64) -> Result<User, StoreError> {
        self.tables.read().user(id).cloned()
    }

    fn authenticate(&self, nickname: &str, password: &str) -> Result<User, StoreError> {
        let t = self.tables.read();
        let id = t
            .user_by_nickname
            .get(nickname)
            .copied()
            .ok_or(StoreError::InvalidCredentials)?;
        let user = t.user(id)?;
        if user.password != password {
            return Err(StoreError::InvalidCredentials);
        }
        Ok(user.clone())
    }

    fn register_item(&self, req: &RegisterItemRequest, now: u64) -> Result<Item, StoreError> {
        let mut t = self.tables.write();

        t.user(req.seller)?;
        if req.category == 0 || req.category > t.categories.len() as u64 {
            return Err(StoreError::CategoryNotFound(req.category));
        }

        let item = Item {
            id: t.items.len() as u64 + 1,
            name: req.name.clone(),
            description: req.description.clone(),
            initial_price: req.initial_price,
            quantity: req.quantity,
            reserve_price: req.reserve_price,
            buy_now: req.buy_now,
            nb_of_bids: 0,
            max_bid: 0,
            start_date: now,
            end_date: now.saturating_add(req.duration_secs.saturating_mul(NANOS_PER_SEC)),
            seller: req.seller,
            category: req.category,
        };
        t.items_by_category
            .entry(item.category)
            .or_default()
            .push(item.id);
        t.items_by_seller
            .entry(item.seller)
            .or_default()
            .push(item.id);
        t.items.push(item.clone());
        Ok(item)
    }

    fn item(&self, id: u64) -> Result<Item, StoreError> {
        self.tables.read().item(id).cloned()
    }

    fn search_by_category(
        &self,
        category: u64,
        now: u64,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Item>, StoreError> {
        let t = self.tables.read();
        if category == 0 || category > t.categories.len() as u64 {
            return Err(StoreError::CategoryNotFound(category));
        }

        let mut open: Vec<&Item> = t
            .items_by_category
            .get(&category)
            .map(|ids| ids.iter().map(|&id| &t.items[id as usize - 1]))
            .into_iter()
            .flatten()
            .filter(|item| item.is_open(now))
            .collect();
        open.sort_by(|a, b| a.end_date.cmp(&b.end_date).then(a.id.cmp(&b.id)));

        Ok(open
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    fn search_by_region(
        &self,
        region: u64,
        category: u64,
        now: u64,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Item>, StoreError> {
        let t = self.tables.read();
        if region == 0 || region > t.regions.len() as u64 {
            return Err(StoreError::RegionNotFound(region));
        }
        if category == 0 || category > t.categories.len() as u64 {
            return Err(StoreError::CategoryNotFound(category));
        }

        let mut open: Vec<&Item> = t
            .items_by_category
            .get(&category)
            .map(|ids| ids.iter().map(|&id| &t.items[id as usize - 1]))
            .into_iter()
            .flatten()
            .filter(|item| item.is_open(now))
            .filter(|item| {
                t.user(item.seller)
                    .map(|seller| seller.region == region)
                    .unwrap_or(false)
            })
            .collect();
        open.sort_by(|a, b| a.end_date.cmp(&b.end_date).then(a.id.cmp(&b.id)));

        Ok(open
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    fn items_by_seller(&self, seller: u64) -> Result<Vec<Item>, StoreError> {
        let t = self.tables.read();
        t.user(seller)?;
        Ok(t.items_by_seller
            .get(&seller)
            .map(|ids| {
                ids.iter()
                    .map(|&id| t.items[id as usize - 1].clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    fn place_bid(&self, item_id: u64, req: &PlaceBidRequest, now: u64) -> Result<Bid, StoreError> {
        let mut t = self.tables.write();

        t.user(req.user_id)?;
        let item = t.item(item_id)?;
        if !item.is_open(now) {
            return Err(StoreError::AuctionClosed(item_id));
        }
        if req.qty > item.quantity {
            return Err(StoreError::NotEnoughQuantity {
                requested: req.qty,
                available: item.quantity,
            });
        }

        let existing = t.item_bids(item_id);
        let min_bid = pricing::min_bid(item, &existing);
        if req.bid < min_bid {
            return Err(StoreError::BidTooLow {
                bid: req.bid,
                min_bid,
            });
        }

        let bid = Bid {
            id: t.bids.len() as u64 + 1,
            user_id: req.user_id,
            item_id,
            qty: req.qty,
            bid: req.bid,
            max_bid: req.max_bid,
            date: now,
        };
        t.bids_by_item.entry(item_id).or_default().push(bid.id);
        t.bids_by_user.entry(req.user_id).or_default().push(bid.id);
        t.bids.push(bid.clone());

        // Same transaction: keep the item's denormalized counters in sync.
        let item = t.item_mut(item_id)?;
        item.nb_of_bids += 1;
        if req.bid > item.max_bid {
            item.max_bid = req.bid;
        }

        Ok(bid)
    }

    fn bids_for_item(&self, item_id: u64) -> Result<Vec<Bid>, StoreError> {
        let t = self.tables.read();
        t.item(item_id)?;
        let mut bids = t.item_bids(item_id);
        bids.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(bids)
    }

    fn bids_by_user(&self, user_id: u64) -> Result<Vec<Bid>, StoreError> {
        let t = self.tables.read();
        t.user(user_id)?;
        let mut bids: Vec<Bid> = t
            .bids_by_user
            .get(&user_id)
            .map(|ids| {
                ids.iter()
                    .map(|&id| t.bids[id as usize - 1].clone())
                    .collect()
            })
            .unwrap_or_default();
        bids.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(bids)
    }

    fn buy_now(&self, item_id: u64, req: &BuyNowRequest, now: u64) -> Result<BuyNow, StoreError> {
        let mut t = self.tables.write();

        t.user(req.user_id)?;
        let item = t.item(item_id)?;
        if item.buy_now == 0 {
            return Err(StoreError::BuyNowUnavailable(item_id));
        }
        if !item.is_open(now) {
            return Err(StoreError::AuctionClosed(item_id));
        }
        if req.qty > item.quantity {
            return Err(StoreError::NotEnoughQuantity {
                requested: req.qty,
                available: item.quantity,
            });
        }

        let purchase = BuyNow {
            id: t.buy_nows.len() as u64 + 1,
            buyer_id: req.user_id,
            item_id,
            qty: req.qty,
            date: now,
        };
        t.buy_nows_by_buyer
            .entry(req.user_id)
            .or_default()
            .push(purchase.id);
        t.buy_nows.push(purchase.clone());

        // Same transaction: decrement stock and close a sold-out auction.
        let item = t.item_mut(item_id)?;
        item.quantity -= req.qty;
        if item.quantity == 0 {
            item.end_date = now;
        }

        Ok(purchase)
    }

    fn buy_nows_by_buyer(&self, user_id: u64) -> Result<Vec<BuyNow>, StoreError> {
        let t = self.tables.read();
        t.user(user_id)?;
        let mut purchases: Vec<BuyNow> = t
            .buy_nows_by_buyer
            .get(&user_id)
            .map(|ids| {
                ids.iter()
                    .map(|&id| t.buy_nows[id as usize - 1].clone())
                    .collect()
            })
            .unwrap_or_default();
        purchases.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(purchases)
    }

    fn store_comment(
        &self,
        to_user_id: u64,
        req: &CommentRequest,
        now: u64,
    ) -> Result<Comment, StoreError> {
        let mut t = self.tables.write();

        t.user(req.from_user_id)?;
        t.user(to_user_id)?;
        t.item(req.item_id)?;

        let comment = Comment {
            id: t.comments.len() as u64 + 1,
            from_user_id: req.from_user_id,
            to_user_id,
            item_id: req.item_id,
            rating: req.rating,
            date: now,
            comment: req.comment.clone(),
        };
        t.comments_by_recipient
            .entry(to_user_id)
            .or_default()
            .push(comment.id);
        t.comments.push(comment.clone());

        // Same transaction: cascade the rating delta onto the recipient.
        let user = t.user_mut(to_user_id)?;
        user.rating += req.rating;

        Ok(comment)
    }

    fn comments_for_user(&self, to_user_id: u64) -> Result<Vec<Comment>, StoreError> {
        let t = self.tables.read();
        t.user(to_user_id)?;
        let mut comments: Vec<Comment> = t
            .comments_by_recipient
            .get(&to_user_id)
            .map(|ids| {
                ids.iter()
                    .map(|&id| t.comments[id as usize - 1].clone())
                    .collect()
            })
            .unwrap_or_default();
        comments.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(comments)
    }

    fn table_sizes(&self, now: u64) -> TableSizes {
        let t = self.tables.read();
        TableSizes {
            regions: t.regions.len(),
            categories: t.categories.len(),
            users: t.users.len(),
            items: t.items.len(),
            open_items: t.items.iter().filter(|i| i.is_open(now)).count(),
            bids: t.bids.len(),
            comments: t.comments.len(),
            buy_nows: t.buy_nows.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::BID_INCREMENT;

    const NOW: u64 = 1_700_000_000 * NANOS_PER_SEC;
    const DAY: u64 = 86_400;

    fn store_with_reference_data() -> MemoryStore {
        let store = MemoryStore::new();
        store.add_region("Houston");
        store.add_region("Grenoble");
        store.add_category("Antiques");
        store.add_category("Books");
        store
    }

    fn register_user(store: &MemoryStore, nickname: &str, region: u64) -> User {
        store
            .register_user(
                &RegisterUserRequest {
                    firstname: "Great".into(),
                    lastname: "User".into(),
                    nickname: nickname.into(),
                    password: format!("password-{}", nickname),
                    email: format!("{}@example.org", nickname),
                    region,
                },
                NOW,
            )
            .unwrap()
    }

    fn register_item(store: &MemoryStore, seller: u64, category: u64) -> Item {
        store
            .register_item(
                &RegisterItemRequest {
                    name: "Walnut desk".into(),
                    description: "Needs polish".into(),
                    initial_price: 5_000,
                    quantity: 1,
                    reserve_price: 0,
                    buy_now: 0,
                    duration_secs: 7 * DAY,
                    seller,
                    category,
                },
                NOW,
            )
            .unwrap()
    }

    #[test]
    fn test_register_user_assigns_defaults() {
        let store = store_with_reference_data();
        let user = register_user(&store, "ada", 1);

        assert_eq!(user.id, 1);
        assert_eq!(user.rating, 0);
        assert_eq!(user.balance, 0);
        assert_eq!(user.creation_date, NOW);
    }

    #[test]
    fn test_duplicate_nickname_rejected() {
        let store = store_with_reference_data();
        register_user(&store, "ada", 1);

        let result = store.register_user(
            &RegisterUserRequest {
                firstname: "Other".into(),
                lastname: "Person".into(),
                nickname: "ada".into(),
                password: "pw".into(),
                email: "other@example.org".into(),
                region: 2,
            },
            NOW,
        );
        assert_eq!(result.unwrap_err(), StoreError::NicknameTaken("ada".into()));
    }

    #[test]
    fn test_register_user_unknown_region() {
        let store = store_with_reference_data();
        let result = store.register_user(
            &RegisterUserRequest {
                firstname: "A".into(),
                lastname: "B".into(),
                nickname: "ab".into(),
                password: "pw".into(),
                email: "ab@example.org".into(),
                region: 99,
            },
            NOW,
        );
        assert_eq!(result.unwrap_err(), StoreError::RegionNotFound(99));
    }

    #[test]
    fn test_authenticate() {
        let store = store_with_reference_data();
        let user = register_user(&store, "ada", 1);

        let found = store.authenticate("ada", "password-ada").unwrap();
        assert_eq!(found.id, user.id);

        assert_eq!(
            store.authenticate("ada", "wrong").unwrap_err(),
            StoreError::InvalidCredentials
        );
        assert_eq!(
            store.authenticate("nobody", "pw").unwrap_err(),
            StoreError::InvalidCredentials
        );
    }

    #[test]
    fn test_register_item_requires_seller_and_category() {
        let store = store_with_reference_data();
        register_user(&store, "ada", 1);

        let mut req = RegisterItemRequest {
            name: "Lamp".into(),
            description: String::new(),
            initial_price: 100,
            quantity: 1,
            reserve_price: 0,
            buy_now: 0,
            duration_secs: DAY,
            seller: 7,
            category: 1,
        };
        assert_eq!(
            store.register_item(&req, NOW).unwrap_err(),
            StoreError::UserNotFound(7)
        );

        req.seller = 1;
        req.category = 42;
        assert_eq!(
            store.register_item(&req, NOW).unwrap_err(),
            StoreError::CategoryNotFound(42)
        );
    }

    #[test]
    fn test_register_item_computes_end_date() {
        let store = store_with_reference_data();
        register_user(&store, "ada", 1);
        let item = register_item(&store, 1, 1);

        assert_eq!(item.start_date, NOW);
        assert_eq!(item.end_date, NOW + 7 * DAY * NANOS_PER_SEC);
        assert_eq!(item.nb_of_bids, 0);
        assert_eq!(item.max_bid, 0);
    }

    #[test]
    fn test_search_by_category_orders_by_end_date() {
        let store = store_with_reference_data();
        register_user(&store, "ada", 1);

        // Three items with staggered durations, plus one already closed.
        for days in [5u64, 1, 3] {
            store
                .register_item(
                    &RegisterItemRequest {
                        name: format!("item-{}d", days),
                        description: String::new(),
                        initial_price: 100,
                        quantity: 1,
                        reserve_price: 0,
                        buy_now: 0,
                        duration_secs: days * DAY,
                        seller: 1,
                        category: 1,
                    },
                    NOW,
                )
                .unwrap();
        }
        store
            .register_item(
                &RegisterItemRequest {
                    name: "closed".into(),
                    description: String::new(),
                    initial_price: 100,
                    quantity: 1,
                    reserve_price: 0,
                    buy_now: 0,
                    duration_secs: DAY,
                    seller: 1,
                    category: 1,
                },
                NOW - 2 * DAY * NANOS_PER_SEC,
            )
            .unwrap();

        let found = store.search_by_category(1, NOW, 0, 10).unwrap();
        let names: Vec<&str> = found.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["item-1d", "item-3d", "item-5d"]);

        // Pagination.
        let page = store.search_by_category(1, NOW, 1, 1).unwrap();
        assert_eq!(page[0].name, "item-3d");

        assert_eq!(
            store.search_by_category(9, NOW, 0, 10).unwrap_err(),
            StoreError::CategoryNotFound(9)
        );
    }

    #[test]
    fn test_search_by_region_filters_on_seller_region() {
        let store = store_with_reference_data();
        register_user(&store, "ada", 1);
        register_user(&store, "bob", 2);
        register_item(&store, 1, 1);
        register_item(&store, 2, 1);

        let found = store.search_by_region(2, 1, NOW, 0, 10).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].seller, 2);
    }

    #[test]
    fn test_place_bid_updates_item_counters() {
        let store = store_with_reference_data();
        register_user(&store, "seller", 1);
        register_user(&store, "bidder", 2);
        let item = register_item(&store, 1, 1);

        let bid = store
            .place_bid(
                item.id,
                &PlaceBidRequest {
                    user_id: 2,
                    bid: 5_100,
                    max_bid: 6_000,
                    qty: 1,
                },
                NOW + 1,
            )
            .unwrap();
        assert_eq!(bid.id, 1);

        let item = store.item(item.id).unwrap();
        assert_eq!(item.nb_of_bids, 1);
        assert_eq!(item.max_bid, 5_100);

        // A lower (but still acceptable) max does not regress the item.
        store
            .place_bid(
                item.id,
                &PlaceBidRequest {
                    user_id: 2,
                    bid: 5_100 + BID_INCREMENT,
                    max_bid: 5_100 + BID_INCREMENT,
                    qty: 1,
                },
                NOW + 2,
            )
            .unwrap();
        let item = store.item(item.id).unwrap();
        assert_eq!(item.nb_of_bids, 2);
        assert_eq!(item.max_bid, 5_100 + BID_INCREMENT);
    }

    #[test]
    fn test_place_bid_below_minimum_rejected() {
        let store = store_with_reference_data();
        register_user(&store, "seller", 1);
        register_user(&store, "bidder", 2);
        let item = register_item(&store, 1, 1);

        // First bid must clear initial price + increment.
        let result = store.place_bid(
            item.id,
            &PlaceBidRequest {
                user_id: 2,
                bid: 5_000,
                max_bid: 5_000,
                qty: 1,
            },
            NOW + 1,
        );
        assert_eq!(
            result.unwrap_err(),
            StoreError::BidTooLow {
                bid: 5_000,
                min_bid: 5_000 + BID_INCREMENT,
            }
        );
    }

    #[test]
    fn test_place_bid_on_closed_auction_rejected() {
        let store = store_with_reference_data();
        register_user(&store, "seller", 1);
        register_user(&store, "bidder", 2);
        let item = register_item(&store, 1, 1);

        let after_end = item.end_date + 1;
        let result = store.place_bid(
            item.id,
            &PlaceBidRequest {
                user_id: 2,
                bid: 6_000,
                max_bid: 6_000,
                qty: 1,
            },
            after_end,
        );
        assert_eq!(result.unwrap_err(), StoreError::AuctionClosed(item.id));
    }

    #[test]
    fn test_bids_for_item_newest_first() {
        let store = store_with_reference_data();
        register_user(&store, "seller", 1);
        register_user(&store, "bidder", 2);
        let item = register_item(&store, 1, 1);

        for (i, amount) in [5_100u64, 5_300, 5_500].iter().enumerate() {
            store
                .place_bid(
                    item.id,
                    &PlaceBidRequest {
                        user_id: 2,
                        bid: *amount,
                        max_bid: *amount,
                        qty: 1,
                    },
                    NOW + i as u64 + 1,
                )
                .unwrap();
        }

        let history = store.bids_for_item(item.id).unwrap();
        let amounts: Vec<u64> = history.iter().map(|b| b.bid).collect();
        assert_eq!(amounts, vec![5_500, 5_300, 5_100]);
    }

    #[test]
    fn test_buy_now_decrements_quantity_and_closes_when_sold_out() {
        let store = store_with_reference_data();
        register_user(&store, "seller", 1);
        register_user(&store, "buyer", 2);
        let item = store
            .register_item(
                &RegisterItemRequest {
                    name: "Print run".into(),
                    description: String::new(),
                    initial_price: 1_000,
                    quantity: 3,
                    reserve_price: 0,
                    buy_now: 2_000,
                    duration_secs: 7 * DAY,
                    seller: 1,
                    category: 2,
                },
                NOW,
            )
            .unwrap();

        store
            .buy_now(item.id, &BuyNowRequest { user_id: 2, qty: 2 }, NOW + 1)
            .unwrap();
        let after = store.item(item.id).unwrap();
        assert_eq!(after.quantity, 1);
        assert!(after.is_open(NOW + 2));

        store
            .buy_now(item.id, &BuyNowRequest { user_id: 2, qty: 1 }, NOW + 5)
            .unwrap();
        let after = store.item(item.id).unwrap();
        assert_eq!(after.quantity, 0);
        assert_eq!(after.end_date, NOW + 5);
        assert!(!after.is_open(NOW + 6));

        // Sold out means closed.
        let result = store.buy_now(item.id, &BuyNowRequest { user_id: 2, qty: 1 }, NOW + 7);
        assert_eq!(result.unwrap_err(), StoreError::AuctionClosed(item.id));
    }

    #[test]
    fn test_buy_now_requires_offer_and_stock() {
        let store = store_with_reference_data();
        register_user(&store, "seller", 1);
        register_user(&store, "buyer", 2);

        // No buy-now price on this one.
        let plain = register_item(&store, 1, 1);
        assert_eq!(
            store
                .buy_now(plain.id, &BuyNowRequest { user_id: 2, qty: 1 }, NOW + 1)
                .unwrap_err(),
            StoreError::BuyNowUnavailable(plain.id)
        );

        let offered = store
            .register_item(
                &RegisterItemRequest {
                    name: "Pair of chairs".into(),
                    description: String::new(),
                    initial_price: 1_000,
                    quantity: 2,
                    reserve_price: 0,
                    buy_now: 3_000,
                    duration_secs: DAY,
                    seller: 1,
                    category: 1,
                },
                NOW,
            )
            .unwrap();
        assert_eq!(
            store
                .buy_now(offered.id, &BuyNowRequest { user_id: 2, qty: 5 }, NOW + 1)
                .unwrap_err(),
            StoreError::NotEnoughQuantity {
                requested: 5,
                available: 2,
            }
        );
    }

    #[test]
    fn test_store_comment_cascades_rating() {
        let store = store_with_reference_data();
        register_user(&store, "seller", 1);
        register_user(&store, "buyer", 2);
        let item = register_item(&store, 1, 1);

        store
            .store_comment(
                1,
                &CommentRequest {
                    from_user_id: 2,
                    item_id: item.id,
                    rating: 5,
                    comment: "fast shipping".into(),
                },
                NOW + 1,
            )
            .unwrap();
        store
            .store_comment(
                1,
                &CommentRequest {
                    from_user_id: 2,
                    item_id: item.id,
                    rating: -3,
                    comment: "second thoughts".into(),
                },
                NOW + 2,
            )
            .unwrap();

        let seller = store.user(1).unwrap();
        assert_eq!(seller.rating, 2);

        let comments = store.comments_for_user(1).unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].comment, "second thoughts");
    }

    #[test]
    fn test_table_sizes() {
        let store = store_with_reference_data();
        register_user(&store, "seller", 1);
        register_user(&store, "bidder", 2);
        let item = register_item(&store, 1, 1);
        store
            .place_bid(
                item.id,
                &PlaceBidRequest {
                    user_id: 2,
                    bid: 5_100,
                    max_bid: 5_100,
                    qty: 1,
                },
                NOW + 1,
            )
            .unwrap();

        let sizes = store.table_sizes(NOW + 2);
        assert_eq!(sizes.regions, 2);
        assert_eq!(sizes.categories, 2);
        assert_eq!(sizes.users, 2);
        assert_eq!(sizes.items, 1);
        assert_eq!(sizes.open_items, 1);
        assert_eq!(sizes.bids, 1);
        assert_eq!(sizes.comments, 0);
        assert_eq!(sizes.buy_nows, 0);
    }
}
