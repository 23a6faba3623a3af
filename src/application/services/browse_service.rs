/// Browse Service - Read Path
///
/// Assembles the read-side views: region and category listings, item
/// searches, the item page with its bid box numbers, bid histories, user
/// pages and the member "about me" page. Views join rows from several
/// tables (items with sellers, bids with bidders, comments with authors)
/// the way the corresponding pages display them.

use crate::domain::pricing;
use crate::domain::store::{AuctionStore, StoreError};
use crate::shared::protocol::{
    AboutMeView, BidHistoryEntry, BidHistoryView, BoughtItemView, CommentView, ItemSummary,
    ItemView, Pagination, UserBidView, UserInfoView, UserProfile,
};
use crate::shared::timestamp::get_fast_timestamp;
use crate::domain::entities::{Category, Region};
use std::sync::Arc;

/// Read-path service over an injected store.
pub struct BrowseService<S: AuctionStore> {
    store: Arc<S>,
}

impl<S: AuctionStore> BrowseService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn regions(&self) -> Vec<Region> {
        self.store.regions()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.store.categories()
    }

    /// Open auctions in a category, soonest-ending first.
    pub fn search_by_category(
        &self,
        category: u64,
        page: Pagination,
    ) -> Result<Vec<ItemSummary>, StoreError> {
        let items = self.store.search_by_category(
            category,
            get_fast_timestamp(),
            page.offset(),
            page.limit(),
        )?;
        Ok(items.iter().map(ItemSummary::from).collect())
    }

    /// Open auctions in a category whose sellers live in a region.
    pub fn search_by_region(
        &self,
        region: u64,
        category: u64,
        page: Pagination,
    ) -> Result<Vec<ItemSummary>, StoreError> {
        let items = self.store.search_by_region(
            region,
            category,
            get_fast_timestamp(),
            page.offset(),
            page.limit(),
        )?;
        Ok(items.iter().map(ItemSummary::from).collect())
    }

    /// The item page: the full row plus the numbers the bid box shows.
    pub fn view_item(&self, item_id: u64) -> Result<ItemView, StoreError> {
        let item = self.store.item(item_id)?;
        let bids = self.store.bids_for_item(item_id)?;
        let seller = self.store.user(item.seller)?;
        let now = get_fast_timestamp();

        Ok(ItemView {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            initial_price: item.initial_price,
            quantity: item.quantity,
            reserve_price: item.reserve_price,
            buy_now: item.buy_now,
            nb_of_bids: item.nb_of_bids,
            max_bid: item.max_bid,
            start_date: item.start_date,
            end_date: item.end_date,
            seller: item.seller,
            seller_nickname: seller.nickname,
            category: item.category,
            current_price: pricing::current_price(&item, &bids),
            min_bid: pricing::min_bid(&item, &bids),
            first_bid: pricing::first_bid(&item, &bids),
            reserve_met: pricing::reserve_met(&item, &bids),
            closed: !item.is_open(now),
        })
    }

    /// Bid history for an item, newest first, with bidder nicknames.
    pub fn bid_history(&self, item_id: u64) -> Result<BidHistoryView, StoreError> {
        let item = self.store.item(item_id)?;
        let bids = self.store.bids_for_item(item_id)?;

        let mut entries = Vec::with_capacity(bids.len());
        for bid in &bids {
            let bidder = self.store.user(bid.user_id)?;
            entries.push(BidHistoryEntry {
                bidder_id: bid.user_id,
                bidder_nickname: bidder.nickname,
                bid: bid.bid,
                max_bid: bid.max_bid,
                qty: bid.qty,
                date: bid.date,
            });
        }

        Ok(BidHistoryView {
            item_id: item.id,
            item_name: item.name,
            bids: entries,
        })
    }

    /// The public user page: profile plus received comments.
    pub fn user_info(&self, user_id: u64) -> Result<UserInfoView, StoreError> {
        let user = self.store.user(user_id)?;
        let comments = self.comment_views(user_id)?;

        Ok(UserInfoView {
            user: UserProfile::from(&user),
            comments,
        })
    }

    /// The member page: everything about one user's auction activity.
    pub fn about_me(&self, user_id: u64) -> Result<AboutMeView, StoreError> {
        let user = self.store.user(user_id)?;
        let now = get_fast_timestamp();

        let listed = self.store.items_by_seller(user_id)?;
        let (selling, sold): (Vec<_>, Vec<_>) =
            listed.iter().partition(|item| item.is_open(now));

        let mut bought = Vec::new();
        for purchase in self.store.buy_nows_by_buyer(user_id)? {
            let item = self.store.item(purchase.item_id)?;
            bought.push(BoughtItemView::new(
                &purchase,
                ItemSummary::from(&item),
                item.buy_now,
            ));
        }

        let mut bids = Vec::new();
        for bid in self.store.bids_by_user(user_id)? {
            let item = self.store.item(bid.item_id)?;
            bids.push(UserBidView::new(&bid, ItemSummary::from(&item)));
        }

        let comments = self.comment_views(user_id)?;

        Ok(AboutMeView {
            user: UserProfile::from(&user),
            selling: selling.into_iter().map(ItemSummary::from).collect(),
            sold: sold.into_iter().map(ItemSummary::from).collect(),
            bought,
            bids,
            comments,
        })
    }

    fn comment_views(&self, user_id: u64) -> Result<Vec<CommentView>, StoreError> {
        let comments = self.store.comments_for_user(user_id)?;
        let mut views = Vec::with_capacity(comments.len());
        for comment in &comments {
            let author = self.store.user(comment.from_user_id)?;
            views.push(CommentView::new(comment, author.nickname));
        }
        Ok(views)
    }
}
