use {
    super::entities,
    crate::kernel::entities::AuctionId,
    std::collections::HashMap,
    tokio::sync::Mutex,
};

mod add_auction;
mod add_bid;
mod cancel_auction;
mod conclude_auction;
mod delete_auction;
mod get_auction;
mod get_auctions;
mod get_bid;
mod get_bids_by_bidder;
mod get_or_create_auction_lock;
mod get_property;
mod models;
mod remove_auction_lock;
mod remove_bid;
mod update_bid;

pub use models::*;

/// Per-auction serialization tokens. Persistent state lives in the database;
/// the locks only order concurrent mutations of one auction within this
/// process.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub auction_lock: Mutex<HashMap<AuctionId, entities::AuctionLock>>,
}

#[derive(Debug)]
pub struct Repository<D: Database> {
    pub in_memory_store: InMemoryStore,
    pub db:              D,
}

impl<D: Database> Repository<D> {
    pub fn new(db: D) -> Self {
        Self {
            in_memory_store: InMemoryStore::default(),
            db,
        }
    }
}
