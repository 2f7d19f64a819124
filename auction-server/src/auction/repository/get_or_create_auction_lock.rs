use {
    super::{
        Database,
        Repository,
    },
    crate::{
        auction::entities,
        kernel::entities::AuctionId,
    },
};

impl<D: Database> Repository<D> {
    pub async fn get_or_create_auction_lock(&self, auction_id: AuctionId) -> entities::AuctionLock {
        self.in_memory_store
            .auction_lock
            .lock()
            .await
            .entry(auction_id)
            .or_default()
            .clone()
    }
}
