use {
    super::{
        Database,
        Repository,
    },
    crate::kernel::entities::AuctionId,
    std::sync::Arc,
};

impl<D: Database> Repository<D> {
    /// Dropped once an auction reaches a terminal state so the lock map does
    /// not grow without bound.
    pub async fn remove_auction_lock(&self, auction_id: &AuctionId) {
        let mut mutex_guard = self.in_memory_store.auction_lock.lock().await;
        let auction_lock = mutex_guard.get(auction_id);
        if let Some(auction_lock) = auction_lock {
            // Whenever there is no task borrowing the lock for this auction, we can remove it from the locks HashMap.
            if Arc::strong_count(auction_lock) == 1 {
                mutex_guard.remove(auction_id);
            }
        }
    }
}
