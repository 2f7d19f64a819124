use {
    super::{
        Database,
        Repository,
    },
    crate::{
        api::RestError,
        kernel::entities::BidId,
    },
};

impl<D: Database> Repository<D> {
    /// Withdraws a ledger entry; the highest-bid cache is recomputed from
    /// what remains, so it never goes stale.
    pub async fn remove_bid(&self, bid_id: BidId) -> Result<(), RestError> {
        self.db.remove_bid(bid_id).await
    }
}
