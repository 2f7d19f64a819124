use {
    super::{
        Database,
        Repository,
    },
    crate::{
        api::RestError,
        auction::entities,
        kernel::entities::{
            BidAmount,
            BidId,
        },
    },
};

impl<D: Database> Repository<D> {
    /// Raises a ledger entry and recomputes the parent auction's highest-bid
    /// cache from the ledger in the same transaction.
    pub async fn update_bid(
        &self,
        bid_id: BidId,
        amount: BidAmount,
    ) -> Result<entities::Bid, RestError> {
        let bid = self.db.update_bid_amount(bid_id, amount).await?;
        Ok(bid.get_entity())
    }
}
