use {
    super::{
        Database,
        Repository,
    },
    crate::{
        api::RestError,
        auction::entities,
        kernel::entities::UserId,
    },
};

impl<D: Database> Repository<D> {
    /// The bidder's ledger entries, newest first.
    pub async fn get_bids_by_bidder(
        &self,
        bidder_id: UserId,
    ) -> Result<Vec<entities::Bid>, RestError> {
        let bids = self.db.get_bids_by_bidder(bidder_id).await?;
        Ok(bids.iter().map(|bid| bid.get_entity()).collect())
    }
}
