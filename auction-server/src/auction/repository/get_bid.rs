use {
    super::{
        Database,
        Repository,
    },
    crate::{
        api::RestError,
        auction::entities,
        kernel::entities::BidId,
    },
};

impl<D: Database> Repository<D> {
    pub async fn get_bid(&self, bid_id: BidId) -> Result<entities::Bid, RestError> {
        let bid = self.db.get_bid(bid_id).await?;
        Ok(bid.get_entity())
    }
}
