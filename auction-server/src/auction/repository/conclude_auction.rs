use {
    super::{
        Database,
        Repository,
    },
    crate::{
        api::RestError,
        auction::entities,
        kernel::entities::AuctionId,
    },
};

impl<D: Database> Repository<D> {
    pub async fn conclude_auction(
        &self,
        auction_id: AuctionId,
    ) -> Result<entities::Auction, RestError> {
        let auction = self
            .db
            .set_auction_status(auction_id, super::AuctionStatus::Completed)
            .await?;
        let bids = self.db.get_auction_bids(auction_id).await?;
        Ok(auction.get_entity(bids.iter().map(|bid| bid.get_entity()).collect()))
    }
}
