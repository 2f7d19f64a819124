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
    pub async fn cancel_auction(
        &self,
        auction_id: AuctionId,
    ) -> Result<entities::Auction, RestError> {
        let auction = self
            .db
            .set_auction_status(auction_id, super::AuctionStatus::Cancelled)
            .await?;
        Ok(auction.get_entity(Vec::new()))
    }
}
