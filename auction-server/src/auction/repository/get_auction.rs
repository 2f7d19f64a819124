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
    /// Loads an auction together with its full bid view.
    pub async fn get_auction(&self, auction_id: AuctionId) -> Result<entities::Auction, RestError> {
        let auction = self.db.get_auction(auction_id).await?;
        let bids = self.db.get_auction_bids(auction_id).await?;
        Ok(auction.get_entity(bids.iter().map(|bid| bid.get_entity()).collect()))
    }

    /// Loads an auction without its bid view, for callers that only need the
    /// header fields.
    pub async fn get_auction_digest(
        &self,
        auction_id: AuctionId,
    ) -> Result<entities::Auction, RestError> {
        let auction = self.db.get_auction(auction_id).await?;
        Ok(auction.get_entity(Vec::new()))
    }
}
