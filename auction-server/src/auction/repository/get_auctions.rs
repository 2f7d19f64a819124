use {
    super::{
        AuctionFilter,
        Database,
        Repository,
    },
    crate::{
        api::RestError,
        auction::entities,
    },
};

impl<D: Database> Repository<D> {
    /// Listing view: auctions match the filter, bid histories are not
    /// loaded.
    pub async fn get_auctions(
        &self,
        filter: AuctionFilter,
    ) -> Result<Vec<entities::Auction>, RestError> {
        let auctions = self.db.get_auctions(filter).await?;
        Ok(auctions
            .into_iter()
            .map(|auction| auction.get_entity(Vec::new()))
            .collect())
    }
}
