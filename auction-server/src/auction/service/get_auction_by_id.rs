use {
    super::Service,
    crate::{
        api::RestError,
        auction::{
            entities,
            repository::Database,
        },
        kernel::entities::AuctionId,
    },
};

impl<D: Database> Service<D> {
    pub async fn get_auction_by_id(
        &self,
        auction_id: AuctionId,
    ) -> Result<entities::Auction, RestError> {
        self.repo.get_auction(auction_id).await
    }
}
