use {
    super::{
        Database,
        Repository,
    },
    crate::{
        api::RestError,
        kernel::entities::AuctionId,
    },
};

impl<D: Database> Repository<D> {
    pub async fn delete_auction(&self, auction_id: AuctionId) -> Result<(), RestError> {
        self.db.delete_auction(auction_id).await
    }
}
