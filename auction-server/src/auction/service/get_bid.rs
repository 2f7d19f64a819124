use {
    super::Service,
    crate::{
        api::RestError,
        auction::{
            entities,
            repository::Database,
        },
        kernel::{
            auth::Claims,
            entities::BidId,
        },
    },
};

impl<D: Database> Service<D> {
    /// Loads one ledger entry. Bids are visible to their owner and to
    /// admins.
    pub async fn get_bid(
        &self,
        bid_id: BidId,
        claims: &Claims,
    ) -> Result<entities::Bid, RestError> {
        let bid = self.repo.get_bid(bid_id).await?;
        if !claims.is_admin() && bid.bidder != claims.uid {
            return Err(RestError::Forbidden);
        }
        Ok(bid)
    }
}
