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
            entities::AuctionId,
        },
    },
};

pub struct CancelAuctionInput {
    pub auction_id: AuctionId,
    pub claims:     Claims,
}

impl<D: Database> Service<D> {
    /// Voids an auction without a winner. Admin only.
    pub async fn cancel_auction(
        &self,
        input: CancelAuctionInput,
    ) -> Result<entities::Auction, RestError> {
        if !input.claims.is_admin() {
            return Err(RestError::Forbidden);
        }
        let auction_lock = self.repo.get_or_create_auction_lock(input.auction_id).await;
        let result = self.cancel_auction_for_lock(&input, auction_lock).await;
        self.repo.remove_auction_lock(&input.auction_id).await;
        result
    }

    async fn cancel_auction_for_lock(
        &self,
        input: &CancelAuctionInput,
        auction_lock: entities::AuctionLock,
    ) -> Result<entities::Auction, RestError> {
        let _lock = auction_lock.lock().await;
        let auction = self.repo.get_auction(input.auction_id).await?;
        if !auction
            .status
            .can_transition_to(entities::AuctionStatus::Cancelled)
        {
            return Err(RestError::InvalidStatus(format!(
                "Cannot cancel an auction in status {}",
                auction.status
            )));
        }
        self.repo.cancel_auction(input.auction_id).await
    }
}
