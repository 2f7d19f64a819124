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

pub struct WithdrawBidInput {
    pub bid_id: BidId,
    pub claims: Claims,
}

impl<D: Database> Service<D> {
    /// Withdraws one of the caller's bids. If it held the highest-bid cache,
    /// the cache falls back to the next best ledger entry, or to the base
    /// price when the ledger empties.
    pub async fn withdraw_bid(&self, input: WithdrawBidInput) -> Result<(), RestError> {
        let bid = self.repo.get_bid(input.bid_id).await?;
        if bid.bidder != input.claims.uid {
            return Err(RestError::Forbidden);
        }
        let auction_lock = self.repo.get_or_create_auction_lock(bid.auction_id).await;
        self.withdraw_bid_for_lock(input, auction_lock).await
    }

    async fn withdraw_bid_for_lock(
        &self,
        input: WithdrawBidInput,
        auction_lock: entities::AuctionLock,
    ) -> Result<(), RestError> {
        let _lock = auction_lock.lock().await;
        self.repo.remove_bid(input.bid_id).await
    }
}
