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
            entities::{
                BidAmount,
                BidId,
            },
        },
    },
    time::OffsetDateTime,
};

pub struct UpdateBidInput {
    pub bid_id: BidId,
    pub amount: BidAmount,
    pub claims: Claims,
}

impl<D: Database> Service<D> {
    /// Amends one of the caller's bids. The new amount passes the same
    /// validation as a fresh bid, under the same per-auction serialization.
    pub async fn update_bid(&self, input: UpdateBidInput) -> Result<entities::Bid, RestError> {
        let bid = self.repo.get_bid(input.bid_id).await?;
        if bid.bidder != input.claims.uid {
            return Err(RestError::Forbidden);
        }
        let auction_lock = self.repo.get_or_create_auction_lock(bid.auction_id).await;
        self.update_bid_for_lock(input, bid, auction_lock).await
    }

    async fn update_bid_for_lock(
        &self,
        input: UpdateBidInput,
        bid: entities::Bid,
        auction_lock: entities::AuctionLock,
    ) -> Result<entities::Bid, RestError> {
        let _lock = auction_lock.lock().await;
        let auction = self.repo.get_auction(bid.auction_id).await?;
        self.verify_bid(&auction, input.amount, OffsetDateTime::now_utc())?;
        self.repo.update_bid(input.bid_id, input.amount).await
    }
}
